//! Fixture that records what the run protocol did to it

use tally_core::{Check, Fixture, Methods, TestError};

#[derive(Debug, Default)]
pub struct WasRun {
    pub was_run: bool,
    pub was_set_up: bool,
    /// Space-separated record of hooks and bodies, e.g. `"setUp testMethod tearDown "`
    pub log: String,
}

impl WasRun {
    fn test_method(&mut self, _check: &Check) -> Result<(), TestError> {
        self.was_run = true;
        self.log.push_str("testMethod ");
        Ok(())
    }

    fn test_broken_method(&mut self, _check: &Check) -> Result<(), TestError> {
        Err(TestError::fault("broken method"))
    }
}

impl Fixture for WasRun {
    fn set_up(&mut self) -> Result<(), TestError> {
        self.was_run = false;
        self.was_set_up = true;
        self.log = "setUp ".to_string();
        Ok(())
    }

    fn tear_down(&mut self) -> Result<(), TestError> {
        self.log.push_str("tearDown ");
        Ok(())
    }

    fn methods() -> Methods<Self> {
        Methods::new()
            .with("testMethod", Self::test_method)
            .with("testBrokenMethod", Self::test_broken_method)
    }
}
