//! Database connection check against a stub connection
//!
//! The stub never connects, so `testConnection` always fails. The suite
//! exists to show what a failing external-resource check looks like.

use tally_core::{Check, Fixture, Methods, TestCase, TestError, TestSuite};

#[derive(Debug)]
struct StubConnection {
    state: &'static str,
}

impl StubConnection {
    fn open() -> Self {
        Self { state: "aborted" }
    }
}

#[derive(Debug, Default)]
pub struct DbTest {
    connection: Option<StubConnection>,
}

impl DbTest {
    fn test_connection(&mut self, check: &Check) -> Result<(), TestError> {
        let state = self.connection.as_ref().map_or("closed", |c| c.state);
        check.equal("connected", state)
    }
}

impl Fixture for DbTest {
    fn set_up(&mut self) -> Result<(), TestError> {
        self.connection = Some(StubConnection::open());
        Ok(())
    }

    fn tear_down(&mut self) -> Result<(), TestError> {
        self.connection = None;
        Ok(())
    }

    fn methods() -> Methods<Self> {
        Methods::new().with("testConnection", Self::test_connection)
    }
}

pub fn suite() -> TestSuite {
    TestSuite::new("db").with(TestCase::<DbTest>::named("testConnection"))
}
