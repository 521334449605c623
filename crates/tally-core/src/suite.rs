//! Test suites
//!
//! Anything that can run against a [`TestResult`] is a [`Test`]: single
//! [`TestCase`]s and whole [`TestSuite`]s alike, so suites nest.

use crate::case::{Fixture, TestCase};
use crate::error::RunError;
use crate::result::TestResult;
use crate::sink::Sink;
use tracing::debug;

/// A runnable unit: a test case or a suite of them
pub trait Test {
    /// Display name
    fn name(&self) -> &str;

    /// Run against the shared `result`, reporting diagnostics to `sink`.
    fn run(&mut self, result: &TestResult, sink: &dyn Sink) -> Result<(), RunError>;

    /// Number of test cases a run will start
    fn count_test_cases(&self) -> usize;

    /// Names of the test cases, in run order
    fn test_names(&self) -> Vec<String>;

    /// Keep only test cases whose name contains `pattern`; `None` when
    /// nothing is left.
    fn retain_matching(self: Box<Self>, pattern: &str) -> Option<Box<dyn Test>>;
}

impl<F: Fixture + 'static> Test for TestCase<F> {
    fn name(&self) -> &str {
        TestCase::name(self)
    }

    fn run(&mut self, result: &TestResult, sink: &dyn Sink) -> Result<(), RunError> {
        TestCase::run(self, result, sink)
    }

    fn count_test_cases(&self) -> usize {
        1
    }

    fn test_names(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }

    fn retain_matching(self: Box<Self>, pattern: &str) -> Option<Box<dyn Test>> {
        if self.name().contains(pattern) {
            Some(self)
        } else {
            None
        }
    }
}

/// Ordered collection of tests sharing one result per run
#[derive(Default)]
pub struct TestSuite {
    name: String,
    tests: Vec<Box<dyn Test>>,
}

impl TestSuite {
    /// Create an empty suite
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    /// Append a test; it runs after everything added before it.
    pub fn add<T: Test + 'static>(&mut self, test: T) {
        self.tests.push(Box::new(test));
    }

    /// Builder form of [`TestSuite::add`]
    pub fn with<T: Test + 'static>(mut self, test: T) -> Self {
        self.add(test);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of direct members
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Run every member in insertion order against `result`.
    ///
    /// A failing test body never stops later members. A set-up or
    /// tear-down fault is returned immediately and the rest of the suite
    /// does not run.
    pub fn run(&mut self, result: &TestResult, sink: &dyn Sink) -> Result<(), RunError> {
        debug!(suite = %self.name, members = self.tests.len(), "running suite");
        for test in &mut self.tests {
            test.run(result, sink)?;
        }
        Ok(())
    }

    /// Keep only test cases whose name contains `pattern`, descending into
    /// nested suites and dropping the ones left empty.
    pub fn filter(self, pattern: &str) -> Self {
        let tests = self
            .tests
            .into_iter()
            .filter_map(|test| test.retain_matching(pattern))
            .collect();

        TestSuite {
            name: self.name,
            tests,
        }
    }
}

impl Test for TestSuite {
    fn name(&self) -> &str {
        TestSuite::name(self)
    }

    fn run(&mut self, result: &TestResult, sink: &dyn Sink) -> Result<(), RunError> {
        TestSuite::run(self, result, sink)
    }

    fn count_test_cases(&self) -> usize {
        self.tests.iter().map(|t| t.count_test_cases()).sum()
    }

    fn test_names(&self) -> Vec<String> {
        self.tests.iter().flat_map(|t| t.test_names()).collect()
    }

    fn retain_matching(self: Box<Self>, pattern: &str) -> Option<Box<dyn Test>> {
        let filtered = self.filter(pattern);
        if filtered.is_empty() {
            None
        } else {
            Some(Box::new(filtered))
        }
    }
}
