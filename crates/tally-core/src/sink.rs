//! Diagnostic sinks
//!
//! A [`Sink`] receives assertion diagnostics at the moment they fail, and a
//! notification for every failed test body. The run protocol never writes to
//! the console itself; callers decide where diagnostics go.

use crate::error::TestError;
use std::sync::Mutex;
use tracing::warn;

/// Receiver for diagnostics produced while tests run
pub trait Sink {
    /// Called by the assertion primitive before the failure propagates.
    fn assertion_failed(&self, message: &str);

    /// Called by the run protocol once a test body has failed.
    fn test_failed(&self, _test: &str, _error: &TestError) {}
}

/// Routes diagnostics to `tracing` at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn assertion_failed(&self, message: &str) {
        warn!(target: "tally::assert", "{}", message);
    }

    fn test_failed(&self, test: &str, error: &TestError) {
        warn!(target: "tally::assert", test, %error, "test failed");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl Sink for SilentSink {
    fn assertion_failed(&self, _message: &str) {}
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
    failures: Mutex<Vec<(String, TestError)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assertion messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Failed tests received so far, with their errors
    pub fn failures(&self) -> Vec<(String, TestError)> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Sink for RecordingSink {
    fn assertion_failed(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }

    fn test_failed(&self, test: &str, error: &TestError) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((test.to_string(), error.clone()));
    }
}
