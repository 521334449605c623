//! Test result accounting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every test run during one reporting session.
///
/// The counters only ever grow. Running the same suite twice against one
/// result doubles both counts; use a fresh `TestResult` to start over.
/// Increments are atomic, so a `&TestResult` may be shared across threads.
#[derive(Debug, Default)]
pub struct TestResult {
    run_count: AtomicUsize,
    error_count: AtomicUsize,
}

impl TestResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a test has started
    pub fn test_started(&self) {
        self.run_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Record that a started test has failed
    pub fn test_failed(&self) {
        self.error_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of tests started
    pub fn run_count(&self) -> usize {
        self.run_count.load(Ordering::SeqCst)
    }

    /// Number of tests failed
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::SeqCst)
    }

    /// Check whether any test has failed
    pub fn has_failures(&self) -> bool {
        self.error_count() > 0
    }

    /// Read both counters into a plain value.
    pub fn snapshot(&self) -> Summary {
        // A test is started before it can fail, so loading failures first
        // keeps `failed <= run` in the snapshot.
        let failed = self.error_count();
        let run = self.run_count();
        Summary { run, failed }
    }

    /// Render `"<run> run, <failed> failed"`.
    pub fn summary(&self) -> String {
        self.snapshot().to_string()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot().fmt(f)
    }
}

/// Point-in-time copy of a [`TestResult`]'s counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Tests started
    pub run: usize,
    /// Tests failed
    pub failed: usize,
}

impl Summary {
    /// Number of started tests that did not fail
    pub fn passed(&self) -> usize {
        self.run.saturating_sub(self.failed)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} run, {} failed", self.run, self.failed)
    }
}
