//! Error types for test bodies and fixture hooks

use thiserror::Error;

/// Failure raised while a test body executes.
///
/// Every variant is absorbed by the test-case boundary and counted as one
/// failed test. Set-up and tear-down reuse the type, but there it escapes
/// wrapped in a [`RunError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// Raised by the assertion primitive.
    #[error("assertion failed: {message}")]
    Assertion { message: String },

    /// Any other error returned by fixture code.
    #[error("{0}")]
    Fault(String),

    /// The body panicked; carries the panic payload when it was a string.
    #[error("test panicked: {0}")]
    Panic(String),

    /// The test name has no entry in the fixture's method table.
    #[error("no test method named '{0}'")]
    UnknownMethod(String),
}

impl TestError {
    /// Build a [`TestError::Fault`] from anything printable.
    pub fn fault(msg: impl Into<String>) -> Self {
        TestError::Fault(msg.into())
    }

    /// True for failures produced by the assertion primitive.
    pub fn is_assertion(&self) -> bool {
        matches!(self, TestError::Assertion { .. })
    }
}

/// Fixture fault that escapes [`TestCase::run`](crate::TestCase::run).
///
/// A suite stops at the first one of these; members after the faulting
/// test do not run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("set up failed for '{test}': {source}")]
    SetUp {
        test: String,
        #[source]
        source: TestError,
    },

    #[error("tear down failed for '{test}': {source}")]
    TearDown {
        test: String,
        #[source]
        source: TestError,
    },
}

impl RunError {
    /// Name of the test whose fixture hook failed.
    pub fn test(&self) -> &str {
        match self {
            RunError::SetUp { test, .. } | RunError::TearDown { test, .. } => test,
        }
    }
}

/// Lets a test body run other tests and propagate their fixture faults
/// with `?`.
impl From<RunError> for TestError {
    fn from(err: RunError) -> Self {
        TestError::Fault(err.to_string())
    }
}
