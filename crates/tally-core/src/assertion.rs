//! Assertion primitive
//!
//! Test bodies return `Result<(), TestError>` and fail with `?`:
//!
//! ```
//! # use tally_core::{assert, SilentSink, TestError};
//! fn body() -> Result<(), TestError> {
//!     assert(&SilentSink, 1 + 1 == 2, "arithmetic")?;
//!     assert(&SilentSink, false, "stops here")?;
//!     unreachable!()
//! }
//! assert!(body().unwrap_err().is_assertion());
//! ```
//!
//! Only boolean and equality checks are provided.

use crate::error::TestError;
use crate::sink::Sink;
use std::fmt::Display;

/// Fail the current test unless `condition` holds.
///
/// On failure `message` goes to `sink` first, then comes back inside
/// [`TestError::Assertion`] for the caller to propagate.
pub fn assert(sink: &dyn Sink, condition: bool, message: &str) -> Result<(), TestError> {
    if condition {
        return Ok(());
    }

    sink.assertion_failed(message);
    Err(TestError::Assertion {
        message: message.to_string(),
    })
}

/// Fail the current test unless `expected == actual`.
///
/// The diagnostic reads `{name}: expect "{expected}", result: "{actual}"`.
pub fn assert_equal<T>(
    sink: &dyn Sink,
    name: &str,
    expected: &T,
    actual: &T,
) -> Result<(), TestError>
where
    T: PartialEq + Display + ?Sized,
{
    if expected == actual {
        return Ok(());
    }

    let message = format!(
        "{}: expect \"{}\", result: \"{}\"",
        name, expected, actual
    );
    assert(sink, false, &message)
}

/// Assertion handle given to every test body.
///
/// Carries the running test's name (used in equality diagnostics) and the
/// sink the run was started with.
#[derive(Clone, Copy)]
pub struct Check<'a> {
    name: &'a str,
    sink: &'a dyn Sink,
}

impl<'a> Check<'a> {
    pub fn new(name: &'a str, sink: &'a dyn Sink) -> Self {
        Self { name, sink }
    }

    /// Name of the running test
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// See [`assert`]
    pub fn that(&self, condition: bool, message: &str) -> Result<(), TestError> {
        assert(self.sink, condition, message)
    }

    /// See [`assert_equal`]; the test name prefixes the diagnostic.
    pub fn equal<T>(&self, expected: &T, actual: &T) -> Result<(), TestError>
    where
        T: PartialEq + Display + ?Sized,
    {
        assert_equal(self.sink, self.name, expected, actual)
    }
}
