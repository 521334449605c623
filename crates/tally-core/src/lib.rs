//! Tally core - xUnit-style test execution
//!
//! The engine is three pieces that share one run protocol:
//!
//! - [`TestResult`] counts started and failed tests and renders the summary
//!   (`"2 run, 1 failed"`).
//! - [`TestCase`] pairs a test name with a [`Fixture`] and runs
//!   start → set up → body → tear down against a shared result.
//! - [`TestSuite`] runs an ordered list of [`Test`]s (cases or nested suites)
//!   against the same result.
//!
//! Test bodies fail through the assertion primitive ([`assert`], or the
//! [`Check`] handle passed to every body). Failures are contained at the
//! test-case boundary and counted; only set-up and tear-down faults escape
//! as [`RunError`].
//!
//! # Example
//!
//! ```
//! use tally_core::{Check, Fixture, Methods, TestCase, TestError, TestResult, TestSuite, TracingSink};
//!
//! #[derive(Default)]
//! struct Arithmetic;
//!
//! impl Arithmetic {
//!     fn test_add(&mut self, check: &Check) -> Result<(), TestError> {
//!         check.equal(&4, &(2 + 2))
//!     }
//! }
//!
//! impl Fixture for Arithmetic {
//!     fn methods() -> Methods<Self> {
//!         Methods::new().with("testAdd", Self::test_add)
//!     }
//! }
//!
//! let mut suite = TestSuite::new("math");
//! suite.add(TestCase::<Arithmetic>::named("testAdd"));
//!
//! let result = TestResult::new();
//! suite.run(&result, &TracingSink).unwrap();
//! assert_eq!(result.summary(), "1 run, 0 failed");
//! ```

pub mod assertion;
pub mod case;
pub mod error;
pub mod result;
pub mod sink;
pub mod suite;

pub use assertion::{assert, assert_equal, Check};
pub use case::{Fixture, Method, Methods, Phase, TestCase};
pub use error::{RunError, TestError};
pub use result::{Summary, TestResult};
pub use sink::{RecordingSink, SilentSink, Sink, TracingSink};
pub use suite::{Test, TestSuite};
