//! Test cases and the run protocol

use crate::assertion::Check;
use crate::error::{RunError, TestError};
use crate::result::TestResult;
use crate::sink::Sink;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// A test body: mutable access to the fixture plus an assertion handle.
pub type Method<F> = fn(&mut F, &Check<'_>) -> Result<(), TestError>;

/// Name → body table for one fixture type.
///
/// Built once per fixture with [`Methods::with`]; test cases resolve their
/// name against it when they are constructed.
pub struct Methods<F> {
    entries: Vec<(&'static str, Method<F>)>,
}

impl<F> Methods<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `method` under `name`. A later entry with the same name
    /// shadows an earlier one.
    pub fn with(mut self, name: &'static str, method: Method<F>) -> Self {
        self.entries.push((name, method));
        self
    }

    /// Look up a method by name
    pub fn get(&self, name: &str) -> Option<Method<F>> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| *entry == name)
            .map(|(_, method)| *method)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for Methods<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capabilities a test fixture provides.
///
/// `set_up` and `tear_down` default to no-ops; override what you need.
pub trait Fixture: Sized {
    /// Prepare fixture state before the body runs.
    fn set_up(&mut self) -> Result<(), TestError> {
        Ok(())
    }

    /// Release fixture state. Runs even when the body failed.
    fn tear_down(&mut self) -> Result<(), TestError> {
        Ok(())
    }

    /// The fixture's test bodies, addressable by name.
    fn methods() -> Methods<Self>;
}

/// Where a [`TestCase`] is in its run protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    SetUp,
    Executing,
    TornDown,
    Reported,
}

/// One named test bound to a fixture instance.
pub struct TestCase<F> {
    name: String,
    fixture: F,
    method: Option<Method<F>>,
    phase: Phase,
}

impl<F: Fixture> TestCase<F> {
    /// Bind `name` to `fixture`, resolving the body from
    /// [`Fixture::methods`].
    ///
    /// An unknown name is not an error here; running the case records a
    /// failed test.
    pub fn new(name: impl Into<String>, fixture: F) -> Self {
        let name = name.into();
        let method = F::methods().get(&name);
        Self {
            name,
            fixture,
            method,
            phase: Phase::Created,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixture, including whatever state the last run left behind
    pub fn fixture(&self) -> &F {
        &self.fixture
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the protocol: start, set up, body, tear down.
    ///
    /// Body failures (assertion errors, other errors, panics, unknown
    /// names) are counted in `result` and never returned. A set-up error
    /// is returned before the body or tear-down run; a tear-down error is
    /// returned after the counters are updated.
    pub fn run(&mut self, result: &TestResult, sink: &dyn Sink) -> Result<(), RunError> {
        result.test_started();
        debug!(test = %self.name, "test started");

        self.phase = Phase::SetUp;
        if let Err(source) = self.fixture.set_up() {
            error!(test = %self.name, error = %source, "set up failed");
            return Err(RunError::SetUp {
                test: self.name.clone(),
                source,
            });
        }

        self.phase = Phase::Executing;
        if let Err(err) = self.invoke(sink) {
            debug!(test = %self.name, error = %err, "test failed");
            sink.test_failed(&self.name, &err);
            result.test_failed();
        }

        self.phase = Phase::TornDown;
        if let Err(source) = self.fixture.tear_down() {
            error!(test = %self.name, error = %source, "tear down failed");
            return Err(RunError::TearDown {
                test: self.name.clone(),
                source,
            });
        }

        self.phase = Phase::Reported;
        debug!(test = %self.name, "test finished");
        Ok(())
    }

    fn invoke(&mut self, sink: &dyn Sink) -> Result<(), TestError> {
        let method = self
            .method
            .ok_or_else(|| TestError::UnknownMethod(self.name.clone()))?;

        let check = Check::new(&self.name, sink);
        let fixture = &mut self.fixture;
        match panic::catch_unwind(AssertUnwindSafe(|| method(fixture, &check))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(TestError::Panic(panic_message(payload.as_ref()))),
        }
    }
}

impl<F: Fixture + Default> TestCase<F> {
    /// Bind `name` to a default-constructed fixture.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, F::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SilentSink, TracingSink};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts `warn`-level events
    #[derive(Clone, Default)]
    struct WarnCount(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCount {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[derive(Default)]
    struct Probe {
        log: String,
        fail_set_up: bool,
        fail_tear_down: bool,
    }

    impl Probe {
        fn test_pass(&mut self, _check: &Check) -> Result<(), TestError> {
            self.log.push_str("body ");
            Ok(())
        }

        fn test_assert(&mut self, check: &Check) -> Result<(), TestError> {
            check.that(false, "probe assertion")?;
            self.log.push_str("unreachable ");
            Ok(())
        }

        fn test_fault(&mut self, _check: &Check) -> Result<(), TestError> {
            Err(TestError::fault("probe fault"))
        }

        fn test_panic(&mut self, _check: &Check) -> Result<(), TestError> {
            panic!("probe panic");
        }
    }

    impl Fixture for Probe {
        fn set_up(&mut self) -> Result<(), TestError> {
            if self.fail_set_up {
                return Err(TestError::fault("no resource"));
            }
            self.log = "setUp ".to_string();
            Ok(())
        }

        fn tear_down(&mut self) -> Result<(), TestError> {
            self.log.push_str("tearDown ");
            if self.fail_tear_down {
                return Err(TestError::fault("leaked resource"));
            }
            Ok(())
        }

        fn methods() -> Methods<Self> {
            Methods::new()
                .with("testPass", Self::test_pass)
                .with("testAssert", Self::test_assert)
                .with("testFault", Self::test_fault)
                .with("testPanic", Self::test_panic)
        }
    }

    #[test]
    fn test_passing_case_runs_protocol_in_order() {
        let result = TestResult::new();
        let mut case = TestCase::<Probe>::named("testPass");
        assert_eq!(case.phase(), Phase::Created);

        case.run(&result, &SilentSink).unwrap();

        assert_eq!(case.fixture().log, "setUp body tearDown ");
        assert_eq!(case.phase(), Phase::Reported);
        assert_eq!(result.summary(), "1 run, 0 failed");
    }

    #[rstest]
    #[case::assertion("testAssert")]
    #[case::fault("testFault")]
    #[case::panic("testPanic")]
    #[case::unknown("testMissing")]
    fn test_failing_body_is_counted_and_torn_down(#[case] name: &str) {
        let result = TestResult::new();
        let mut case = TestCase::<Probe>::named(name);

        case.run(&result, &SilentSink).unwrap();

        assert_eq!(case.fixture().log, "setUp tearDown ");
        assert_eq!(result.summary(), "1 run, 1 failed");
    }

    #[test]
    fn test_failure_reaches_sink() {
        let result = TestResult::new();
        let sink = RecordingSink::new();
        let mut case = TestCase::<Probe>::named("testAssert");

        case.run(&result, &sink).unwrap();

        assert_eq!(sink.messages(), vec!["probe assertion"]);
        assert_eq!(
            sink.failures(),
            vec![(
                "testAssert".to_string(),
                TestError::Assertion {
                    message: "probe assertion".to_string()
                }
            )]
        );
    }

    #[test]
    fn test_failed_test_warns_once_with_tracing_sink() {
        let warnings = WarnCount::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let result = TestResult::new();
        let mut case = TestCase::<Probe>::named("testFault");

        tracing::subscriber::with_default(subscriber, || case.run(&result, &TracingSink))
            .unwrap();

        assert_eq!(warnings.0.load(Ordering::SeqCst), 1);
        assert_eq!(result.summary(), "1 run, 1 failed");
    }

    #[test]
    fn test_panic_payload_is_kept() {
        let result = TestResult::new();
        let sink = RecordingSink::new();
        let mut case = TestCase::<Probe>::named("testPanic");

        case.run(&result, &sink).unwrap();

        assert_eq!(
            sink.failures()[0].1,
            TestError::Panic("probe panic".to_string())
        );
    }

    #[test]
    fn test_set_up_failure_escapes() {
        let result = TestResult::new();
        let fixture = Probe {
            fail_set_up: true,
            ..Default::default()
        };
        let mut case = TestCase::new("testPass", fixture);

        let err = case.run(&result, &SilentSink).unwrap_err();

        assert_eq!(
            err,
            RunError::SetUp {
                test: "testPass".to_string(),
                source: TestError::fault("no resource"),
            }
        );
        // Started but never torn down, never counted as failed.
        assert_eq!(case.fixture().log, "");
        assert_eq!(case.phase(), Phase::SetUp);
        assert_eq!(result.summary(), "1 run, 0 failed");
    }

    #[test]
    fn test_tear_down_failure_escapes_after_counting() {
        let result = TestResult::new();
        let fixture = Probe {
            fail_tear_down: true,
            ..Default::default()
        };
        let mut case = TestCase::new("testFault", fixture);

        let err = case.run(&result, &SilentSink).unwrap_err();

        assert!(matches!(err, RunError::TearDown { .. }));
        assert_eq!(result.summary(), "1 run, 1 failed");
    }

    #[test]
    fn test_rerun_resets_fixture_through_set_up() {
        let result = TestResult::new();
        let mut case = TestCase::<Probe>::named("testPass");

        case.run(&result, &SilentSink).unwrap();
        case.run(&result, &SilentSink).unwrap();

        assert_eq!(case.fixture().log, "setUp body tearDown ");
        assert_eq!(result.summary(), "2 run, 0 failed");
    }

    #[test]
    fn test_methods_lookup() {
        let methods = Probe::methods();
        assert_eq!(methods.len(), 4);
        assert!(methods.get("testPass").is_some());
        assert!(methods.get("testMissing").is_none());
        assert_eq!(
            methods.names().collect::<Vec<_>>(),
            vec!["testPass", "testAssert", "testFault", "testPanic"]
        );
    }
}
