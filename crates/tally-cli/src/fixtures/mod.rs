//! Built-in fixtures and the suites made from them

pub mod db;
pub mod was_run;

#[cfg(test)]
mod tests {
    use super::was_run::WasRun;
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_core::{RecordingSink, SilentSink, TestCase, TestResult};

    #[test]
    fn test_self_suite_passes() {
        let mut suite = test_case_test::suite();
        let result = TestResult::new();
        let sink = RecordingSink::new();

        suite.run(&result, &sink).unwrap();

        assert_eq!(suite.len(), 5);
        assert_eq!(result.summary(), "5 run, 0 failed");
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_db_suite_reports_aborted_connection() {
        let mut suite = db::suite();
        let result = TestResult::new();
        let sink = RecordingSink::new();

        suite.run(&result, &sink).unwrap();

        assert_eq!(result.summary(), "1 run, 1 failed");
        assert_eq!(
            sink.messages(),
            vec![r#"testConnection: expect "connected", result: "aborted""#]
        );
    }

    #[test]
    fn test_was_run_log() {
        let result = TestResult::new();
        let mut test = TestCase::<WasRun>::named("testMethod");
        test.run(&result, &SilentSink).unwrap();

        assert!(test.fixture().was_set_up);
        assert!(test.fixture().was_run);
        assert_eq!(test.fixture().log, "setUp testMethod tearDown ");
    }

    #[test]
    fn test_was_run_broken_method_still_tears_down() {
        let result = TestResult::new();
        let mut test = TestCase::<WasRun>::named("testBrokenMethod");
        test.run(&result, &SilentSink).unwrap();

        assert!(!test.fixture().was_run);
        assert_eq!(test.fixture().log, "setUp tearDown ");
        assert_eq!(result.summary(), "1 run, 1 failed");
    }
}
