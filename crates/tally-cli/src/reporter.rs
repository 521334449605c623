//! Console output for suite runs

use colored::*;
use serde::Serialize;
use tally_config::ReportFormat;
use tally_core::{RunError, Sink, Summary, TestError};

/// Prints assertion diagnostics to stderr as they happen.
pub struct ConsoleSink {
    /// Also print a line for every failed test
    verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Sink for ConsoleSink {
    fn assertion_failed(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn test_failed(&self, test: &str, error: &TestError) {
        if self.verbose {
            eprintln!(
                "{} {}: {}",
                "FAIL".red().bold(),
                test,
                error.to_string().as_str().dimmed()
            );
        }
    }
}

/// One suite's outcome as emitted in JSON mode
#[derive(Debug, Serialize)]
struct SuiteReport<'a> {
    suite: &'a str,
    run: usize,
    failed: usize,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Writes suite headers and summaries to stdout
pub struct Reporter {
    format: ReportFormat,
    verbose: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Announce a suite (verbose text mode only)
    pub fn suite_started(&self, suite: &str, tests: usize) {
        if self.verbose && self.format == ReportFormat::Text {
            println!(
                "{} {} ({} test{})",
                "Running".bold(),
                suite.bold(),
                tests,
                if tests == 1 { "" } else { "s" }
            );
        }
    }

    /// Print the summary of a suite that ran to completion
    pub fn suite_finished(&self, suite: &str, summary: Summary) {
        println!("{}", self.render(suite, summary, None));
    }

    /// Print the summary of a suite stopped by a fixture fault
    pub fn suite_aborted(&self, suite: &str, summary: Summary, error: &RunError) {
        if self.format == ReportFormat::Text {
            eprintln!("{} {}", "error:".red().bold(), error);
        }
        println!("{}", self.render(suite, summary, Some(error)));
    }

    /// Render one summary line in the configured format
    pub fn render(&self, suite: &str, summary: Summary, error: Option<&RunError>) -> String {
        match self.format {
            ReportFormat::Text => summary.to_string(),
            ReportFormat::Json => {
                let report = SuiteReport {
                    suite,
                    run: summary.run,
                    failed: summary.failed,
                    summary: summary.to_string(),
                    error: error.map(|e| e.to_string()),
                };
                serde_json::to_string(&report)
                    .unwrap_or_else(|e| format!(r#"{{"suite":"{}","error":"{}"}}"#, suite, e))
            }
        }
    }
}
