//! Run command - run built-in suites and print their summaries

use crate::registry;
use crate::reporter::{ConsoleSink, Reporter};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tally_config::{Config, ConfigLoader, ReportFormat};
use tally_core::{RunError, Sink, Summary, Test, TestResult, TestSuite};
use tracing::debug;

/// Arguments for the run command
#[derive(Debug, Default)]
pub struct RunArgs {
    /// Suites to run, in order; empty means the configured or default set
    pub suites: Vec<String>,
    /// Only run tests whose name contains this
    pub filter: Option<String>,
    /// Emit JSON lines instead of text
    pub json: bool,
    /// Print suite headers and every failing test
    pub verbose: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Explicit tally.toml
    pub config: Option<PathBuf>,
    /// Where to start looking for tally.toml (defaults to current directory)
    pub dir: Option<PathBuf>,
}

/// Run the selected suites, each against its own fresh result.
///
/// Returns `Ok(false)` when any test failed or a fixture fault stopped a
/// suite.
pub fn run(args: RunArgs) -> Result<bool> {
    let config = load_config(&args)?;

    let format = if args.json {
        ReportFormat::Json
    } else {
        config.format()
    };
    let verbose = args.verbose || config.verbose();
    let no_color = args.no_color || !config.color();

    if no_color {
        colored::control::set_override(false);
    }

    let names = if args.suites.is_empty() {
        config.suites().to_vec()
    } else {
        args.suites.clone()
    };
    let entries = registry::select(&names)?;
    let filter = args.filter.as_deref().or(config.filter());

    let reporter = Reporter::new(format, verbose);
    let sink = ConsoleSink::new(verbose);
    let mut passed = true;

    for entry in entries {
        let mut suite = entry.build();
        if let Some(pattern) = filter {
            suite = suite.filter(pattern);
        }
        debug!(suite = entry.name, filter = ?filter, "suite selected");

        if !run_suite(entry.name, &mut suite, &reporter, &sink).passed() {
            passed = false;
        }
    }

    if no_color {
        colored::control::unset_override();
    }

    Ok(passed)
}

/// How one suite's run ended
#[derive(Debug)]
struct SuiteOutcome {
    summary: Summary,
    fault: Option<RunError>,
}

impl SuiteOutcome {
    fn passed(&self) -> bool {
        self.fault.is_none() && self.summary.failed == 0
    }
}

/// Run `suite` against a fresh result and print its summary.
///
/// A fixture fault stops the suite; the partial summary is still reported.
fn run_suite(
    name: &str,
    suite: &mut TestSuite,
    reporter: &Reporter,
    sink: &dyn Sink,
) -> SuiteOutcome {
    reporter.suite_started(name, suite.count_test_cases());

    let result = TestResult::new();
    let fault = suite.run(&result, sink).err();
    let summary = result.snapshot();

    match &fault {
        None => reporter.suite_finished(name, summary),
        Some(err) => reporter.suite_aborted(name, summary, err),
    }
    SuiteOutcome { summary, fault }
}

fn load_config(args: &RunArgs) -> Result<Config> {
    let loader = ConfigLoader::new();
    match &args.config {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => {
            let dir = match &args.dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            loader
                .load_from_directory(&dir)
                .context("failed to load tally.toml")
        }
    }
}
