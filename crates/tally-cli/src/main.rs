use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod fixtures;
mod registry;
mod reporter;

/// Tally - a minimal xUnit-style test runner.
///
/// Runs the built-in suites, each against a fresh result, and prints one
/// `N run, M failed` summary per suite.
///
/// EXAMPLES:
///     tally run                    Run every suite
///     tally run self               Run the framework's own tests
///     tally run --filter Result    Only tests whose name contains 'Result'
///     tally list                   Show suites and their tests
///
/// ENVIRONMENT VARIABLES:
///     TALLY_FORMAT      'text' or 'json'
///     TALLY_VERBOSE     Set to '1' for per-test failure lines
///     TALLY_FILTER      Default test name filter
///     NO_COLOR          Set to disable colored output
///     RUST_LOG          Log filter for diagnostics on stderr (default: error)
#[derive(Parser)]
#[command(name = "tally")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run test suites
    ///
    /// Each suite runs against its own result. Exits with status 1 if any
    /// test failed or a fixture could not be set up.
    ///
    /// EXAMPLES:
    ///     tally run                 Run all suites
    ///     tally run db self         Run suites in the given order
    ///     tally run --json          One JSON object per suite
    #[command(visible_alias = "r")]
    Run {
        /// Suites to run (default: all, or [run].suites from tally.toml)
        suites: Vec<String>,
        /// Only run tests whose name contains this pattern
        #[arg(long, short = 'f', value_parser = NonEmptyStringValueParser::new())]
        filter: Option<String>,
        /// Output summaries as JSON
        #[arg(long)]
        json: bool,
        /// Print suite headers and each failing test
        #[arg(long, short = 'v')]
        verbose: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Path to tally.toml (default: search upward from the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// List suites and the tests they contain
    #[command(visible_alias = "ls")]
    List {
        /// Suites to list (default: all)
        suites: Vec<String>,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     tally completions bash > ~/.local/share/bash-completion/completions/tally
    ///     tally completions zsh > ~/.zfunc/_tally
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only summaries
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            suites,
            filter,
            json,
            verbose,
            no_color,
            config,
        } => {
            let args = commands::run::RunArgs {
                suites,
                filter,
                json,
                verbose,
                no_color,
                config,
                dir: None,
            };
            if !commands::run::run(args)? {
                std::process::exit(1);
            }
        }
        Commands::List { suites } => {
            commands::list::run(&suites)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
