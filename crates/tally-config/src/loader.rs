//! Configuration Loader
//!
//! Finds `tally.toml` and merges it with environment variables.

use crate::project::{ProjectConfig, ReportFormat};
use crate::ConfigResult;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "tally.toml";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Built-in defaults
/// 2. Project config (tally.toml)
/// 3. Environment variables (TALLY_*, NO_COLOR)
/// 4. CLI flags - handled by caller
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip environment overrides (used by tests)
    ignore_env: bool,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration with env overrides applied
    pub project: ProjectConfig,

    /// Directory containing the tally.toml that was loaded
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Do not read `TALLY_*` variables
    pub fn without_env(mut self) -> Self {
        self.ignore_env = true;
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find tally.toml. No file anywhere up
    /// the tree means defaults.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            project_root,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project = ProjectConfig::load_from_file(config_path)?;
        let project = self.apply_env_overrides(project)?;

        Ok(Config {
            project,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// - TALLY_FORMAT=text|json
    /// - TALLY_VERBOSE=true|1|yes
    /// - TALLY_FILTER=<substring>
    /// - TALLY_NO_COLOR or NO_COLOR (any value) disables color
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if self.ignore_env {
            return Ok(config);
        }

        if let Ok(format) = env::var("TALLY_FORMAT") {
            config.report_mut().format = Some(format.parse::<ReportFormat>()?);
        }

        if let Ok(verbose) = env::var("TALLY_VERBOSE") {
            config.report_mut().verbose = Some(parse_bool(&verbose));
        }

        if env::var_os("TALLY_NO_COLOR").is_some() || env::var_os("NO_COLOR").is_some() {
            config.report_mut().color = Some(false);
        }

        if let Ok(filter) = env::var("TALLY_FILTER") {
            if !filter.is_empty() {
                config.run_mut().filter = Some(filter);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    /// Effective output format (default: text)
    pub fn format(&self) -> ReportFormat {
        self.project.format().unwrap_or_default()
    }

    /// Effective verbosity (default: false)
    pub fn verbose(&self) -> bool {
        self.project.verbose().unwrap_or(false)
    }

    /// Effective color setting (default: true)
    pub fn color(&self) -> bool {
        self.project.color().unwrap_or(true)
    }

    /// Configured suites; empty means every built-in suite
    pub fn suites(&self) -> &[String] {
        self.project.suites()
    }

    pub fn filter(&self) -> Option<&str> {
        self.project.filter()
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a tally.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
