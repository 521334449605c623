//! Project Configuration (tally.toml)

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Project configuration from tally.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    /// Suite selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,
}

/// How summaries are printed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output format (default: text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,

    /// Print each failing test and the suite headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Colorize diagnostics (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Which suites run, and which of their tests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Suite names, in run order (default: every built-in suite)
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suites: Vec<String>,

    /// Substring a test name must contain to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Summary output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One `N run, M failed` line per suite
    #[default]
    Text,
    /// One JSON object per suite
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: "report.format".to_string(),
                reason: format!("unknown format '{}' (expected 'text' or 'json')", other),
            }),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(run) = &self.run {
            if let Some(name) = run.suites.iter().find(|s| s.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field: "run.suites".to_string(),
                    reason: format!("suite name '{}' is empty", name),
                });
            }

            if run.filter.as_deref() == Some("") {
                return Err(ConfigError::InvalidValue {
                    field: "run.filter".to_string(),
                    reason: "filter cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn format(&self) -> Option<ReportFormat> {
        self.report.as_ref().and_then(|r| r.format)
    }

    pub fn verbose(&self) -> Option<bool> {
        self.report.as_ref().and_then(|r| r.verbose)
    }

    pub fn color(&self) -> Option<bool> {
        self.report.as_ref().and_then(|r| r.color)
    }

    pub fn suites(&self) -> &[String] {
        self.run.as_ref().map(|r| r.suites.as_slice()).unwrap_or(&[])
    }

    pub fn filter(&self) -> Option<&str> {
        self.run.as_ref().and_then(|r| r.filter.as_deref())
    }

    /// Mutable report section, created on first use
    pub fn report_mut(&mut self) -> &mut ReportConfig {
        self.report.get_or_insert_with(ReportConfig::default)
    }

    /// Mutable run section, created on first use
    pub fn run_mut(&mut self) -> &mut RunConfig {
        self.run.get_or_insert_with(RunConfig::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_project_config() {
        let toml = r#"
[report]
format = "json"
verbose = true
color = false

[run]
suites = ["self", "db"]
filter = "Result"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.format(), Some(ReportFormat::Json));
        assert_eq!(config.verbose(), Some(true));
        assert_eq!(config.color(), Some(false));
        assert_eq!(config.suites(), ["self".to_string(), "db".to_string()]);
        assert_eq!(config.filter(), Some("Result"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert!(config.suites().is_empty());
        assert_eq!(config.format(), None);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let toml = r#"
[report]
format = "xml"
"#;
        assert!(toml::from_str::<ProjectConfig>(toml).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
[run]
parallel = true
"#;
        assert!(toml::from_str::<ProjectConfig>(toml).is_err());
    }

    #[test]
    fn test_validate_empty_filter() {
        let mut config = ProjectConfig::default();
        config.run_mut().filter = Some(String::new());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("run.filter"));
    }

    #[test]
    fn test_validate_blank_suite_name() {
        let mut config = ProjectConfig::default();
        config.run_mut().suites = vec!["self".to_string(), " ".to_string()];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("yaml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }
}
