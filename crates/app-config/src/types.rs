// In crates/app-config/src/types.rs

use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// How statistics reports are rendered.
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReportSettings {
    #[serde(default)]
    pub format: ReportFormat,
    /// Indent JSON output.
    #[serde(default)]
    pub pretty_json: bool,
}

/// Output format of the `report` command.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text block.
    #[default]
    Summary,
    /// The full report as JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(ReportFormat::Summary),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
