// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ReportFormat, ReportSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from an optional `config/base.toml` file.
/// 2. Merges settings from an optional environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// Every setting has a default, so running without any file is fine.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        // Settings from environment variables (e.g., `APP_REPORT__FORMAT=json`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.environment, "development");
        assert_eq!(settings.app.log_level, "info");
        assert_eq!(settings.report.format, ReportFormat::Summary);
        assert!(!settings.report.pretty_json);
    }

    #[test]
    fn test_overrides_are_applied() {
        let settings = from_toml(
            r#"
            [app]
            log_level = "debug"

            [report]
            format = "json"
            pretty_json = true
            "#,
        );
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.app.environment, "development");
        assert_eq!(settings.report.format, ReportFormat::Json);
        assert!(settings.report.pretty_json);
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("summary".parse::<ReportFormat>().unwrap(), ReportFormat::Summary);
        assert!(matches!("csv".parse::<ReportFormat>(), Err(Error::UnknownFormat(_))));
    }
}
