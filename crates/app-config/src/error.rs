// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    LoadError(#[from] config::ConfigError),

    #[error("Unknown report format '{0}' (expected 'summary' or 'json')")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
