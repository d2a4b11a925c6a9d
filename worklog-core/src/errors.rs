use std::io;

use thiserror::Error;

/// Result type used across the worklog crates.
pub type Result<T> = std::result::Result<T, WorklogError>;

/// Canonical error representation shared by the service.
#[derive(Debug, Error)]
pub enum WorklogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Database(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    General(String),
}

impl From<sqlx::Error> for WorklogError {
    fn from(err: sqlx::Error) -> Self {
        WorklogError::Database(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable not set: {0}")]
    MissingEnvVar(String),

    #[error("one of DB_USER or DB_IAM_USER must be defined")]
    MissingDatabaseUser,

    #[error("invalid value for environment variable {key}: {value}")]
    InvalidEnvVar { key: &'static str, value: String },
}

impl From<ConfigError> for WorklogError {
    fn from(value: ConfigError) -> Self {
        WorklogError::Config(value.to_string())
    }
}
