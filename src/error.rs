//! Error types for the calculation engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors raised by calculators and primitives that validate their input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A constraint violation caught during validation
    #[error("{0}")]
    InvalidInput(String),

    /// No calculator registered under the requested name
    #[error("Calculator '{0}' not found")]
    UnknownCalculator(String),
}

impl CalcError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidInput(message.into())
    }
}

/// Errors raised while loading configuration tables from CSV
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration in {file}: {message}")]
    Invalid { file: String, message: String },
}

impl ConfigError {
    pub fn invalid(file: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            file: file.to_string(),
            message: message.into(),
        }
    }
}
