//! Error types for the fleet manager

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Generic precondition violation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Insufficient fuel. Needed: {required} liters, available: {available} liters")]
    InsufficientFuel { required: f64, available: f64 },

    #[error("Overload: {0}")]
    Overload(String),

    #[error("Duplicate vehicle ID: {0}")]
    DuplicateId(String),

    #[error("Vehicle ID not found: {0}")]
    NotFound(String),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidOperation(message.into())
    }

    pub fn overload(message: impl Into<String>) -> Self {
        Error::Overload(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_fuel_message() {
        let err = Error::InsufficientFuel {
            required: 20.0,
            available: 5.5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient fuel. Needed: 20 liters, available: 5.5 liters"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::NotFound.into();
        assert!(matches!(err, Error::Config(ConfigError::NotFound)));
    }
}
