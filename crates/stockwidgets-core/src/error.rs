use thiserror::Error;

/// Validation errors raised when constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Configuration errors raised while reading environment overrides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} cannot be empty")]
    EmptyValue { name: &'static str },
}
