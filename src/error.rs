//! Error types for sql-pagination
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for sql-pagination
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid pagination parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Pagination was invoked outside of a request context")]
    NoRequestContext,

    #[error("Pagination is disabled for '{resource}' ({operation})")]
    PaginationDisabled { resource: String, operation: String },

    // ============================================================================
    // SQL Errors
    // ============================================================================
    #[error("Not a countable SELECT statement: {message}")]
    NotASelectStatement { message: String },

    #[error("Failed to parse SQL: {0}")]
    SqlParse(#[from] sqlparser::parser::ParserError),

    #[error("Invalid count result: {message}")]
    InvalidCountResult { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Execution Errors
    // ============================================================================
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("Query execution failed: {message}")]
    Execution { message: String },

    #[error("Failed to map rows for '{resource}': {message}")]
    Mapping { resource: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a not-a-select error
    pub fn not_a_select(message: impl Into<String>) -> Self {
        Self::NotASelectStatement {
            message: message.into(),
        }
    }

    /// Create an invalid count result error
    pub fn invalid_count(message: impl Into<String>) -> Self {
        Self::InvalidCountResult {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Create a mapping error
    pub fn mapping(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by client input (maps to a 4xx response)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }
}

/// Result type alias for sql-pagination
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
