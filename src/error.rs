//! Error types and handling for the catalog client

use thiserror::Error;

/// Main error type for the catalog client
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures (DNS, connect, timeout, body read)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Endpoint answered with a non-2xx status
    #[error("API error: {endpoint} returned HTTP {status}")]
    Status { status: u16, endpoint: String },

    /// Response body was not a JSON array
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A single record lacked a required field
    #[error("Malformed {kind} record: {reason}")]
    MalformedRecord { kind: &'static str, reason: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl CatalogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn status<S: Into<String>>(status: u16, endpoint: S) -> Self {
        Self::Status {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(kind: &'static str, reason: S) -> Self {
        Self::MalformedRecord {
            kind,
            reason: reason.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// True for errors raised while fetching a whole collection
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Network { .. } | CatalogError::Status { .. } | CatalogError::Parse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            CatalogError::Network { .. } => {
                "Unable to reach the catalog service. Please check your internet connection."
                    .to_string()
            }
            CatalogError::Status { status, .. } => {
                format!("The catalog service is unavailable right now (HTTP {status}).")
            }
            CatalogError::Parse { .. } => {
                "The catalog service sent data that could not be read.".to_string()
            }
            CatalogError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CatalogError::MalformedRecord { kind, .. } => {
                format!("An incomplete {kind} entry was skipped.")
            }
            CatalogError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CatalogError::General { message } => message.clone(),
        }
    }
}
