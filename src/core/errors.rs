//! Error types for the meimei-rs library.
//!
//! All "no result" situations in the scoring pipeline (unknown religion,
//! empty candidate pool, every combination vetoed) are data outcomes, not
//! errors. The variants here cover construction-time failures only:
//! malformed catalog entries, invalid rule sets, bad configuration, and
//! I/O or deserialization problems while loading them.

use std::io;

use thiserror::Error;

/// Main result type for meimei operations.
pub type Result<T> = std::result::Result<T, MeimeiError>;

/// Error type for all meimei operations.
#[derive(Error, Debug)]
pub enum MeimeiError {
    /// I/O related errors (reading catalog or rule files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Data validation errors (out-of-range scores, empty inputs)
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
    },

    /// Catalog construction errors tied to a specific glyph
    #[error("Catalog error for '{glyph}': {message}")]
    Catalog {
        /// Glyph whose entry failed validation
        glyph: char,
        /// Error description
        message: String,
    },

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeimeiError {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error for a specific field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a catalog error for a specific glyph
    pub fn catalog(glyph: char, message: impl Into<String>) -> Self {
        Self::Catalog {
            glyph,
            message: message.into(),
        }
    }
}
