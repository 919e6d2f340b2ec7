//! Core error types for linguist-rs.
//!
//! Lookups never fail: a missing translation falls back to the source text.
//! Errors only arise from tooling concerns such as reading, parsing, writing,
//! and validating catalogue files, and are all expressed by [`LinguistError`].

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for linguist-rs.
#[derive(Error, Debug)]
pub enum LinguistError {
    // ── IO ───────────────────────────────────────────────────────────

    /// A catalogue or settings file could not be read or written.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    // ── Catalogue format ─────────────────────────────────────────────

    /// The catalogue XML is malformed or does not follow the `.ts` schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A catalogue could not be serialized back to XML or JSON.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// No catalogue file exists for the requested language.
    #[error("No catalogue for language '{language}' in '{}'", dir.display())]
    CatalogueNotFound {
        /// The directory that was searched.
        dir: PathBuf,
        /// The requested language code.
        language: String,
    },

    /// Validation reported one or more blocking issues.
    #[error("Validation failed with {errors} error(s)")]
    Validation {
        /// The number of blocking issues.
        errors: usize,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Commands ─────────────────────────────────────────────────────

    /// A management command was invoked incorrectly.
    #[error("Command error: {0}")]
    CommandError(String),
}

impl LinguistError {
    /// Wraps an IO error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code the CLI should use for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 1,
            Self::CommandError(_) | Self::ConfigurationError(_) => 2,
            Self::Io { .. } | Self::CatalogueNotFound { .. } => 3,
            Self::Parse(_) | Self::Serialize(_) => 4,
        }
    }
}

impl From<quick_xml::Error> for LinguistError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for LinguistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// A convenience type alias for `Result<T, LinguistError>`.
pub type LinguistResult<T> = Result<T, LinguistError>;
