//! Error types for ansible-builder.
//!
//! This module defines the error taxonomy shared by the normalization pipeline,
//! the CLI and the HTTP boundary. Validation kinds describe problems with the
//! caller's document and are reported back with enough detail to fix it; the
//! remaining kinds are unexpected failures.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ansible-builder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ansible-builder.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Document Errors
    // ========================================================================
    /// The YAML parser rejected the text.
    #[error("{}", yaml_syntax_message(.message, .line, .column))]
    YamlSyntax {
        /// Parser message
        message: String,
        /// 1-based line of the problem, when the parser exposes one
        line: Option<usize>,
        /// 1-based column of the problem, when the parser exposes one
        column: Option<usize>,
    },

    /// The document parsed to nothing (null or an empty list of plays).
    #[error("Empty YAML document")]
    EmptyDocument,

    /// The document is valid YAML but no task yielded a module.
    #[error("No valid tasks found in YAML")]
    NoValidTasks,

    /// The document has a shape that cannot be read as plays.
    #[error("Invalid playbook structure: {0}")]
    InvalidStructure(String),

    /// The uploaded script has no content.
    #[error("Script content is empty")]
    ScriptEmpty,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration from '{path}': {message}")]
    Config {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message
        message: String,
    },

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Emitting YAML failed.
    #[error("Failed to render YAML: {0}")]
    YamlEmit(#[source] serde_yaml::Error),

    // ========================================================================
    // Other Errors
    // ========================================================================
    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with source.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn yaml_syntax_message(message: &str, line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => {
            format!("Invalid YAML format at line {line}, column {column}: {message}")
        }
        (Some(line), None) => format!("Invalid YAML format at line {line}: {message}"),
        _ => format!("Invalid YAML format: {message}"),
    }
}

impl Error {
    /// Creates a syntax error from a parser failure, keeping its position.
    ///
    /// The parser's own `at line L column C` suffix is removed from the
    /// message since `Display` already leads with the position.
    pub fn yaml_syntax(err: &serde_yaml::Error) -> Self {
        let mut message = err.to_string();
        let location = err.location();
        if let Some(location) = &location {
            let suffix = format!(" at line {} column {}", location.line(), location.column());
            message = message.replacen(&suffix, "", 1);
        }
        Self::YamlSyntax {
            message,
            line: location.as_ref().map(serde_yaml::Location::line),
            column: location.as_ref().map(serde_yaml::Location::column),
        }
    }

    /// Creates a new configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error describes a problem with the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::YamlSyntax { .. }
                | Error::EmptyDocument
                | Error::NoValidTasks
                | Error::InvalidStructure(_)
                | Error::ScriptEmpty
        )
    }

    /// Returns the HTTP status code the boundary layer reports for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else {
            500
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            e if e.is_validation() => 4,
            Error::Config { .. } => 3,
            _ => 1,
        }
    }

    /// Returns the source position for syntax errors.
    pub fn position(&self) -> Option<(usize, Option<usize>)> {
        match self {
            Error::YamlSyntax {
                line: Some(line),
                column,
                ..
            } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Adds context with a closure that is only evaluated on error.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other {
            message: message.into(),
            source: Some(Box::new(e)),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| Error::Other {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
