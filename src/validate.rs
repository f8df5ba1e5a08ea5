//! Playbook validation reports.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::importer::PlaybookImporter;

/// Result of validating a YAML playbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the text imports cleanly
    pub valid: bool,

    /// Summary for a valid document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Problem description for an invalid document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// 1-based line of a syntax error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// 1-based column of a syntax error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Number of canonical tasks found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_count: Option<usize>,
}

impl ValidationReport {
    /// A passing report.
    pub fn valid(tasks_count: usize) -> Self {
        Self {
            valid: true,
            message: Some(format!("YAML is valid. Found {tasks_count} tasks.")),
            error: None,
            line: None,
            column: None,
            tasks_count: Some(tasks_count),
        }
    }

    /// A failing report describing `error`.
    pub fn invalid(error: &Error) -> Self {
        let (line, column) = match error.position() {
            Some((line, column)) => (Some(line), column),
            None => (None, None),
        };

        Self {
            valid: false,
            message: None,
            error: Some(error.to_string()),
            line,
            column,
            tasks_count: None,
        }
    }
}

/// Check whether `text` imports as a playbook.
///
/// Any failure is reported in the returned value; only validation kinds are
/// expected here, but IO failures from imports are reported the same way.
pub fn validate_yaml(importer: &PlaybookImporter, text: &str) -> ValidationReport {
    match importer.import_yaml(text) {
        Ok(playbook) => ValidationReport::valid(playbook.task_count()),
        Err(e) => ValidationReport::invalid(&e),
    }
}
