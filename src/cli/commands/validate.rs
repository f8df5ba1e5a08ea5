//! Validate command
//!
//! Checks whether a YAML playbook imports cleanly.

use super::{read_input, CommandContext};
use ansible_builder::validate::validate_yaml;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Exit code for an invalid playbook.
const INVALID_EXIT_CODE: i32 = 4;

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Playbook file to validate
    #[arg(required = true)]
    pub file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let text = match read_input(ctx, &self.file) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        let base_dir = self
            .file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| ctx.importer.base_dir().to_path_buf(), PathBuf::from);
        let importer = ctx.importer.clone().with_base_dir(base_dir);

        let report = validate_yaml(&importer, &text);

        if ctx.output.is_structured() {
            ctx.output.emit(&report)?;
        } else if report.valid {
            ctx.output.success(&format!(
                "{}: {}",
                self.file.display(),
                report.message.as_deref().unwrap_or("valid")
            ));
        } else {
            let location = match (report.line, report.column) {
                (Some(line), Some(column)) => format!(":{line}:{column}"),
                (Some(line), None) => format!(":{line}"),
                _ => String::new(),
            };
            ctx.output.error(&format!(
                "{}{}: {}",
                self.file.display(),
                location,
                report.error.as_deref().unwrap_or("invalid playbook")
            ));
        }

        Ok(if report.valid { 0 } else { INVALID_EXIT_CODE })
    }
}
