//! Import command
//!
//! Converts a YAML playbook into a canonical playbook.

use super::{read_input, CommandContext};
use ansible_builder::normalize::NormalizeOptions;
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Arguments for the import command
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Playbook file to import
    #[arg(required = true)]
    pub file: PathBuf,

    /// Directory imports are resolved against and confined to
    /// (defaults to the playbook's directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Drop task attributes (`when`, `loop`, ...) from the result
    #[arg(long)]
    pub basic: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let text = match read_input(ctx, &self.file) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        let base_dir = self.base_dir.clone().unwrap_or_else(|| {
            self.file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf()
        });

        let importer = if self.basic {
            ctx.importer
                .clone()
                .with_normalize_options(NormalizeOptions::basic())
        } else {
            ctx.importer.clone()
        };

        ctx.output
            .info(&format!("Resolving imports under {}", base_dir.display()));

        let (playbook, issues) = match importer.import_yaml_with_issues(&text, &base_dir) {
            Ok(result) => result,
            Err(e) => return Ok(ctx.fail(&e)),
        };

        for issue in &issues {
            ctx.output
                .warning(&format!("import '{}' skipped: {}", issue.path(), issue));
        }

        ctx.output.playbook(&playbook)?;
        Ok(0)
    }
}
