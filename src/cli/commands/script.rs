//! Script command
//!
//! Splits a shell script into a canonical playbook.

use super::{read_input, CommandContext};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the script command
#[derive(Parser, Debug, Clone)]
pub struct ScriptArgs {
    /// Shell script to convert
    #[arg(required = true)]
    pub file: PathBuf,

    /// Playbook name (generated when omitted)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl ScriptArgs {
    /// Execute the script command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let text = match read_input(ctx, &self.file) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        match ctx.importer.import_script(self.name.as_deref(), &text) {
            Ok(playbook) => {
                ctx.output.playbook(&playbook)?;
                Ok(0)
            }
            Err(e) => Ok(ctx.fail(&e)),
        }
    }
}
