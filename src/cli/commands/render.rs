//! Render command
//!
//! Renders a canonical playbook (JSON) as Ansible YAML.

use super::{read_input, CommandContext};
use ansible_builder::error::Error;
use ansible_builder::playbook::CanonicalPlaybook;
use ansible_builder::render::RenderOptions;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Canonical playbook JSON file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Re-emit preserved task attributes (`when`, `loop`, ...)
    #[arg(long)]
    pub with_attributes: bool,

    /// Write the YAML to a file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let text = match read_input(ctx, &self.file) {
            Ok(text) => text,
            Err(code) => return Ok(code),
        };

        let playbook: CanonicalPlaybook = match serde_json::from_str(&text) {
            Ok(playbook) => playbook,
            Err(e) => return Ok(ctx.fail(&Error::Json(e))),
        };

        let importer = if self.with_attributes {
            ctx.importer.clone().with_render_options(RenderOptions {
                include_task_attributes: true,
            })
        } else {
            ctx.importer.clone()
        };

        let yaml = match importer.render(&playbook) {
            Ok(yaml) => yaml,
            Err(e) => return Ok(ctx.fail(&e)),
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, &yaml)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                ctx.output.success(&format!(
                    "Rendered {} tasks to {}",
                    playbook.task_count(),
                    path.display()
                ));
            }
            None => print!("{yaml}"),
        }

        Ok(0)
    }
}
