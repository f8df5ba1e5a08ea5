//! Subcommands module for the ansible-builder CLI
//!
//! This module contains all the subcommand implementations.

pub mod import;
pub mod render;
pub mod script;
#[cfg(feature = "api")]
pub mod serve;
pub mod validate;

use crate::cli::output::OutputFormatter;
use ansible_builder::config::Config;
use ansible_builder::error::Error;
use ansible_builder::importer::PlaybookImporter;
use std::path::Path;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Import pipeline built from `config`
    pub importer: PlaybookImporter,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let output = OutputFormatter::new(!cli.no_color, cli.output, cli.verbosity());
        let importer = PlaybookImporter::new(&config);

        Self {
            config,
            output,
            importer,
        }
    }

    /// Report a pipeline error and return its exit code
    pub fn fail(&self, err: &Error) -> i32 {
        self.output.error(&err.to_string());
        err.exit_code()
    }
}

/// Read an input file, reporting failures through the context.
pub(crate) fn read_input(ctx: &CommandContext, path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        ctx.output
            .error(&format!("Failed to read '{}': {}", path.display(), e));
        Error::Io(e).exit_code()
    })
}
