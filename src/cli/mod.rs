//! CLI module for ansible-builder
//!
//! This module provides the command-line interface, including argument
//! parsing and subcommand dispatch.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ansible-builder - Ansible playbook import and export
///
/// Converts playbooks and shell scripts into canonical task lists and renders
/// them back to YAML.
#[derive(Parser, Debug, Clone)]
#[command(name = "ansible-builder")]
#[command(author = "ansible-builder contributors")]
#[command(version)]
#[command(about = "Import and render Ansible playbooks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "ANSIBLE_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Import a YAML playbook as a canonical playbook
    Import(commands::import::ImportArgs),

    /// Convert a shell script into a canonical playbook
    Script(commands::script::ScriptArgs),

    /// Render a canonical playbook (JSON) as Ansible YAML
    Render(commands::render::RenderArgs),

    /// Validate playbook YAML
    Validate(commands::validate::ValidateArgs),

    /// Serve the HTTP API
    #[cfg(feature = "api")]
    Serve(commands::serve::ServeArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}
