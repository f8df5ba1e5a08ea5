//! Output formatting module for ansible-builder
//!
//! Provides colored human output and structured JSON/YAML output.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::OutputFormat;
use ansible_builder::playbook::CanonicalPlaybook;

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Selected output format
    format: OutputFormat,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, format: OutputFormat, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            format,
            verbosity,
        }
    }

    /// Check if structured output is requested
    pub fn is_structured(&self) -> bool {
        !matches!(self.format, OutputFormat::Human)
    }

    /// Print a value as JSON or YAML on stdout
    pub fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            OutputFormat::Json | OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
        Ok(())
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.is_structured() {
            return;
        }

        if self.use_color {
            println!("\n{}", title.cyan().bold());
            println!("{}", "-".repeat(title.len()).cyan());
        } else {
            println!("\n{}", title);
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Print a playbook summary with its task list
    pub fn playbook(&self, playbook: &CanonicalPlaybook) -> Result<()> {
        if self.is_structured() {
            return self.emit(playbook);
        }

        self.section(&playbook.name);
        println!("hosts:  {}", playbook.hosts);
        println!("become: {}", playbook.r#become);
        println!("tasks:  {}", playbook.task_count());

        for (index, task) in playbook.tasks.iter().enumerate() {
            let module = if self.use_color {
                task.module.green().to_string()
            } else {
                task.module.clone()
            };
            println!("  {:>3}. [{}] {}", index + 1, module, task.name);

            if self.verbosity >= 1 {
                for (key, value) in &task.params {
                    println!("         {key}: {value}");
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.is_structured() {
            return;
        }

        if self.use_color {
            println!("{} {}", "OK:".green().bold(), message);
        } else {
            println!("OK: {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.is_structured() {
            let err = serde_json::json!({
                "type": "error",
                "message": message
            });
            eprintln!("{}", err);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.is_structured() {
            let warn = serde_json::json!({
                "type": "warning",
                "message": message
            });
            eprintln!("{}", warn);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print an info message (respects verbosity)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 || self.is_structured() {
            return;
        }

        if self.use_color {
            println!("{} {}", "INFO:".blue(), message);
        } else {
            println!("INFO: {}", message);
        }
    }
}
