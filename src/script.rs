//! Shell script to task splitting.
//!
//! A script is cut into `shell` tasks at blank lines and comments, with the
//! most recent comment naming the next block. A few common one-liners are
//! lifted into dedicated module tasks instead:
//!
//! - `apt-get install` / `apt install` becomes an `apt` task
//! - `yum install` becomes a `yum` task
//! - `systemctl start|enable <unit>` becomes a `service` task
//! - `mkdir <path>` becomes a `file` task

use tracing::debug;

use crate::config::ScriptConfig;
use crate::error::{Error, Result};
use crate::normalize::keywords::{APT_EXCLUDED_WORDS, SHELL_OPERATORS, YUM_EXCLUDED_WORDS};
use crate::playbook::CanonicalTask;

/// Splits shell scripts into canonical tasks.
#[derive(Debug, Clone)]
pub struct ScriptSplitter {
    default_block_name: String,
    executable: String,
}

impl Default for ScriptSplitter {
    fn default() -> Self {
        Self::from_config(&ScriptConfig::default())
    }
}

impl ScriptSplitter {
    /// Create a splitter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter from configuration.
    pub fn from_config(config: &ScriptConfig) -> Self {
        Self {
            default_block_name: config.default_block_name.clone(),
            executable: config.executable.clone(),
        }
    }

    /// Split `script` into tasks in source order.
    pub fn split(&self, script: &str) -> Result<Vec<CanonicalTask>> {
        if script.trim().is_empty() {
            return Err(Error::ScriptEmpty);
        }

        let mut tasks = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut block_name = self.default_block_name.clone();

        for raw in script.lines() {
            let line = raw.trim();

            if line.starts_with("#!") {
                continue;
            }

            if line.is_empty() || line.starts_with('#') {
                self.flush(&mut block, &block_name, &mut tasks);
                let comment = line.trim_start_matches('#').trim();
                if !comment.is_empty() {
                    block_name = comment.to_string();
                }
                continue;
            }

            if let Some(task) = self.special_task(line) {
                self.flush(&mut block, &block_name, &mut tasks);
                tasks.push(task);
                continue;
            }

            block.push(raw.trim_end());
        }

        self.flush(&mut block, &block_name, &mut tasks);

        if tasks.is_empty() {
            debug!("Script produced no tasks; wrapping it whole");
            tasks.push(self.shell_task(&self.default_block_name, script.trim_end()));
        }

        debug!("Split script into {} tasks", tasks.len());
        Ok(tasks)
    }

    fn flush(&self, block: &mut Vec<&str>, name: &str, tasks: &mut Vec<CanonicalTask>) {
        if block.is_empty() {
            return;
        }
        tasks.push(self.shell_task(name, &block.join("\n")));
        block.clear();
    }

    fn shell_task(&self, name: &str, cmd: &str) -> CanonicalTask {
        CanonicalTask::new(name, "shell")
            .with_param("cmd", cmd)
            .with_param("executable", self.executable.as_str())
    }

    /// Recognize a line that maps onto a dedicated module.
    fn special_task(&self, line: &str) -> Option<CanonicalTask> {
        if line.contains("apt-get install") || line.contains("apt install") {
            return package_task("apt", line, APT_EXCLUDED_WORDS)
                .map(|task| task.with_param("update_cache", "yes"));
        }

        if line.contains("yum install") {
            return package_task("yum", line, YUM_EXCLUDED_WORDS);
        }

        if line.contains("systemctl") {
            if let Some(task) = service_task(line) {
                return Some(task);
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"mkdir") && tokens.len() >= 2 {
            let path = tokens[tokens.len() - 1];
            if !path.starts_with('-') {
                return Some(
                    CanonicalTask::new(format!("Create directory {path}"), "file")
                        .with_param("path", path)
                        .with_param("state", "directory")
                        .with_param("mode", "0755"),
                );
            }
        }

        None
    }
}

/// Package names following the `install` keyword, up to the first shell operator.
fn package_task(module: &str, line: &str, excluded: &[&str]) -> Option<CanonicalTask> {
    let packages: Vec<&str> = line
        .split_whitespace()
        .skip_while(|token| *token != "install")
        .take_while(|token| !SHELL_OPERATORS.contains(token))
        .filter(|token| !excluded.contains(token))
        .collect();

    if packages.is_empty() {
        return None;
    }

    Some(
        CanonicalTask::new(format!("Install packages: {}", packages.join(", ")), module)
            .with_param("name", packages.join(","))
            .with_param("state", "present"),
    )
}

fn service_task(line: &str) -> Option<CanonicalTask> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    tokens.iter().enumerate().find_map(|(i, action)| {
        if *action != "start" && *action != "enable" {
            return None;
        }
        let unit = tokens[i + 1..].iter().find(|t| !t.starts_with('-'))?;

        Some(match *action {
            "start" => CanonicalTask::new(format!("Start service {unit}"), "service")
                .with_param("name", *unit)
                .with_param("state", "started"),
            _ => CanonicalTask::new(format!("Enable service {unit}"), "service")
                .with_param("name", *unit)
                .with_param("enabled", "yes"),
        })
    })
}
