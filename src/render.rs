//! Canonical playbook to YAML rendering.
//!
//! Output is always a single play in block style:
//!
//! ```yaml
//! - name: Example
//!   hosts: all
//!   tasks:
//!   - name: Ping
//!     ping: {}
//!   become: true
//! ```
//!
//! `become` is emitted only when set. Parameters with an empty or false-like
//! value are omitted. Preserved task attributes are re-emitted only when
//! [`RenderOptions::include_task_attributes`] is on.

use serde_yaml::{Mapping, Value};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::playbook::{CanonicalPlaybook, CanonicalTask};

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `when`, `loop`, `register`, ... after the module key
    pub include_task_attributes: bool,
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            include_task_attributes: config.include_task_attributes,
        }
    }
}

/// Returns true for parameter values that are left out of rendered tasks.
pub fn is_falsy(value: &str) -> bool {
    matches!(value.trim(), "" | "false" | "False" | "0" | "[]" | "{}")
}

/// Renders canonical playbooks as Ansible YAML.
#[derive(Debug, Clone, Default)]
pub struct YamlRenderer {
    options: RenderOptions,
}

impl YamlRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render `playbook` as a one-play YAML document.
    pub fn render(&self, playbook: &CanonicalPlaybook) -> Result<String> {
        let document = Value::Sequence(vec![Value::Mapping(self.play(playbook)?)]);
        serde_yaml::to_string(&document).map_err(Error::YamlEmit)
    }

    fn play(&self, playbook: &CanonicalPlaybook) -> Result<Mapping> {
        let tasks = playbook
            .tasks
            .iter()
            .map(|task| self.task(task).map(Value::Mapping))
            .collect::<Result<Vec<_>>>()?;

        let mut play = Mapping::new();
        play.insert("name".into(), playbook.name.as_str().into());
        play.insert("hosts".into(), playbook.hosts.as_str().into());
        play.insert("tasks".into(), Value::Sequence(tasks));
        if playbook.r#become {
            play.insert("become".into(), Value::Bool(true));
        }
        Ok(play)
    }

    fn task(&self, task: &CanonicalTask) -> Result<Mapping> {
        let arguments: Mapping = task
            .params
            .iter()
            .filter(|(_, value)| !is_falsy(value))
            .map(|(key, value)| (Value::from(key.as_str()), Value::from(value.as_str())))
            .collect();

        let mut rendered = Mapping::new();
        rendered.insert("name".into(), task.name.as_str().into());
        rendered.insert(task.module.as_str().into(), Value::Mapping(arguments));

        if self.options.include_task_attributes && !task.attributes.is_empty() {
            if let Value::Mapping(attributes) =
                serde_yaml::to_value(&task.attributes).map_err(Error::YamlEmit)?
            {
                rendered.extend(attributes);
            }
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playbook::{Conditional, TaskAttributes};
    use pretty_assertions::assert_eq;

    fn sample() -> CanonicalPlaybook {
        let mut playbook = CanonicalPlaybook::new("Web").with_hosts("web");
        playbook.add_task(
            CanonicalTask::new("Copy config", "copy")
                .with_param("src", "")
                .with_param("dest", "/etc/app.conf")
                .with_param("force", "false"),
        );
        playbook
    }

    #[test]
    fn test_render_layout() {
        let yaml = YamlRenderer::new().render(&sample()).unwrap();
        assert!(yaml.starts_with("- name: Web\n  hosts: web\n  tasks:\n"));
        assert!(yaml.contains("dest: /etc/app.conf"));
        assert!(!yaml.contains("src:"));
        assert!(!yaml.contains("force"));

        let parsed: Value = serde_yaml::from_str(&yaml).unwrap();
        let keys: Vec<_> = parsed[0]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["name", "hosts", "tasks"]);
    }

    #[test]
    fn test_become_only_when_true() {
        let yaml = YamlRenderer::new()
            .render(&sample().with_become(true))
            .unwrap();
        assert!(yaml.ends_with("  become: true\n"));
        assert!(!YamlRenderer::new().render(&sample()).unwrap().contains("become"));
    }

    #[test]
    fn test_empty_params_render_as_empty_mapping() {
        let mut playbook = CanonicalPlaybook::new("P");
        playbook.add_task(CanonicalTask::new("Ping", "ping"));
        let yaml = YamlRenderer::new().render(&playbook).unwrap();
        assert!(yaml.contains("ping: {}"));
    }

    #[test]
    fn test_attributes_follow_module() {
        let attributes = TaskAttributes {
            when_condition: Some(Conditional::Single("enabled".to_string())),
            register: Some("out".to_string()),
            ..TaskAttributes::default()
        };
        let mut playbook = CanonicalPlaybook::new("P");
        playbook.add_task(
            CanonicalTask::new("Uptime", "command")
                .with_param("cmd", "uptime")
                .with_attributes(attributes),
        );

        let plain = YamlRenderer::new().render(&playbook).unwrap();
        assert!(!plain.contains("when"));

        let full = YamlRenderer::with_options(RenderOptions {
            include_task_attributes: true,
        })
        .render(&playbook)
        .unwrap();
        let parsed: Value = serde_yaml::from_str(&full).unwrap();
        let task = parsed[0]["tasks"][0].as_mapping().unwrap();
        let keys: Vec<_> = task.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, vec!["name", "command", "when", "register"]);
    }

    #[test]
    fn test_is_falsy() {
        assert!(is_falsy(""));
        assert!(is_falsy("0"));
        assert!(is_falsy("false"));
        assert!(!is_falsy("no"));
        assert!(!is_falsy("00644"));
    }
}
