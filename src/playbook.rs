//! Canonical playbook structures.
//!
//! This module defines the task and playbook shapes the UI edits and the storage
//! layer persists. A canonical task keeps a single module invocation whose
//! parameters are flattened to strings, plus an optional set of Ansible task
//! attributes carried through from the source document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Module parameters of a canonical task, in document order.
pub type Params = IndexMap<String, String>;

/// A playbook in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPlaybook {
    /// Playbook name
    pub name: String,

    /// Host pattern to target
    #[serde(default = "default_hosts")]
    pub hosts: String,

    /// Enable privilege escalation for the whole play
    #[serde(default)]
    pub r#become: bool,

    /// Ordered task list
    #[serde(default)]
    pub tasks: Vec<CanonicalTask>,
}

pub(crate) fn default_hosts() -> String {
    "all".to_string()
}

impl CanonicalPlaybook {
    /// Create an empty playbook targeting all hosts
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: default_hosts(),
            r#become: false,
            tasks: Vec::new(),
        }
    }

    /// Set the host pattern
    pub fn with_hosts(mut self, hosts: impl Into<String>) -> Self {
        self.hosts = hosts.into();
        self
    }

    /// Set privilege escalation
    pub fn with_become(mut self, enabled: bool) -> Self {
        self.r#become = enabled;
        self
    }

    /// Append a task
    pub fn add_task(&mut self, task: CanonicalTask) {
        self.tasks.push(task);
    }

    /// Get the number of tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

/// A task in canonical `{name, module, params}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTask {
    /// Task name
    pub name: String,

    /// Short module name (collection prefix stripped)
    pub module: String,

    /// Stringified module parameters
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: Params,

    /// Optional task attributes
    #[serde(flatten)]
    pub attributes: TaskAttributes,
}

impl CanonicalTask {
    /// Create a task with no parameters
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            params: Params::new(),
            attributes: TaskAttributes::default(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace all parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Replace the task attributes
    pub fn with_attributes(mut self, attributes: TaskAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Look up a parameter value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Accept any JSON scalar or collection as a parameter value and stringify it.
fn deserialize_params<'de, D>(deserializer: D) -> Result<Params, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

/// Ansible task attributes preserved on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAttributes {
    /// Loop items or expression
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_over: Option<serde_json::Value>,

    /// Become (privilege escalation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#become: Option<bool>,

    /// Conditional execution
    #[serde(default, rename = "when", skip_serializing_if = "Option::is_none")]
    pub when_condition: Option<Conditional>,

    /// Delegate to another host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_to: Option<String>,

    /// Register result in variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<String>,

    /// Ignore errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_errors: Option<bool>,

    /// Failed when condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_when: Option<Conditional>,

    /// Changed when condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_when: Option<Conditional>,

    /// Run once (only on first host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_once: Option<bool>,

    /// Retry count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<Count>,

    /// Until condition for retries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Conditional>,

    /// Delay between retries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Count>,

    /// Handlers to notify on change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<Vec<String>>,

    /// Task tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Environment variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<serde_json::Value>,

    /// Task-level variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<serde_json::Value>,

    /// Async execution timeout
    #[serde(default, rename = "async", skip_serializing_if = "Option::is_none")]
    pub async_timeout: Option<Count>,

    /// Polling interval for async
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Count>,

    /// Hide output for sensitive data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_log: Option<bool>,

    /// Loop control options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_control: Option<serde_json::Value>,
}

impl TaskAttributes {
    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Conditional expression attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conditional {
    /// Literal boolean (`changed_when: false`)
    Bool(bool),
    /// Single expression
    Single(String),
    /// Multiple expressions (AND)
    Multiple(Vec<String>),
}

impl Conditional {
    /// Returns the expressions as a list.
    pub fn conditions(&self) -> Vec<String> {
        match self {
            Self::Bool(b) => vec![b.to_string()],
            Self::Single(s) => vec![s.clone()],
            Self::Multiple(v) => v.clone(),
        }
    }
}

/// A numeric task attribute that may also be templated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    /// Literal number
    Number(u64),
    /// Template expression (`"{{ retries }}"`)
    Template(String),
}
