//! Task normalization.
//!
//! Turns a parsed playbook document into the canonical `{name, module, params}`
//! task list. A document is either a list of plays or a single play mapping.
//! Each play contributes its roles (as `include_role` tasks) followed by its
//! own tasks; play metadata is taken from the first play only.
//!
//! # Example
//!
//! ```rust
//! use ansible_builder::normalize::Normalizer;
//!
//! let yaml = r#"
//! - hosts: web
//!   tasks:
//!     - name: Install nginx
//!       apt: nginx
//! "#;
//!
//! let playbook = Normalizer::new().normalize_str(yaml).unwrap();
//! assert_eq!(playbook.hosts, "web");
//! assert_eq!(playbook.tasks[0].module, "apt");
//! assert_eq!(playbook.tasks[0].param("state"), Some("present"));
//! ```

mod attributes;
pub mod keywords;
mod params;

pub use attributes::{extract_attributes, parse_bool};
pub use keywords::KeywordTables;
pub use params::{coerce_params, key_text, stringify, to_json};

use serde_yaml::{Mapping, Value};
use tracing::{debug, trace};

use crate::config::NormalizerConfig;
use crate::error::{Error, Result};
use crate::playbook::{default_hosts, CanonicalPlaybook, CanonicalTask};

/// Switches for one normalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Carry task attributes onto canonical tasks
    pub preserve_attributes: bool,
    /// Name given to tasks without one
    pub default_task_name: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from(&NormalizerConfig::default())
    }
}

impl From<&NormalizerConfig> for NormalizeOptions {
    fn from(config: &NormalizerConfig) -> Self {
        Self {
            preserve_attributes: config.preserve_attributes,
            default_task_name: config.default_task_name.clone(),
        }
    }
}

impl NormalizeOptions {
    /// Options for the basic import path: attributes are dropped.
    pub fn basic() -> Self {
        Self {
            preserve_attributes: false,
            ..Self::default()
        }
    }
}

/// Output of normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlaybook {
    /// Name of the first play, if it had one
    pub name: Option<String>,
    /// Host pattern of the first play
    pub hosts: String,
    /// Privilege escalation of the first play
    pub r#become: bool,
    /// Flattened canonical tasks
    pub tasks: Vec<CanonicalTask>,
}

impl NormalizedPlaybook {
    /// Build a canonical playbook, using `fallback_name` when the play had none.
    pub fn into_playbook(self, fallback_name: impl FnOnce() -> String) -> CanonicalPlaybook {
        CanonicalPlaybook {
            name: self.name.unwrap_or_else(fallback_name),
            hosts: self.hosts,
            r#become: self.r#become,
            tasks: self.tasks,
        }
    }
}

/// Play-level metadata.
#[derive(Debug, Clone)]
struct PlayMeta {
    name: Option<String>,
    hosts: String,
    r#become: bool,
}

impl PlayMeta {
    fn from_play(play: &Mapping) -> Self {
        let name = play.get("name").filter(|v| !v.is_null()).map(stringify);

        let hosts = match play.get("hosts") {
            None | Some(Value::Null) => default_hosts(),
            Some(Value::Sequence(patterns)) => patterns
                .iter()
                .map(stringify)
                .collect::<Vec<_>>()
                .join(","),
            Some(other) => stringify(other),
        };

        let r#become = play.get("become").and_then(parse_bool).unwrap_or(false);

        Self {
            name,
            hosts,
            r#become,
        }
    }
}

impl Default for PlayMeta {
    fn default() -> Self {
        Self {
            name: None,
            hosts: default_hosts(),
            r#become: false,
        }
    }
}

/// Converts parsed playbook documents into canonical tasks.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    keywords: KeywordTables,
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer from configuration.
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            keywords: KeywordTables::default(),
            options: NormalizeOptions::from(config),
        }
    }

    /// Replace the keyword tables.
    pub fn with_keywords(mut self, keywords: KeywordTables) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the options.
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Parse YAML text and normalize it.
    pub fn normalize_str(&self, text: &str) -> Result<NormalizedPlaybook> {
        let document = parse_document(text)?;
        self.normalize(&document)
    }

    /// Normalize a parsed document.
    pub fn normalize(&self, document: &Value) -> Result<NormalizedPlaybook> {
        let (meta, raw_tasks) = match document {
            Value::Null => return Err(Error::EmptyDocument),
            Value::Sequence(plays) if plays.is_empty() => return Err(Error::EmptyDocument),
            Value::Sequence(plays) => {
                let mut meta = None;
                let mut raw_tasks = Vec::new();

                for (index, play) in plays.iter().enumerate() {
                    let Some(play) = play.as_mapping() else {
                        debug!("Skipping play {} that is not a mapping", index);
                        continue;
                    };
                    if meta.is_none() {
                        meta = Some(PlayMeta::from_play(play));
                    }
                    raw_tasks.extend(self.play_tasks(play));
                }

                (meta.unwrap_or_default(), raw_tasks)
            }
            Value::Mapping(play) => (PlayMeta::from_play(play), self.play_tasks(play)),
            Value::Tagged(tagged) => return self.normalize(&tagged.value),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                return Err(Error::InvalidStructure(
                    "expected a list of plays or a play mapping".to_string(),
                ))
            }
        };

        let tasks: Vec<CanonicalTask> = raw_tasks
            .iter()
            .filter_map(|task| self.convert_task(task))
            .collect();

        if tasks.is_empty() {
            return Err(Error::NoValidTasks);
        }

        debug!(
            "Normalized {} of {} tasks for hosts '{}'",
            tasks.len(),
            raw_tasks.len(),
            meta.hosts
        );

        Ok(NormalizedPlaybook {
            name: meta.name,
            hosts: meta.hosts,
            r#become: meta.r#become,
            tasks,
        })
    }

    /// Roles (as raw `include_role` tasks) followed by the play's own tasks.
    fn play_tasks(&self, play: &Mapping) -> Vec<Mapping> {
        let roles = play
            .get("roles")
            .and_then(Value::as_sequence)
            .into_iter()
            .flatten()
            .filter_map(role_task);

        let tasks = play
            .get("tasks")
            .and_then(Value::as_sequence)
            .into_iter()
            .flatten()
            .filter_map(|task| task.as_mapping().cloned());

        roles.chain(tasks).collect()
    }

    /// Convert one raw task; `None` if no key names a module.
    pub fn convert_task(&self, task: &Mapping) -> Option<CanonicalTask> {
        let Some((key, value)) = task
            .iter()
            .find(|(key, _)| !self.keywords.is_reserved(&key_text(key)))
        else {
            trace!("Dropping task without a module key: {:?}", task.get("name"));
            return None;
        };

        let raw_module = key_text(key);
        let module = raw_module
            .rsplit('.')
            .next()
            .unwrap_or(raw_module.as_str())
            .to_string();

        let name = task
            .get("name")
            .filter(|v| !v.is_null())
            .map(stringify)
            .unwrap_or_else(|| self.options.default_task_name.clone());

        let params = coerce_params(&module, value, &self.keywords);
        let mut canonical = CanonicalTask::new(name, module).with_params(params);

        if self.options.preserve_attributes {
            canonical.attributes = extract_attributes(task);
        }

        Some(canonical)
    }
}

/// Parse YAML text into a document with `<<` merge keys applied.
pub fn parse_document(text: &str) -> Result<Value> {
    let mut document: Value = serde_yaml::from_str(text).map_err(|e| Error::yaml_syntax(&e))?;
    document
        .apply_merge()
        .map_err(|e| Error::InvalidStructure(format!("invalid merge key: {e}")))?;
    Ok(document)
}

/// Turn a role reference into a raw `include_role` task.
fn role_task(role: &Value) -> Option<Mapping> {
    let (role_name, argument) = match role {
        Value::String(name) => {
            let mut argument = Mapping::new();
            argument.insert(Value::from("name"), Value::from(name.as_str()));
            (name.clone(), Value::Mapping(argument))
        }
        Value::Mapping(spec) => {
            let named = |key: &str| {
                spec.get(key)
                    .map(stringify)
                    .filter(|name| !name.is_empty())
            };
            let role_name = named("role")
                .or_else(|| named("name"))
                .unwrap_or_else(|| "unknown".to_string());
            (role_name, role.clone())
        }
        other => {
            debug!("Skipping role entry of unexpected shape: {:?}", other);
            return None;
        }
    };

    let mut task = Mapping::new();
    task.insert(
        Value::from("name"),
        Value::from(format!("Execute role: {role_name}")),
    );
    task.insert(Value::from(keywords::ROLE_MODULE), argument);
    Some(task)
}
