//! Task attribute preservation.

use serde_yaml::{Mapping, Value};
use tracing::warn;

use super::params::{stringify, to_json};
use crate::playbook::{Conditional, Count, TaskAttributes};

/// Collect the preserved attributes present with a non-null value on `task`.
///
/// `loop` falls back to `with_items` when absent. Values of an unusable shape
/// are skipped with a warning.
pub fn extract_attributes(task: &Mapping) -> TaskAttributes {
    let get = |key: &str| task.get(key).filter(|v| !v.is_null());

    TaskAttributes {
        loop_over: get("loop").or_else(|| get("with_items")).map(to_json),
        r#become: get("become").and_then(|v| flag("become", v)),
        when_condition: get("when").map(conditional),
        delegate_to: get("delegate_to").map(stringify),
        register: get("register").map(stringify),
        ignore_errors: get("ignore_errors").and_then(|v| flag("ignore_errors", v)),
        failed_when: get("failed_when").map(conditional),
        changed_when: get("changed_when").map(conditional),
        run_once: get("run_once").and_then(|v| flag("run_once", v)),
        retries: get("retries").and_then(|v| count("retries", v)),
        until: get("until").map(conditional),
        delay: get("delay").and_then(|v| count("delay", v)),
        notify: get("notify").map(string_list),
        tags: get("tags").map(string_list),
        environment: get("environment").map(to_json),
        vars: get("vars").map(to_json),
        async_timeout: get("async").and_then(|v| count("async", v)),
        poll: get("poll").and_then(|v| count("poll", v)),
        no_log: get("no_log").and_then(|v| flag("no_log", v)),
        loop_control: get("loop_control").map(to_json),
    }
}

/// Parse a boolean attribute, accepting the YAML 1.1 spellings.
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "true" | "on" | "1" | "y" => Some(true),
            "no" | "false" | "off" | "0" | "n" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::Tagged(tagged) => parse_bool(&tagged.value),
        _ => None,
    }
}

fn flag(key: &str, value: &Value) -> Option<bool> {
    let parsed = parse_bool(value);
    if parsed.is_none() {
        warn!("Dropping attribute '{}': not a boolean: {:?}", key, value);
    }
    parsed
}

fn count(key: &str, value: &Value) -> Option<Count> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(n) => Some(Count::Number(n)),
            None => {
                warn!("Dropping attribute '{}': not a non-negative integer: {}", key, n);
                None
            }
        },
        Value::String(s) => Some(match s.trim().parse::<u64>() {
            Ok(n) => Count::Number(n),
            Err(_) => Count::Template(s.clone()),
        }),
        Value::Tagged(tagged) => count(key, &tagged.value),
        other => {
            warn!("Dropping attribute '{}': unexpected value {:?}", key, other);
            None
        }
    }
}

fn conditional(value: &Value) -> Conditional {
    match value {
        Value::Bool(b) => Conditional::Bool(*b),
        Value::Sequence(items) => Conditional::Multiple(items.iter().map(stringify).collect()),
        Value::Tagged(tagged) => conditional(&tagged.value),
        other => Conditional::Single(stringify(other)),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().map(stringify).collect(),
        Value::Tagged(tagged) => string_list(&tagged.value),
        other => vec![stringify(other)],
    }
}
