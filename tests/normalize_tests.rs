//! Tests for YAML to canonical task normalization.

mod common;

use ansible_builder::error::{Error, Result};
use ansible_builder::normalize::{NormalizeOptions, NormalizedPlaybook, Normalizer};
use ansible_builder::playbook::{Conditional, Count};
use common::{assert_task, SITE_PLAYBOOK};
use pretty_assertions::assert_eq;

fn normalize(yaml: &str) -> Result<NormalizedPlaybook> {
    Normalizer::new().normalize_str(yaml)
}

// ============================================================================
// Document Shapes
// ============================================================================

#[test]
fn test_minimal_round_trip_case() {
    let playbook =
        normalize("- name: Test\n  hosts: all\n  tasks:\n    - name: Ping\n      ping: {}\n").unwrap();

    assert_eq!(playbook.tasks.len(), 1);
    assert_eq!(playbook.tasks[0].name, "Ping");
    assert_task(&playbook.tasks[0], "ping", &[]);
    assert!(playbook.tasks[0].params.is_empty());
}

#[test]
fn test_single_play_mapping() {
    let playbook = normalize(
        r#"
name: Single
hosts: app
become: yes
tasks:
  - name: One
    command: /bin/true
"#,
    )
    .unwrap();

    assert_eq!(playbook.name.as_deref(), Some("Single"));
    assert_eq!(playbook.hosts, "app");
    assert!(playbook.r#become);
    assert_task(&playbook.tasks[0], "command", &[("cmd", "/bin/true")]);
}

#[test]
fn test_multi_play_metadata_from_first_play() {
    let playbook = normalize(SITE_PLAYBOOK).unwrap();

    assert_eq!(playbook.name.as_deref(), Some("Configure web tier"));
    assert_eq!(playbook.hosts, "webservers");
    assert!(playbook.r#become);

    let names: Vec<_> = playbook.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Execute role: common",
            "Execute role: nginx",
            "Install packages",
            "Deploy config",
            "Open firewall",
            "Install postgres",
        ]
    );
}

#[test]
fn test_tasks_keep_source_order() {
    let yaml: String = std::iter::once("tasks:\n".to_string())
        .chain((0..25).map(|i| format!("  - name: task {i}\n    debug: {{msg: '{i}'}}\n")))
        .collect();

    let playbook = normalize(&yaml).unwrap();
    assert_eq!(playbook.tasks.len(), 25);
    for (i, task) in playbook.tasks.iter().enumerate() {
        assert_eq!(task.name, format!("task {i}"));
        assert_eq!(task.param("msg"), Some(i.to_string().as_str()));
    }
}

#[test]
fn test_missing_play_fields_default() {
    let playbook = normalize("- tasks:\n    - ping:\n").unwrap();
    assert_eq!(playbook.name, None);
    assert_eq!(playbook.hosts, "all");
    assert!(!playbook.r#become);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_empty_documents() {
    assert!(matches!(normalize("~"), Err(Error::EmptyDocument)));
    assert!(matches!(normalize("---\nnull\n"), Err(Error::EmptyDocument)));
    assert!(matches!(normalize("[]"), Err(Error::EmptyDocument)));
}

#[test]
fn test_only_meta_keys_is_no_valid_tasks() {
    let err = normalize("- hosts: all\n  tasks:\n    - name: Nothing\n      when: true\n      tags: [x]\n")
        .unwrap_err();
    assert!(matches!(err, Error::NoValidTasks));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_syntax_error_has_position() {
    let err = normalize("- hosts: all\n  tasks: [ping\n").unwrap_err();
    match err {
        Error::YamlSyntax { line, .. } => assert!(line.is_some()),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_non_mapping_tasks_are_skipped() {
    let playbook = normalize("tasks:\n  - just a string\n  - 42\n  - shell: uptime\n").unwrap();
    assert_eq!(playbook.tasks.len(), 1);
    assert_task(&playbook.tasks[0], "shell", &[("cmd", "uptime")]);
}

// ============================================================================
// Module Detection and Coercion
// ============================================================================

#[test]
fn test_apt_string_shorthand() {
    let playbook = normalize("tasks:\n  - name: Install nginx\n    apt: nginx\n").unwrap();
    assert_task(
        &playbook.tasks[0],
        "apt",
        &[("name", "nginx"), ("state", "present")],
    );
}

#[test]
fn test_fqcn_module_is_shortened() {
    let playbook =
        normalize("tasks:\n  - name: T\n    ansible.builtin.copy: {src: a, dest: b}\n").unwrap();
    assert_task(&playbook.tasks[0], "copy", &[("src", "a"), ("dest", "b")]);
}

#[test]
fn test_first_module_key_wins() {
    let playbook = normalize("tasks:\n  - name: Two modules\n    shell: echo one\n    command: echo two\n")
        .unwrap();
    assert_task(&playbook.tasks[0], "shell", &[("cmd", "echo one")]);
    assert_eq!(playbook.tasks[0].params.len(), 1);
}

#[test]
fn test_blocks_are_not_modules() {
    let err = normalize("tasks:\n  - block:\n      - ping:\n    rescue:\n      - ping:\n").unwrap_err();
    assert!(matches!(err, Error::NoValidTasks));
}

#[test]
fn test_copy_shorthand_has_empty_src() {
    let playbook = normalize("tasks:\n  - copy: /etc/motd\n").unwrap();
    assert_task(&playbook.tasks[0], "copy", &[("src", ""), ("dest", "/etc/motd")]);
    assert_eq!(playbook.tasks[0].name, "Unnamed task");
}

#[test]
fn test_list_and_scalar_module_values() {
    let playbook = normalize("tasks:\n  - debug: [one, two]\n  - pause: 30\n").unwrap();
    assert_task(&playbook.tasks[0], "debug", &[("items", "one, two")]);
    assert_task(&playbook.tasks[1], "pause", &[("value", "30")]);
}

#[test]
fn test_nested_params_are_json() {
    let playbook = normalize(SITE_PLAYBOOK).unwrap();
    assert_task(
        &playbook.tasks[1],
        "include_role",
        &[("role", "nginx"), ("vars", r#"{"worker_processes":4}"#)],
    );
    assert_task(&playbook.tasks[4], "ufw", &[("rule", "allow"), ("port", "443")]);
}

#[test]
fn test_merge_key_is_not_a_module() {
    let playbook = normalize(
        "- hosts: all\n  tasks:\n    - name: a\n      <<: {become: true}\n      shell: echo\n",
    )
    .unwrap();
    assert_task(&playbook.tasks[0], "shell", &[("cmd", "echo")]);
}

#[test]
fn test_anchored_defaults_merge_into_module_args() {
    let playbook = normalize(
        r#"
- hosts: all
  vars:
    pkg_defaults: &pkg {state: latest, update_cache: true}
  tasks:
    - name: Install nginx
      apt:
        <<: *pkg
        name: nginx
        state: present
"#,
    )
    .unwrap();

    let task = &playbook.tasks[0];
    assert_task(
        task,
        "apt",
        &[("name", "nginx"), ("state", "present"), ("update_cache", "true")],
    );
    assert!(task.param("<<").is_none());
}

#[test]
fn test_merge_of_scalar_is_invalid_structure() {
    let err = normalize("tasks:\n  - <<: 5\n    shell: echo\n").unwrap_err();
    assert!(matches!(err, Error::InvalidStructure(_)));
    assert_eq!(err.status_code(), 400);
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn test_string_role() {
    let playbook = normalize("- hosts: all\n  roles: [webserver]\n").unwrap();
    assert_eq!(playbook.tasks.len(), 1);
    assert_eq!(playbook.tasks[0].name, "Execute role: webserver");
    assert_task(&playbook.tasks[0], "include_role", &[("name", "webserver")]);
}

#[test]
fn test_roles_precede_tasks_per_play() {
    let playbook = normalize(
        "- tasks: [{name: first, ping: {}}]\n- roles: [second]\n  tasks: [{name: third, ping: {}}]\n",
    )
    .unwrap();
    let names: Vec<_> = playbook.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["first", "Execute role: second", "third"]);
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_attributes_preserved_by_default() {
    let playbook = normalize(
        r#"
tasks:
  - name: Wait for port
    wait_for: {port: 8080}
    register: waited
    retries: 5
    until: waited is succeeded
    with_items: [a, b]
    ignore_errors: true
    changed_when: false
    async: 60
    poll: 0
"#,
    )
    .unwrap();

    let attrs = &playbook.tasks[0].attributes;
    assert_eq!(attrs.register.as_deref(), Some("waited"));
    assert_eq!(attrs.retries, Some(Count::Number(5)));
    assert_eq!(
        attrs.until,
        Some(Conditional::Single("waited is succeeded".to_string()))
    );
    assert_eq!(attrs.loop_over, Some(serde_json::json!(["a", "b"])));
    assert_eq!(attrs.ignore_errors, Some(true));
    assert_eq!(attrs.changed_when, Some(Conditional::Bool(false)));
    assert_eq!(attrs.async_timeout, Some(Count::Number(60)));
    assert_eq!(attrs.poll, Some(Count::Number(0)));
}

#[test]
fn test_basic_mode_drops_attributes() {
    let normalizer = Normalizer::new().with_options(NormalizeOptions::basic());
    let playbook = normalizer.normalize_str(SITE_PLAYBOOK).unwrap();

    assert!(playbook.tasks.iter().all(|t| t.attributes.is_empty()));
}

#[test]
fn test_attributes_serialize_alongside_task() {
    let playbook = normalize("tasks:\n  - name: N\n    shell: ls\n    when: [a, b]\n").unwrap();
    let json = serde_json::to_value(&playbook.tasks[0]).unwrap();

    assert_eq!(json["module"], "shell");
    assert_eq!(json["params"]["cmd"], "ls");
    assert_eq!(json["when"], serde_json::json!(["a", "b"]));
}
