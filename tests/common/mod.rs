//! Shared test utilities and fixtures for the ansible-builder test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ansible_builder::config::Config;
use ansible_builder::importer::PlaybookImporter;
use ansible_builder::playbook::{CanonicalPlaybook, CanonicalTask};

// ============================================================================
// Fixtures
// ============================================================================

/// A playbook with two plays, roles, attributes and FQCN modules.
pub const SITE_PLAYBOOK: &str = r#"---
- name: Configure web tier
  hosts: webservers
  become: true
  roles:
    - common
    - role: nginx
      vars:
        worker_processes: 4
  tasks:
    - name: Install packages
      apt: nginx
    - name: Deploy config
      ansible.builtin.template:
        src: nginx.conf.j2
        dest: /etc/nginx/nginx.conf
        mode: "0644"
      notify: restart nginx
    - name: Open firewall
      ufw:
        rule: allow
        port: 443
      when: firewall_enabled

- name: Configure db tier
  hosts: databases
  tasks:
    - name: Install postgres
      yum: postgresql-server
"#;

/// A temporary directory holding playbook files.
pub struct PlaybookDir {
    dir: TempDir,
}

impl PlaybookDir {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Importer confined to this directory.
    pub fn importer(&self) -> PlaybookImporter {
        PlaybookImporter::new(&Config::default()).with_base_dir(self.path())
    }
}

// ============================================================================
// Builders and Assertions
// ============================================================================

/// Build a canonical playbook from `(name, module, params)` triples.
pub fn playbook_with(name: &str, tasks: &[(&str, &str, &[(&str, &str)])]) -> CanonicalPlaybook {
    let mut playbook = CanonicalPlaybook::new(name);
    for (task_name, module, params) in tasks {
        let mut task = CanonicalTask::new(*task_name, *module);
        for (key, value) in params.iter() {
            task = task.with_param(*key, *value);
        }
        playbook.add_task(task);
    }
    playbook
}

/// Assert a task's module and parameters.
pub fn assert_task(task: &CanonicalTask, module: &str, params: &[(&str, &str)]) {
    assert_eq!(task.module, module, "module of task '{}'", task.name);
    for (key, value) in params {
        assert_eq!(
            task.param(key),
            Some(*value),
            "param '{}' of task '{}'",
            key,
            task.name
        );
    }
}
