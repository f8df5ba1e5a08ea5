//! # ansible-builder - Playbook Import and Export Core
//!
//! ansible-builder converts Ansible playbooks and shell scripts into a flat,
//! UI-editable task model and renders that model back to YAML.
//!
//! ## Core Concepts
//!
//! - **Canonical task**: `{name, module, params}` with string-valued params and
//!   optional task attributes (`when`, `loop`, `register`, ...)
//! - **Canonical playbook**: `{name, hosts, become, tasks}`
//! - **Import directive**: an `import: path` line expanded textually before parsing
//!
//! ## Architecture Overview
//!
//! ```text
//!   YAML text ──► ImportResolver ──► serde_yaml ──► Normalizer ──┐
//!                                                                ├──► CanonicalPlaybook ──► YamlRenderer ──► YAML text
//!   shell script ─────────────────► ScriptSplitter ──────────────┘
//! ```
//!
//! [`PlaybookImporter`](importer::PlaybookImporter) wires the stages together
//! from a [`Config`](config::Config). The optional `api` feature exposes the
//! pipeline over HTTP.
//!
//! ## Quick Example
//!
//! ```rust
//! use ansible_builder::prelude::*;
//!
//! let importer = PlaybookImporter::default();
//! let playbook = importer
//!     .import_yaml("- name: Site\n  hosts: web\n  tasks:\n    - name: Ping\n      ping: {}\n")
//!     .unwrap();
//!
//! assert_eq!(playbook.name, "Site");
//! assert_eq!(playbook.tasks[0].module, "ping");
//!
//! let yaml = importer.render(&playbook).unwrap();
//! assert!(yaml.contains("hosts: web"));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types.
    //!
    //! # Example
    //!
    //! ```rust
    //! use ansible_builder::prelude::*;
    //!
    //! let tasks = ScriptSplitter::new().split("echo hello").unwrap();
    //! assert_eq!(tasks[0].module, "shell");
    //! ```

    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorContext, Result};
    pub use crate::import::{ImportIssue, ImportResolver, Resolution};
    pub use crate::importer::PlaybookImporter;
    pub use crate::normalize::{NormalizeOptions, NormalizedPlaybook, Normalizer};
    pub use crate::playbook::{CanonicalPlaybook, CanonicalTask, Params, TaskAttributes};
    pub use crate::render::{RenderOptions, YamlRenderer};
    pub use crate::script::ScriptSplitter;
    pub use crate::validate::{validate_yaml, ValidationReport};
}

// ============================================================================
// Core Data Model
// ============================================================================

/// Canonical playbook and task structures.
pub mod playbook;

// ============================================================================
// Pipeline Stages
// ============================================================================

/// Textual `import:` directive expansion with base-directory confinement.
pub mod import;

/// YAML document to canonical task conversion.
///
/// Module detection, scalar shorthand coercion, role expansion and
/// attribute preservation live here.
pub mod normalize;

/// Heuristic shell script splitting.
pub mod script;

/// Canonical playbook to YAML rendering.
pub mod render;

/// Import pipeline facade.
pub mod importer;

/// Validation reports for YAML input.
pub mod validate;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// Configuration management.
///
/// Handles loading and merging configuration from files and environment
/// variables.
pub mod config;

/// Error types.
pub mod error;

// ============================================================================
// HTTP API
// ============================================================================

/// REST API over the import pipeline.
#[cfg(feature = "api")]
pub mod api;

// ============================================================================
// Version Information
// ============================================================================

/// Returns the current version of ansible-builder.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns detailed version information including build metadata.
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        target: std::env::consts::ARCH,
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Detailed version information for the build.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Semantic version string
    pub version: &'static str,
    /// Target architecture
    pub target: &'static str,
    /// Build profile (debug or release)
    pub profile: &'static str,
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ansible-builder {} ({}, {})",
            self.version, self.target, self.profile
        )
    }
}
