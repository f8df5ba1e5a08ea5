//! End-to-end import pipeline.
//!
//! [`PlaybookImporter`] wires the resolver, normalizer, splitter and renderer
//! together according to a [`Config`]. It is cheap to share: every component is
//! read-only after construction.

use chrono::Utc;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ErrorContext, Result};
use crate::import::{ImportIssue, ImportResolver, Resolution};
use crate::normalize::{parse_document, NormalizeOptions, Normalizer};
use crate::playbook::CanonicalPlaybook;
use crate::render::{RenderOptions, YamlRenderer};
use crate::script::ScriptSplitter;

/// Default name for an imported playbook without one.
pub fn default_playbook_name() -> String {
    format!("Imported Playbook - {}", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Default name for a playbook built from a script.
pub fn default_script_playbook_name() -> String {
    format!("Script_Playbook_{}", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Imports YAML and shell scripts as canonical playbooks.
#[derive(Debug, Clone)]
pub struct PlaybookImporter {
    base_dir: PathBuf,
    resolver: ImportResolver,
    normalizer: Normalizer,
    splitter: ScriptSplitter,
    renderer: YamlRenderer,
}

impl Default for PlaybookImporter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl PlaybookImporter {
    /// Build an importer from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            base_dir: config.imports.base_dir.clone(),
            resolver: ImportResolver::from_config(&config.imports),
            normalizer: Normalizer::from_config(&config.normalizer),
            splitter: ScriptSplitter::from_config(&config.script),
            renderer: YamlRenderer::with_options(RenderOptions::from(&config.render)),
        }
    }

    /// Use a different base directory for imports.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Use different normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalizer = self.normalizer.with_options(options);
        self
    }

    /// Use different render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.renderer = YamlRenderer::with_options(options);
        self
    }

    /// Base directory imports are confined to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The configured normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Expand `import:` directives against the configured base directory.
    pub fn resolve(&self, text: &str) -> Resolution {
        self.resolver.resolve_with_report(text, &self.base_dir)
    }

    /// Resolve imports and parse the result.
    pub fn parse(&self, text: &str, base_dir: &Path) -> Result<Value> {
        self.parse_with_issues(text, base_dir).map(|(document, _)| document)
    }

    fn parse_with_issues(&self, text: &str, base_dir: &Path) -> Result<(Value, Vec<ImportIssue>)> {
        let resolution = self.resolver.resolve_with_report(text, base_dir);
        if !resolution.issues.is_empty() {
            debug!("{} import directives were not expanded", resolution.issues.len());
        }
        let document = parse_document(&resolution.content)?;
        Ok((document, resolution.issues))
    }

    /// Import YAML text, resolving imports against the configured base directory.
    pub fn import_yaml(&self, text: &str) -> Result<CanonicalPlaybook> {
        self.import_yaml_from(text, &self.base_dir)
    }

    /// Import YAML text, resolving imports against `base_dir`.
    pub fn import_yaml_from(&self, text: &str, base_dir: &Path) -> Result<CanonicalPlaybook> {
        self.import_yaml_with_issues(text, base_dir)
            .map(|(playbook, _)| playbook)
    }

    /// Like [`import_yaml_from`](Self::import_yaml_from), also returning the
    /// import directives that degraded to error comments.
    pub fn import_yaml_with_issues(
        &self,
        text: &str,
        base_dir: &Path,
    ) -> Result<(CanonicalPlaybook, Vec<ImportIssue>)> {
        let (document, issues) = self.parse_with_issues(text, base_dir)?;
        let playbook = self
            .normalizer
            .normalize(&document)?
            .into_playbook(default_playbook_name);

        info!(
            "Imported playbook '{}' with {} tasks",
            playbook.name,
            playbook.task_count()
        );
        Ok((playbook, issues))
    }

    /// Import a YAML file; its directory becomes the import base.
    pub fn import_yaml_file(&self, path: impl AsRef<Path>) -> Result<CanonicalPlaybook> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read playbook '{}'", path.display()))?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        self.import_yaml_from(&text, base_dir)
    }

    /// Build a playbook from a shell script.
    pub fn import_script(&self, name: Option<&str>, text: &str) -> Result<CanonicalPlaybook> {
        let tasks = self.splitter.split(text)?;

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(default_script_playbook_name, str::to_string);

        let mut playbook = CanonicalPlaybook::new(name);
        playbook.tasks = tasks;

        info!(
            "Imported script as '{}' with {} tasks",
            playbook.name,
            playbook.task_count()
        );
        Ok(playbook)
    }

    /// Render a playbook with the configured options.
    pub fn render(&self, playbook: &CanonicalPlaybook) -> Result<String> {
        self.renderer.render(playbook)
    }
}
