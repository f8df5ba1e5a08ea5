//! Textual `import:` directive resolution.
//!
//! Playbook text may contain lines of the form `import: path/to/file.yml`
//! (optionally as a list item). They are expanded before the text is handed to
//! the YAML parser: the referenced file is read, re-indented to the directive's
//! indentation and spliced in place of the directive line. Imports nest, with
//! relative paths resolved against the directory of the importing file.
//!
//! Resolution never fails. A directive that cannot be honoured is replaced by a
//! `# ERROR: ...` comment at the same indentation and reported as an
//! [`ImportIssue`].
//!
//! # Security
//!
//! - Paths containing `..` are rejected outright
//! - The normalized target must stay inside the configured base directory

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ImportConfig;

/// `[indent][- ]import: ["']path["']` on a line of its own.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^(?P<indent>[ \t]*)-?[ \t]*import:[ \t]*["']?(?P<path>[\w./\\-]+)["']?[ \t]*\r?$"#,
    )
    .unwrap()
});

/// A directive that could not be expanded.
///
/// The `Display` text is what ends up in the inline error comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportIssue {
    /// The literal path contains `..`
    #[error("Directory traversal is not allowed.")]
    TraversalRejected {
        /// Path as written in the directive
        path: String,
    },

    /// The resolved path escapes the base directory
    #[error("Import path is outside the allowed directory.")]
    OutsideBaseDir {
        /// Path as written in the directive
        path: String,
    },

    /// The target file does not exist
    #[error("Imported file not found at {path}")]
    FileMissing {
        /// Path as written in the directive
        path: String,
    },

    /// The target exists but could not be read as UTF-8 text
    #[error("Failed to import file: {message}")]
    ReadFailed {
        /// Path as written in the directive
        path: String,
        /// Underlying IO error
        message: String,
    },

    /// The target is already being expanded further up the chain
    #[error("Circular import detected: {path}")]
    Circular {
        /// Path as written in the directive
        path: String,
    },
}

impl ImportIssue {
    /// The path as written in the offending directive.
    pub fn path(&self) -> &str {
        match self {
            Self::TraversalRejected { path }
            | Self::OutsideBaseDir { path }
            | Self::FileMissing { path }
            | Self::ReadFailed { path, .. }
            | Self::Circular { path } => path,
        }
    }

    /// True for directives refused because of where they point.
    pub fn is_path_rejected(&self) -> bool {
        matches!(
            self,
            Self::TraversalRejected { .. } | Self::OutsideBaseDir { .. }
        )
    }

    /// The comment line that replaces the directive.
    pub fn comment(&self, indent: &str) -> String {
        format!("{indent}# ERROR: {self}")
    }
}

/// Outcome of resolving a document.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Expanded text
    pub content: String,
    /// Every directive that degraded to an error comment
    pub issues: Vec<ImportIssue>,
    /// False when the pass or depth cap stopped expansion early
    pub converged: bool,
}

/// Expands `import:` directives in raw YAML text.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    max_passes: usize,
    detect_cycles: bool,
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResolver {
    /// Create a resolver with the default cap of 10 passes and cycle detection.
    pub fn new() -> Self {
        Self::from_config(&ImportConfig::default())
    }

    /// Create a resolver from configuration.
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            max_passes: config.max_passes,
            detect_cycles: config.detect_cycles,
        }
    }

    /// Set the maximum number of substitution passes.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Enable or disable cycle detection.
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Expand all directives in `content`, resolving paths against `base_dir`.
    pub fn resolve(&self, content: &str, base_dir: impl AsRef<Path>) -> String {
        self.resolve_with_report(content, base_dir).content
    }

    /// Like [`resolve`](Self::resolve), also returning the soft failures.
    pub fn resolve_with_report(&self, content: &str, base_dir: impl AsRef<Path>) -> Resolution {
        let base_dir = absolutize(base_dir.as_ref());
        let mut expansion = Expansion {
            resolver: self,
            root: base_dir.clone(),
            chain: Vec::new(),
            issues: Vec::new(),
            exhausted: false,
        };

        let content = expansion.expand(content, &base_dir, 0);

        Resolution {
            content,
            issues: expansion.issues,
            converged: !expansion.exhausted,
        }
    }

    /// Returns true if the text contains at least one directive.
    pub fn has_directives(content: &str) -> bool {
        IMPORT_PATTERN.is_match(content)
    }
}

/// Mutable state of one resolution run.
struct Expansion<'a> {
    resolver: &'a ImportResolver,
    /// Directory every target must stay inside
    root: PathBuf,
    /// Files currently being expanded, outermost first
    chain: Vec<PathBuf>,
    issues: Vec<ImportIssue>,
    /// Set once a cap is hit; no further substitution happens after that
    exhausted: bool,
}

impl Expansion<'_> {
    /// Run substitution passes until the text stops changing.
    fn expand(&mut self, content: &str, base_dir: &Path, depth: usize) -> String {
        let mut resolved = content.to_string();

        for _ in 0..self.resolver.max_passes {
            if self.exhausted {
                return resolved;
            }

            let next = self.substitute(&resolved, base_dir, depth);
            if next == resolved {
                return resolved;
            }
            resolved = next;
        }

        if !self.exhausted && IMPORT_PATTERN.is_match(&resolved) {
            warn!(
                "Import expansion stopped after {} passes; possible circular import under '{}'",
                self.resolver.max_passes,
                base_dir.display()
            );
            self.exhausted = true;
        }

        resolved
    }

    /// One pass over every directive line.
    fn substitute(&mut self, content: &str, base_dir: &Path, depth: usize) -> String {
        IMPORT_PATTERN
            .replace_all(content, |caps: &Captures<'_>| {
                self.expand_directive(caps, base_dir, depth)
            })
            .into_owned()
    }

    fn expand_directive(&mut self, caps: &Captures<'_>, base_dir: &Path, depth: usize) -> String {
        let indent = &caps["indent"];
        let import_path = &caps["path"];

        if self.exhausted {
            return caps[0].to_string();
        }

        if import_path.contains("..") {
            return self.reject(
                indent,
                ImportIssue::TraversalRejected {
                    path: import_path.to_string(),
                },
            );
        }

        let target = normalize_path(&base_dir.join(import_path));
        if !target.starts_with(&self.root) {
            return self.reject(
                indent,
                ImportIssue::OutsideBaseDir {
                    path: import_path.to_string(),
                },
            );
        }

        if self.resolver.detect_cycles && self.chain.contains(&target) {
            return self.reject(
                indent,
                ImportIssue::Circular {
                    path: import_path.to_string(),
                },
            );
        }

        if depth >= self.resolver.max_passes {
            warn!(
                "Import nesting deeper than {} levels at '{}'",
                self.resolver.max_passes, import_path
            );
            self.exhausted = true;
            return caps[0].to_string();
        }

        let imported = match std::fs::read_to_string(&target) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return self.reject(
                    indent,
                    ImportIssue::FileMissing {
                        path: import_path.to_string(),
                    },
                );
            }
            Err(e) => {
                return self.reject(
                    indent,
                    ImportIssue::ReadFailed {
                        path: import_path.to_string(),
                        message: e.to_string(),
                    },
                );
            }
        };

        debug!("Importing '{}' at depth {}", target.display(), depth + 1);

        let indented = imported
            .lines()
            .map(|line| format!("{indent}{line}"))
            .collect::<Vec<_>>()
            .join("\n");

        let nested_base = target
            .parent()
            .map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);

        self.chain.push(target);
        let expanded = self.expand(&indented, &nested_base, depth + 1);
        self.chain.pop();

        expanded
    }

    fn reject(&mut self, indent: &str, issue: ImportIssue) -> String {
        warn!("Import of '{}' skipped: {}", issue.path(), issue);
        let comment = issue.comment(indent);
        self.issues.push(issue);
        comment
    }
}

/// Make a path absolute against the current directory, then normalize it.
fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize_path(&joined)
}

/// Lexically fold `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pattern_captures_indent_and_path() {
        let caps = IMPORT_PATTERN
            .captures("    - import: \"tasks/common.yml\"")
            .unwrap();
        assert_eq!(&caps["indent"], "    ");
        assert_eq!(&caps["path"], "tasks/common.yml");
    }

    #[test]
    fn test_pattern_ignores_other_keys() {
        assert!(!ImportResolver::has_directives("- import_tasks: common.yml"));
        assert!(!ImportResolver::has_directives("# import: nope.yml trailing"));
        assert!(ImportResolver::has_directives("import: 'a.yml'"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/srv/./play/../books/a.yml")),
            PathBuf::from("/srv/books/a.yml")
        );
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let resolution =
            ImportResolver::new().resolve_with_report("  import: ../../etc/passwd", dir.path());

        assert_eq!(
            resolution.content,
            "  # ERROR: Directory traversal is not allowed."
        );
        assert!(resolution.issues[0].is_path_rejected());
    }

    #[test]
    fn test_absolute_path_outside_base() {
        let dir = TempDir::new().unwrap();
        let out = ImportResolver::new().resolve("import: /etc/hostname", dir.path());
        assert_eq!(out, "# ERROR: Import path is outside the allowed directory.");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let out = ImportResolver::new().resolve("- import: nope.yml", dir.path());
        assert_eq!(out, "# ERROR: Imported file not found at nope.yml");
    }

    #[test]
    fn test_expands_with_indent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ping.yml"), "- name: Ping\n  ping: {}\n").unwrap();

        let out = ImportResolver::new().resolve("tasks:\n  - import: ping.yml\n", dir.path());
        assert_eq!(out, "tasks:\n  - name: Ping\n    ping: {}\n");
    }

    #[test]
    fn test_self_import_terminates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("loop.yml"), "- import: loop.yml\n").unwrap();

        let resolution = ImportResolver::new().resolve_with_report("- import: loop.yml", dir.path());
        assert!(resolution
            .issues
            .iter()
            .any(|i| matches!(i, ImportIssue::Circular { .. })));
        assert!(resolution.converged);
    }

    #[test]
    fn test_self_import_without_cycle_detection_hits_cap() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("loop.yml"), "- import: loop.yml\n").unwrap();

        let resolution = ImportResolver::new()
            .with_cycle_detection(false)
            .resolve_with_report("- import: loop.yml", dir.path());
        assert!(!resolution.converged);
        assert!(resolution.content.contains("import: loop.yml"));
    }
}
