//! Fixed keyword tables that drive module detection and parameter coercion.

/// Task keys that are never treated as the module invocation.
pub const EXCLUDED_TASK_KEYS: &[&str] = &[
    "name",
    "become",
    "when",
    "register",
    "ignore_errors",
    "tags",
    "with_items",
    "loop",
    "until",
    "retries",
    "delay",
    "changed_when",
    "failed_when",
    "notify",
    "vars",
    "environment",
    "delegate_to",
    "run_once",
    "async",
    "poll",
    "block",
    "rescue",
    "always",
];

/// Task attributes carried into canonical tasks when preservation is on.
pub const PRESERVED_TASK_ATTRIBUTES: &[&str] = &[
    "loop",
    "with_items",
    "become",
    "when",
    "delegate_to",
    "register",
    "ignore_errors",
    "failed_when",
    "changed_when",
    "run_once",
    "retries",
    "until",
    "delay",
    "notify",
    "tags",
    "environment",
    "vars",
    "async",
    "poll",
    "no_log",
    "loop_control",
];

/// Modules whose scalar argument is a command line.
pub const COMMAND_MODULES: &[&str] = &["command", "shell"];

/// Modules whose scalar argument is a package name.
pub const PACKAGE_MODULES: &[&str] = &["apt", "yum", "package"];

/// Modules whose scalar argument is a destination path.
pub const FILE_TRANSFER_MODULES: &[&str] = &["copy", "template"];

/// Module used for role references.
pub const ROLE_MODULE: &str = "include_role";

/// Words dropped from an `apt-get install` line when collecting packages.
pub const APT_EXCLUDED_WORDS: &[&str] = &["apt-get", "apt", "install", "sudo", "-y", "--yes"];

/// Words dropped from a `yum install` line when collecting packages.
pub const YUM_EXCLUDED_WORDS: &[&str] = &["yum", "install", "sudo", "-y"];

/// Shell operators that end the package list of an install line.
pub const SHELL_OPERATORS: &[&str] = &["&&", "||", ";", "|"];

/// Lookup tables used by the normalizer.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTables {
    /// Keys skipped during module detection
    pub excluded_task_keys: &'static [&'static str],
    /// Attributes preserved on canonical tasks
    pub preserved_attributes: &'static [&'static str],
    /// See [`COMMAND_MODULES`]
    pub command_modules: &'static [&'static str],
    /// See [`PACKAGE_MODULES`]
    pub package_modules: &'static [&'static str],
    /// See [`FILE_TRANSFER_MODULES`]
    pub file_transfer_modules: &'static [&'static str],
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            excluded_task_keys: EXCLUDED_TASK_KEYS,
            preserved_attributes: PRESERVED_TASK_ATTRIBUTES,
            command_modules: COMMAND_MODULES,
            package_modules: PACKAGE_MODULES,
            file_transfer_modules: FILE_TRANSFER_MODULES,
        }
    }
}

impl KeywordTables {
    /// Returns true if `key` can never name the module of a task.
    ///
    /// Preserved attributes count as reserved too, so `no_log` placed before
    /// the module key is not mistaken for it.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.excluded_task_keys.contains(&key) || self.preserved_attributes.contains(&key)
    }

    /// Classify a module for scalar-argument coercion.
    pub fn scalar_kind(&self, module: &str) -> ScalarKind {
        if self.command_modules.contains(&module) {
            ScalarKind::Command
        } else if self.package_modules.contains(&module) {
            ScalarKind::Package
        } else if self.file_transfer_modules.contains(&module) {
            ScalarKind::FileTransfer
        } else {
            ScalarKind::Name
        }
    }
}

/// How a bare string module argument is turned into parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `{cmd: s}`
    Command,
    /// `{name: s, state: present}`
    Package,
    /// `{src: "", dest: s}`
    FileTransfer,
    /// `{name: s}`
    Name,
}
