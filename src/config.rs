//! Configuration module for ansible-builder
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - User configuration (`<config dir>/ansible-builder/config.toml`)
//! - Project configuration (`./ansible-builder.{toml,yml,yaml,json}`)
//! - `ANSIBLE_BUILDER_CONFIG`
//! - Environment variable overrides (`ANSIBLE_BUILDER_*`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Import directive resolution
    pub imports: ImportConfig,

    /// YAML task normalization
    pub normalizer: NormalizerConfig,

    /// Shell script splitting
    pub script: ScriptConfig,

    /// YAML rendering
    pub render: RenderConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Import directive settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Directory that every imported file must live under
    pub base_dir: PathBuf,

    /// Maximum number of substitution passes (and nesting depth)
    pub max_passes: usize,

    /// Emit an error comment when a file imports itself through a cycle
    pub detect_cycles: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            max_passes: 10,
            detect_cycles: true,
        }
    }
}

/// Normalizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Carry task attributes (`when`, `loop`, ...) into canonical tasks
    pub preserve_attributes: bool,

    /// Name given to tasks without one
    pub default_task_name: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            preserve_attributes: true,
            default_task_name: "Unnamed task".to_string(),
        }
    }
}

/// Script splitter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Block name used until the first comment
    pub default_block_name: String,

    /// Interpreter passed to the shell module
    pub executable: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            default_block_name: "Run shell commands".to_string(),
            executable: "/bin/bash".to_string(),
        }
    }
}

/// Renderer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Re-emit preserved task attributes in generated YAML
    pub include_task_attributes: bool,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_address: String,

    /// Whether to enable permissive CORS
    pub enable_cors: bool,

    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            enable_cors: true,
            max_body_size: 10 * 1024 * 1024,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::config(path, "file not found"));
            }
        }

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Get the list of configuration file paths to check, lowest precedence first
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = Vec::new();

        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("ansible-builder").join("config.toml"));
        }

        for name in [
            "ansible-builder.toml",
            "ansible-builder.yml",
            "ansible-builder.yaml",
            "ansible-builder.json",
        ] {
            paths.push(PathBuf::from(name));
        }

        if let Ok(env_config) = std::env::var("ANSIBLE_BUILDER_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(path, format!("failed to read: {e}")))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => {
                serde_yaml::from_str(&content).map_err(|e| Error::config(path, e.to_string()))?
            }
            "json" => {
                serde_json::from_str(&content).map_err(|e| Error::config(path, e.to_string()))?
            }
            _ => toml::from_str(&content)
                .map_err(|e| e.to_string())
                .or_else(|_| serde_yaml::from_str(&content).map_err(|e| e.to_string()))
                .map_err(|e| Error::config(path, e))?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; sections that differ from the
    /// defaults in `other` take precedence.
    fn merge(&self, other: Config) -> Config {
        fn pick<T: Default + PartialEq + Clone>(base: &T, other: T) -> T {
            if other == T::default() {
                base.clone()
            } else {
                other
            }
        }

        Config {
            imports: pick(&self.imports, other.imports),
            normalizer: pick(&self.normalizer, other.normalizer),
            script: pick(&self.script, other.script),
            render: pick(&self.render, other.render),
            server: pick(&self.server, other.server),
            logging: pick(&self.logging, other.logging),
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // ANSIBLE_BUILDER_IMPORT_BASE_DIR
        if let Ok(dir) = std::env::var("ANSIBLE_BUILDER_IMPORT_BASE_DIR") {
            self.imports.base_dir = PathBuf::from(dir);
        }

        // ANSIBLE_BUILDER_MAX_IMPORT_PASSES
        if let Ok(passes) = std::env::var("ANSIBLE_BUILDER_MAX_IMPORT_PASSES") {
            if let Ok(n) = passes.parse() {
                self.imports.max_passes = n;
            }
        }

        // ANSIBLE_BUILDER_RENDER_ATTRIBUTES
        if let Ok(value) = std::env::var("ANSIBLE_BUILDER_RENDER_ATTRIBUTES") {
            self.render.include_task_attributes =
                matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        // ANSIBLE_BUILDER_BIND
        if let Ok(addr) = std::env::var("ANSIBLE_BUILDER_BIND") {
            self.server.bind_address = addr;
        }

        // ANSIBLE_BUILDER_LOG_FORMAT
        if let Ok(format) = std::env::var("ANSIBLE_BUILDER_LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "json" => self.logging.format = LogFormat::Json,
                "text" => self.logging.format = LogFormat::Text,
                _ => {}
            }
        }
    }

    /// Load from a specific file without consulting the standard locations
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }
}
