//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::playbook::CanonicalPlaybook;

// ============================================================================
// Import Types
// ============================================================================

/// YAML import request body.
#[derive(Debug, Deserialize)]
pub struct ImportTextRequest {
    /// Playbook YAML
    pub content: String,
    /// Drop task attributes (quick import)
    #[serde(default)]
    pub basic: bool,
}

/// Script import request body.
#[derive(Debug, Deserialize)]
pub struct ImportScriptRequest {
    /// Playbook name; generated when absent or blank
    #[serde(default)]
    pub name: Option<String>,
    /// Shell script text
    pub content: String,
}

/// Successful import response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Always "success"
    pub status: String,
    /// The imported playbook
    pub playbook: CanonicalPlaybook,
    /// Number of tasks imported
    pub tasks_count: usize,
    /// Human-readable summary
    pub message: String,
}

impl ImportResponse {
    /// Wrap an imported playbook.
    pub fn new(playbook: CanonicalPlaybook) -> Self {
        let tasks_count = playbook.task_count();
        Self {
            status: "success".to_string(),
            message: format!("Playbook imported successfully with {tasks_count} tasks"),
            tasks_count,
            playbook,
        }
    }
}

// ============================================================================
// Validation / Rendering Types
// ============================================================================

/// YAML validation request body.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    /// Playbook YAML
    pub content: String,
}

/// Rendered YAML response.
#[derive(Debug, Serialize, Deserialize)]
pub struct YamlResponse {
    /// Generated playbook YAML
    pub yaml: String,
}

// ============================================================================
// Health Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version information
    pub version: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    /// API name
    pub name: String,
    /// API version
    pub version: String,
    /// Available endpoints
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    /// HTTP method
    pub method: String,
    /// Path
    pub path: String,
    /// Description
    pub description: String,
}

impl EndpointInfo {
    pub(crate) fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}
