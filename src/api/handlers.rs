//! API route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use super::error::ApiResult;
use super::state::AppState;
use super::types::*;
use crate::normalize::NormalizeOptions;
use crate::playbook::CanonicalPlaybook;
use crate::validate::{validate_yaml as validate_text, ValidationReport};

// ============================================================================
// Health & Info Handlers
// ============================================================================

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::version().to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// API info endpoint.
pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfoResponse {
        name: "Ansible Playbook Builder API".to_string(),
        version: crate::version().to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check"),
            EndpointInfo::new(
                "POST",
                "/api/playbooks/import-text",
                "Import a playbook from YAML text",
            ),
            EndpointInfo::new(
                "POST",
                "/api/playbooks/import-script-text",
                "Import a playbook from a shell script",
            ),
            EndpointInfo::new(
                "POST",
                "/api/playbooks/validate-yaml",
                "Validate playbook YAML",
            ),
            EndpointInfo::new(
                "POST",
                "/api/playbooks/yaml",
                "Render a canonical playbook as YAML",
            ),
        ],
    })
}

// ============================================================================
// Import Handlers
// ============================================================================

/// Import a playbook from YAML text.
pub async fn import_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportTextRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let playbook = if req.basic {
        state
            .importer
            .clone()
            .with_normalize_options(NormalizeOptions::basic())
            .import_yaml(&req.content)?
    } else {
        state.importer.import_yaml(&req.content)?
    };

    info!("Imported '{}' from text", playbook.name);
    Ok(Json(ImportResponse::new(playbook)))
}

/// Import a playbook from shell script text.
pub async fn import_script_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportScriptRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let playbook = state
        .importer
        .import_script(req.name.as_deref(), &req.content)?;

    info!("Imported '{}' from script", playbook.name);
    Ok(Json(ImportResponse::new(playbook)))
}

// ============================================================================
// Validation / Rendering Handlers
// ============================================================================

/// Validate playbook YAML. Always 200; the report carries the verdict.
pub async fn validate_yaml(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateRequest>,
) -> Json<ValidationReport> {
    Json(validate_text(&state.importer, &req.content))
}

/// Render a canonical playbook as YAML.
pub async fn generate_yaml(
    State(state): State<Arc<AppState>>,
    Json(playbook): Json<CanonicalPlaybook>,
) -> ApiResult<Json<YamlResponse>> {
    let yaml = state.importer.render(&playbook)?;
    Ok(Json(YamlResponse { yaml }))
}
