//! REST API server for ansible-builder.
//!
//! Exposes the import pipeline to the playbook builder UI.
//!
//! # Endpoints
//!
//! - `GET /health`, `GET /`
//! - `POST /api/playbooks/import-text`: YAML text to canonical playbook
//! - `POST /api/playbooks/import-script-text`: shell script to canonical playbook
//! - `POST /api/playbooks/validate-yaml`: validation report
//! - `POST /api/playbooks/yaml`: canonical playbook to YAML
//!
//! # Example
//!
//! ```rust,ignore
//! use ansible_builder::api::{ApiConfig, ApiServer};
//! use ansible_builder::config::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let server = ApiServer::new(ApiConfig::default(), &config);
//!     server.run().await.unwrap();
//! }
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::importer::PlaybookImporter;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;
pub use types::*;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address to bind the server to
    pub bind_address: SocketAddr,
    /// Whether to enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            enable_cors: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ApiConfig {
    /// Build from the `[server]` configuration section.
    pub fn from_server_config(config: &ServerConfig) -> crate::error::Result<Self> {
        let bind_address = config.bind_address.parse().map_err(|e| {
            crate::error::Error::Internal(format!(
                "invalid bind address '{}': {e}",
                config.bind_address
            ))
        })?;

        Ok(Self {
            bind_address,
            enable_cors: config.enable_cors,
            max_body_size: config.max_body_size,
        })
    }

    /// Set the bind address.
    pub fn with_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }
}

/// The main API server.
pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server from application configuration.
    pub fn new(config: ApiConfig, app_config: &Config) -> Self {
        let state = Arc::new(AppState::new(
            config.clone(),
            PlaybookImporter::new(app_config),
        ));
        Self { config, state }
    }

    /// Create a new API server with existing state.
    pub fn with_state(config: ApiConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Build the router with all routes.
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .merge(routes::api_routes(self.state.clone()))
            .layer(DefaultBodyLimit::max(self.config.max_body_size));

        // Add CORS layer if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        // Add tracing layer
        app = app.layer(TraceLayer::new_for_http());

        app
    }

    /// Run the API server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.config.bind_address;
        let router = self.router();

        info!("Starting ansible-builder API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await
    }

    /// Get the server state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }
}
