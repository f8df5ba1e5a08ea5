//! Application state management.

use std::time::Instant;

use super::ApiConfig;
use crate::importer::PlaybookImporter;

/// Shared application state.
///
/// Read-only after construction, so handlers share it through an `Arc`
/// without locking.
pub struct AppState {
    /// Import pipeline
    pub importer: PlaybookImporter,
    /// API configuration
    pub config: ApiConfig,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: ApiConfig, importer: PlaybookImporter) -> Self {
        Self {
            importer,
            config,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
