//! `/health` endpoint.

use serde::Serialize;
use std::time::Instant;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Number of configured candidate models.
    pub models: usize,
}

/// Build a health response.
pub fn health_check(started_at: Instant, models: usize) -> HealthResponse {
    HealthResponse {
        status: "ok".into(),
        uptime_secs: started_at.elapsed().as_secs(),
        models,
    }
}
