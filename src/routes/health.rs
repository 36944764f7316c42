//! Health check endpoint for container orchestration.
//!
//! A liveness probe: it only checks that the process can respond to HTTP and
//! never reflects request history.

use axum::{extract::State, Json};
use chrono::Utc;

use super::iso_timestamp;
use crate::models::HealthStatus;
use crate::state::AppState;

pub const HEALTHY: &str = "healthy";

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let service = &state.config.service;
    Json(HealthStatus {
        status: HEALTHY.to_string(),
        timestamp: iso_timestamp(Utc::now()),
        version: service.version.clone(),
        service: service.name.clone(),
    })
}
