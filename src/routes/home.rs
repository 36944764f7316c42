//! Discovery payload describing the service and its routes.

use axum::{extract::State, Json};

use crate::models::{Endpoints, ServiceInfo};
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    let service = &state.config.service;
    Json(ServiceInfo {
        message: service.title.clone(),
        description: service.description.clone(),
        version: service.version.clone(),
        endpoints: Endpoints {
            health: "GET /health".to_string(),
            wellness: "POST /wellness".to_string(),
            ask_wellness: "POST /ask-wellness".to_string(),
        },
    })
}
