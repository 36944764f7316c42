//! Advice handlers.
//!
//! `/wellness` is the primary route. `/ask-wellness` is kept for older clients
//! and runs exactly the same code path, endpoint tag included.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::{iso_timestamp, ApiJson};
use crate::error::AppError;
use crate::models::{WellnessRequest, WellnessResponse, WELLNESS_ENDPOINT_TAG};
use crate::state::AppState;

/// Answer a wellness query with the advice for its topic.
#[instrument(
    name = "wellness::advise",
    skip(state, request),
    fields(user_id = %request.user_id())
)]
pub async fn advise(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<WellnessRequest>,
) -> Result<Json<WellnessResponse>, AppError> {
    respond(&state, request).map(Json)
}

/// Alias of [`advise`] for clients of the comprehensive route.
#[instrument(
    name = "wellness::ask",
    skip(state, request),
    fields(user_id = %request.user_id())
)]
pub async fn ask(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<WellnessRequest>,
) -> Result<Json<WellnessResponse>, AppError> {
    respond(&state, request).map(Json)
}

fn respond(state: &AppState, request: WellnessRequest) -> Result<WellnessResponse, AppError> {
    if request.query.is_empty() {
        return Err(AppError::Validation {
            field: "query",
            reason: "must be a non-empty string",
        });
    }

    let advice = state.advisor.advise(&request.query)?;
    tracing::debug!(
        topic = ?advice.topic,
        mood_score = ?request.mood_score,
        stress_level = ?request.stress_level,
        "Advice selected"
    );

    Ok(WellnessResponse {
        query_id: Uuid::new_v4().to_string(),
        query: request.query,
        response: advice.text,
        timestamp: iso_timestamp(Utc::now()),
        endpoint: WELLNESS_ENDPOINT_TAG.to_string(),
    })
}
