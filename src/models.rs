//! Request and response bodies for the JSON API.
//!
//! Field names are snake_case on the wire.

use serde::{de, Deserialize, Deserializer, Serialize};

/// User id reported when the caller does not send one
pub const ANONYMOUS_USER: &str = "anonymous";

/// Endpoint tag stamped on every advice response. Both advice routes share it.
pub const WELLNESS_ENDPOINT_TAG: &str = "wellness";

#[derive(Debug, Clone, Deserialize)]
pub struct WellnessRequest {
    pub query: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Accepted for client compatibility; not used when choosing advice.
    #[serde(default, deserialize_with = "lenient_number")]
    pub mood_score: Option<f64>,
    /// Accepted for client compatibility; not used when choosing advice.
    #[serde(default, deserialize_with = "lenient_number")]
    pub stress_level: Option<f64>,
}

/// A numeric signal as clients send it: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept `3`, `3.5` and `"3"` alike; anything else is a decoding error.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got \"{text}\""))),
    }
}

impl WellnessRequest {
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(ANONYMOUS_USER)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessResponse {
    pub query_id: String,
    pub query: String,
    pub response: String,
    pub timestamp: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub service: String,
}

/// Discovery payload served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub description: String,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub health: String,
    pub wellness: String,
    pub ask_wellness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
