//! HTTP route handlers for the JSON API.
//!
//! Routes are grouped by cache policy. The discovery payload is cacheable,
//! everything else is marked `no-store`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod wellness;

use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer};

use crate::config::{CACHE_CONTROL_DISCOVERY, CACHE_CONTROL_NO_STORE};
use crate::error::AppError;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// JSON body extractor whose rejections are reported as [`AppError`].
///
/// Malformed JSON, missing or mistyped fields and a missing content type all
/// come back as 422 with the decoder's message in `detail`.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// ISO-8601 timestamp used in every response body.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Turn a handler panic into a 500 carrying the panic message.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::Internal(detail).into_response()
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Wrap a finished router in the service-wide layers: panic recovery and
/// the request ID span.
pub fn apply_service_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Discovery - static per deployment
    let discovery_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_DISCOVERY),
        ),
    );

    // Advice and health - fresh on every request
    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/wellness", post(wellness::advise))
        .route("/ask-wellness", post(wellness::ask))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    let router = Router::new()
        .merge(discovery_routes)
        .merge(api_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    apply_service_layers(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_rfc3339_utc() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:00.000000Z");
    }

    #[test]
    fn panics_become_server_errors() {
        let response = panic_response(Box::new("advice exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("owned message")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
