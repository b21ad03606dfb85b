//! Shared handler state, probes and request decoding helpers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use super::error::ApiError;
use crate::error::Resource;
use crate::repository::{
    CategoryRepository, ElementRepository, InMemoryCategoryRepository, InMemoryElementRepository,
    PgCategoryRepository, PgElementRepository,
};
use crate::service::{CategoryService, ElementService};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Category operations.
    pub categories: CategoryService,
    /// Element operations.
    pub elements: ElementService,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state over arbitrary repositories.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        elements: Arc<dyn ElementRepository>,
    ) -> Self {
        Self {
            categories: CategoryService::new(categories),
            elements: ElementService::new(elements),
            metrics: None,
        }
    }

    /// App state backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCategoryRepository::new(pool.clone())),
            Arc::new(PgElementRepository::new(pool)),
        )
    }

    /// App state backed by in-memory repositories.
    pub fn in_memory() -> Self {
        let categories = InMemoryCategoryRepository::new();
        let elements = InMemoryElementRepository::new(categories.clone());
        Self::new(Arc::new(categories), Arc::new(elements))
    }

    /// Expose the given Prometheus handle on `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "OK".
    pub status: String,
    /// Service banner.
    pub message: String,
}

/// Confirmation returned by deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Figure Skating Elements API Running".to_string(),
    })
}

/// Prometheus exposition, 404 when no recorder is installed.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => ApiError::NotFound("metrics recorder not installed".to_string()).into_response(),
    }
}

/// Requests no route matched.
///
/// Anything under an item prefix (`/api/elements/`, `/api/elements/1/2`)
/// carries a malformed identifier: item methods get 400, others 405.
pub async fn unmatched(method: Method, uri: Uri) -> Response {
    let path = uri.path();
    let resource = if path.starts_with("/api/categories/") {
        Resource::Category
    } else if path.starts_with("/api/elements/") {
        Resource::Element
    } else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if method == Method::GET || method == Method::PUT || method == Method::DELETE {
        ApiError::InvalidId(resource).into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

/// Parse a path segment as a resource identifier.
pub fn parse_id(raw: &str, resource: Resource) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::InvalidId(resource))
}

/// Decode a JSON request body.
///
/// Content-Type is not checked; only the bytes matter.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryPayload;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42", Resource::Category).unwrap(), 42);
        assert_eq!(parse_id("-1", Resource::Category).unwrap(), -1);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for raw in ["abc", "", "1.5", "99999999999"] {
            let err = parse_id(raw, Resource::Element).unwrap_err();
            assert_eq!(err.to_string(), "Invalid element ID");
        }
    }

    #[test]
    fn decode_body_rejects_malformed_json() {
        let err = decode_body::<CategoryPayload>(&Bytes::from_static(b"{not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody));
        assert!(decode_body::<CategoryPayload>(&Bytes::new()).is_err());
    }
}
