//! HTTP error responses and the mapping from store errors to status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

use crate::error::{Resource, StoreError};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
}

/// Operation a store error came from. Not-found maps to a different status
/// depending on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List or get-by-id.
    Fetch,
    /// Insert.
    Create,
    /// Full replace of an existing row.
    Update,
    /// Removal of an existing row.
    Delete,
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path identifier is not an integer.
    #[error("Invalid {0} ID")]
    InvalidId(Resource),

    /// Body is not valid JSON for the resource.
    #[error("Invalid request body")]
    InvalidBody,

    /// Lookup matched no row.
    #[error("{0}")]
    NotFound(String),

    /// Write rejected.
    #[error("{0}")]
    BadRequest(String),

    /// Store failure, or a delete that matched no row.
    #[error("{0}")]
    Internal(String),
}

const INTERNAL_MESSAGE: &str = "Internal server error";
const CONSTRAINT_MESSAGE: &str = "Request violates a data constraint";

impl ApiError {
    /// Map a store error to its HTTP shape for the given operation.
    ///
    /// | store error | fetch | create/update | delete |
    /// |---|---|---|---|
    /// | not found | 404 | 400 | 500 |
    /// | constraint | 400 | 400 | 400 |
    /// | database | 500 | 500 | 500 |
    ///
    /// Delete-not-found shares 500 with store failures but keeps its own
    /// message.
    pub fn from_store(err: StoreError, operation: Operation) -> Self {
        match err {
            StoreError::NotFound { resource, id } => {
                let message = format!("{resource} not found");
                match operation {
                    Operation::Fetch => ApiError::NotFound(message),
                    Operation::Create | Operation::Update => ApiError::BadRequest(message),
                    Operation::Delete => {
                        warn!(%resource, id, "Delete matched no row");
                        ApiError::Internal(message)
                    }
                }
            }
            StoreError::Constraint(_) => ApiError::BadRequest(CONSTRAINT_MESSAGE.to_string()),
            StoreError::Database(_) => ApiError::Internal(INTERNAL_MESSAGE.to_string()),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Closure adapter for `map_err`.
pub fn store_error(operation: Operation) -> impl Fn(StoreError) -> ApiError {
    move |err| ApiError::from_store(err, operation)
}
