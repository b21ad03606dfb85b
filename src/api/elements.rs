//! Element endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::error::{store_error, ApiError, ErrorResponse, Operation};
use super::handlers::{decode_body, parse_id, AppState, MessageResponse};
use crate::error::Resource;
use crate::model::{Element, ElementDetail, ElementPayload};

/// `GET /api/elements`
#[utoipa::path(
    get,
    path = "/api/elements",
    tag = "elements",
    responses(
        (status = 200, description = "All elements ordered by id", body = Vec<Element>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_elements(State(state): State<AppState>) -> Result<Json<Vec<Element>>, ApiError> {
    let elements = state
        .elements
        .list()
        .await
        .map_err(store_error(Operation::Fetch))?;
    Ok(Json(elements))
}

/// `POST /api/elements`
#[utoipa::path(
    post,
    path = "/api/elements",
    tag = "elements",
    request_body = ElementPayload,
    responses(
        (status = 201, description = "Element created", body = Element),
        (status = 400, description = "Malformed body or unknown category", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_element(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: ElementPayload = decode_body(&body)?;
    let element = state
        .elements
        .create(&payload)
        .await
        .map_err(store_error(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(element)))
}

/// `GET /api/elements/{id}`
///
/// Resolves even when the category is gone; `category_name` is then omitted.
#[utoipa::path(
    get,
    path = "/api/elements/{id}",
    tag = "elements",
    params(("id" = i32, Path, description = "Element id")),
    responses(
        (status = 200, description = "Element with its category name", body = ElementDetail),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such element", body = ErrorResponse),
    )
)]
pub async fn get_element(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ElementDetail>, ApiError> {
    let id = parse_id(&raw_id, Resource::Element)?;
    let detail = state
        .elements
        .get(id)
        .await
        .map_err(store_error(Operation::Fetch))?;
    Ok(Json(detail))
}

/// `PUT /api/elements/{id}`
#[utoipa::path(
    put,
    path = "/api/elements/{id}",
    tag = "elements",
    params(("id" = i32, Path, description = "Element id")),
    request_body = ElementPayload,
    responses(
        (status = 200, description = "Updated element", body = Element),
        (status = 400, description = "Invalid id or body, unknown category, or no such element", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_element(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Element>, ApiError> {
    let id = parse_id(&raw_id, Resource::Element)?;
    let payload: ElementPayload = decode_body(&body)?;
    let element = state
        .elements
        .update(id, &payload)
        .await
        .map_err(store_error(Operation::Update))?;
    Ok(Json(element))
}

/// `DELETE /api/elements/{id}`
#[utoipa::path(
    delete,
    path = "/api/elements/{id}",
    tag = "elements",
    params(("id" = i32, Path, description = "Element id")),
    responses(
        (status = 200, description = "Element deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "No such element, or store failure", body = ErrorResponse),
    )
)]
pub async fn delete_element(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id, Resource::Element)?;
    state
        .elements
        .delete(id)
        .await
        .map_err(store_error(Operation::Delete))?;
    Ok(Json(MessageResponse::new("Element deleted successfully")))
}
