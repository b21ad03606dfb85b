//! Category endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::error::{store_error, ApiError, ErrorResponse, Operation};
use super::handlers::{decode_body, parse_id, AppState, MessageResponse};
use crate::error::Resource;
use crate::model::{Category, CategoryPayload};

/// `GET /api/categories`
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories ordered by id", body = Vec<Category>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .categories
        .list()
        .await
        .map_err(store_error(Operation::Fetch))?;
    Ok(Json(categories))
}

/// `POST /api/categories`
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Malformed body or rejected write", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: CategoryPayload = decode_body(&body)?;
    let category = state
        .categories
        .create(&payload)
        .await
        .map_err(store_error(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /api/categories/{id}`
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such category", body = ErrorResponse),
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&raw_id, Resource::Category)?;
    let category = state
        .categories
        .get(id)
        .await
        .map_err(store_error(Operation::Fetch))?;
    Ok(Json(category))
}

/// `PUT /api/categories/{id}`
///
/// Replaces every writable field; the id always comes from the path.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Invalid id or body, or no such category", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&raw_id, Resource::Category)?;
    let payload: CategoryPayload = decode_body(&body)?;
    let category = state
        .categories
        .update(id, &payload)
        .await
        .map_err(store_error(Operation::Update))?;
    Ok(Json(category))
}

/// `DELETE /api/categories/{id}`
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "No such category, or store failure", body = ErrorResponse),
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&raw_id, Resource::Category)?;
    state
        .categories
        .delete(id)
        .await
        .map_err(store_error(Operation::Delete))?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
