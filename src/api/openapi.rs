//! OpenAPI document for the HTTP surface.

use axum::Json;
use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::handlers::{HealthResponse, MessageResponse};
use super::{categories, elements, handlers};
use crate::model::{Category, CategoryPayload, Element, ElementDetail, ElementPayload};

#[derive(OpenApi)]
#[openapi(
    info(title = "Figure Skating Elements API"),
    paths(
        handlers::health,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        elements::list_elements,
        elements::create_element,
        elements::get_element,
        elements::update_element,
        elements::delete_element,
    ),
    components(schemas(
        Category,
        CategoryPayload,
        Element,
        ElementDetail,
        ElementPayload,
        ErrorResponse,
        HealthResponse,
        MessageResponse,
    )),
    tags(
        (name = "categories", description = "Skating element categories"),
        (name = "elements", description = "Skating elements"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/categories",
            "/api/categories/{id}",
            "/api/elements",
            "/api/elements/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
