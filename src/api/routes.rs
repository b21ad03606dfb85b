//! HTTP API route definitions.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use super::elements::{create_element, delete_element, get_element, list_elements, update_element};
use super::handlers::{health, prometheus_metrics, unmatched, AppState};
use super::openapi::openapi_json;
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Categories
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        // Elements
        .route("/api/elements", get(list_elements).post(create_element))
        .route(
            "/api/elements/:id",
            get(get_element).put(update_element).delete(delete_element),
        )
        .route_layer(middleware::from_fn(track_http))
        // Probes and docs
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(unmatched)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
