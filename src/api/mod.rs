//! HTTP API: category and element CRUD routes, health, metrics and docs.

pub mod categories;
pub mod elements;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use error::{ApiError, Operation};
pub use handlers::AppState;
pub use routes::create_router;
