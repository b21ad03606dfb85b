//! Storage layer.
//!
//! This module handles:
//! - Repository traits the services depend on
//! - PostgreSQL implementations issuing parameterized SQL through `sqlx`
//! - In-memory implementations for testing without a database
//!
//! Every write that matches no row surfaces as [`StoreError::NotFound`]
//! instead of succeeding silently.
//!
//! [`StoreError::NotFound`]: crate::error::StoreError::NotFound

pub mod category_repo;
pub mod element_repo;
pub mod mock;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::error::{StoreError, StoreResult};
use crate::metrics::inc_store_errors;
use crate::model::{Category, CategoryPayload, Element, ElementDetail, ElementPayload};

pub use category_repo::PgCategoryRepository;
pub use element_repo::PgElementRepository;
pub use mock::{InMemoryCategoryRepository, InMemoryElementRepository, MockConfig};

/// Repository interface for category CRUD operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    async fn list(&self) -> StoreResult<Vec<Category>>;
    /// Fetch a single category.
    async fn get(&self, id: i32) -> StoreResult<Category>;
    /// Insert a category; the store assigns `id` and `created_at`.
    async fn create(&self, payload: &CategoryPayload) -> StoreResult<Category>;
    /// Replace the writable fields of an existing category.
    async fn update(&self, id: i32, payload: &CategoryPayload) -> StoreResult<Category>;
    /// Remove a category.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

/// Repository interface for element CRUD operations.
#[async_trait]
pub trait ElementRepository: Send + Sync {
    /// All elements ordered by id, without category names.
    async fn list(&self) -> StoreResult<Vec<Element>>;
    /// Fetch a single element joined with its category name.
    async fn get(&self, id: i32) -> StoreResult<ElementDetail>;
    /// Insert an element; the store assigns `id` and `created_at`.
    async fn create(&self, payload: &ElementPayload) -> StoreResult<Element>;
    /// Replace the writable fields of an existing element.
    async fn update(&self, id: i32, payload: &ElementPayload) -> StoreResult<Element>;
    /// Remove an element.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

/// Translate a driver error, counting and logging it against `operation`.
pub(crate) fn store_failure(operation: &'static str, err: sqlx::Error) -> StoreError {
    let err = StoreError::from(err);
    inc_store_errors(operation, err.kind());
    match &err {
        StoreError::Constraint(message) => warn!(operation, %message, "Store rejected write"),
        _ => error!(operation, error = %err, "Store query failed"),
    }
    err
}
