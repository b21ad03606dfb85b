//! Category service.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::model::{Category, CategoryPayload};
use crate::repository::CategoryRepository;

/// Category operations.
#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> StoreResult<Vec<Category>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> StoreResult<Category> {
        self.repo.get(id).await
    }

    pub async fn create(&self, payload: &CategoryPayload) -> StoreResult<Category> {
        let category = self.repo.create(payload).await?;
        debug!(id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: i32, payload: &CategoryPayload) -> StoreResult<Category> {
        self.repo.update(id, payload).await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        self.repo.delete(id).await?;
        debug!(id, "Category deleted");
        Ok(())
    }
}
