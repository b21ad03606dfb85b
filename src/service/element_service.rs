//! Element service.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::model::{Element, ElementDetail, ElementPayload};
use crate::repository::ElementRepository;

/// Element operations.
#[derive(Clone)]
pub struct ElementService {
    repo: Arc<dyn ElementRepository>,
}

impl ElementService {
    pub fn new(repo: Arc<dyn ElementRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> StoreResult<Vec<Element>> {
        self.repo.list().await
    }

    /// Element joined with its category name.
    pub async fn get(&self, id: i32) -> StoreResult<ElementDetail> {
        self.repo.get(id).await
    }

    pub async fn create(&self, payload: &ElementPayload) -> StoreResult<Element> {
        let element = self.repo.create(payload).await?;
        debug!(id = element.id, code = %element.code, "Element created");
        Ok(element)
    }

    pub async fn update(&self, id: i32, payload: &ElementPayload) -> StoreResult<Element> {
        self.repo.update(id, payload).await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        self.repo.delete(id).await?;
        debug!(id, "Element deleted");
        Ok(())
    }
}
