//! In-memory repositories for unit testing.
//!
//! These implement the repository traits without a database so handlers and
//! services can be exercised end to end. Each instance owns its own rows;
//! clones share them.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CategoryRepository, ElementRepository};
use crate::error::{Resource, StoreError, StoreResult};
use crate::model::{Category, CategoryPayload, Element, ElementDetail, ElementPayload};

/// Configuration for mock repository behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Fail every query as if the store were unreachable.
    pub fail_queries: bool,
    /// Reject element writes whose category does not exist, and category
    /// deletes that elements still reference.
    pub enforce_foreign_keys: bool,
}

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory category repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    config: MockConfig,
    table: Arc<RwLock<Table<Category>>>,
    // element id -> category id, maintained by linked element repositories
    references: Arc<RwLock<BTreeMap<i32, i32>>>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            table: Arc::default(),
            references: Arc::default(),
        }
    }

    async fn name_of(&self, id: i32) -> Option<String> {
        self.table.read().await.rows.get(&id).map(|c| c.name.clone())
    }

    async fn link(&self, element_id: i32, category_id: i32) {
        self.references.write().await.insert(element_id, category_id);
    }

    async fn unlink(&self, element_id: i32) {
        self.references.write().await.remove(&element_id);
    }

    async fn is_referenced(&self, id: i32) -> bool {
        self.references.read().await.values().any(|&category_id| category_id == id)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.config.fail_queries {
            return Err(unavailable());
        }
        Ok(())
    }
}

fn category_not_found(id: i32) -> StoreError {
    StoreError::NotFound {
        resource: Resource::Category,
        id,
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        self.check_available()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> StoreResult<Category> {
        self.check_available()?;
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| category_not_found(id))
    }

    async fn create(&self, payload: &CategoryPayload) -> StoreResult<Category> {
        self.check_available()?;
        let mut table = self.table.write().await;
        let category = Category {
            id: table.next_id(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            created_at: Utc::now(),
        };
        table.rows.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: i32, payload: &CategoryPayload) -> StoreResult<Category> {
        self.check_available()?;
        let mut table = self.table.write().await;
        let category = table.rows.get_mut(&id).ok_or_else(|| category_not_found(id))?;
        category.name = payload.name.clone();
        category.description = payload.description.clone();
        Ok(category.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.check_available()?;
        if self.config.enforce_foreign_keys && self.is_referenced(id).await {
            return Err(StoreError::Constraint(format!(
                "category {id} is still referenced by elements"
            )));
        }
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| category_not_found(id))
    }
}

/// In-memory element repository.
///
/// Category names for detail lookups come from the linked category
/// repository, mirroring the LEFT JOIN of the PostgreSQL implementation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryElementRepository {
    config: MockConfig,
    categories: InMemoryCategoryRepository,
    table: Arc<RwLock<Table<Element>>>,
}

impl InMemoryElementRepository {
    /// Create an empty repository joined against `categories`.
    pub fn new(categories: InMemoryCategoryRepository) -> Self {
        Self::with_config(categories, MockConfig::default())
    }

    /// Create an empty repository with custom configuration.
    pub fn with_config(categories: InMemoryCategoryRepository, config: MockConfig) -> Self {
        Self {
            config,
            categories,
            table: Arc::default(),
        }
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.config.fail_queries {
            return Err(unavailable());
        }
        Ok(())
    }

    async fn check_category(&self, category_id: i32) -> StoreResult<()> {
        if self.config.enforce_foreign_keys && self.categories.name_of(category_id).await.is_none() {
            return Err(StoreError::Constraint(format!(
                "category {category_id} does not exist"
            )));
        }
        Ok(())
    }
}

fn element_not_found(id: i32) -> StoreError {
    StoreError::NotFound {
        resource: Resource::Element,
        id,
    }
}

#[async_trait]
impl ElementRepository for InMemoryElementRepository {
    async fn list(&self) -> StoreResult<Vec<Element>> {
        self.check_available()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> StoreResult<ElementDetail> {
        self.check_available()?;
        let element = self
            .table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| element_not_found(id))?;
        let category_name = self.categories.name_of(element.category_id).await;
        Ok(element.into_detail(category_name))
    }

    async fn create(&self, payload: &ElementPayload) -> StoreResult<Element> {
        self.check_available()?;
        self.check_category(payload.category_id).await?;
        let mut table = self.table.write().await;
        let element = Element {
            id: table.next_id(),
            name: payload.name.clone(),
            code: payload.code.clone(),
            category_id: payload.category_id,
            base_value: payload.base_value,
            difficulty_level: payload.difficulty_level.clone(),
            created_at: Utc::now(),
        };
        table.rows.insert(element.id, element.clone());
        drop(table);

        self.categories.link(element.id, element.category_id).await;
        Ok(element)
    }

    async fn update(&self, id: i32, payload: &ElementPayload) -> StoreResult<Element> {
        self.check_available()?;
        self.check_category(payload.category_id).await?;
        let mut table = self.table.write().await;
        let element = table.rows.get_mut(&id).ok_or_else(|| element_not_found(id))?;
        element.name = payload.name.clone();
        element.code = payload.code.clone();
        element.category_id = payload.category_id;
        element.base_value = payload.base_value;
        element.difficulty_level = payload.difficulty_level.clone();
        let element = element.clone();
        drop(table);

        self.categories.link(element.id, element.category_id).await;
        Ok(element)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.check_available()?;
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or_else(|| element_not_found(id))?;
        self.categories.unlink(id).await;
        Ok(())
    }
}
