//! PostgreSQL category repository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{store_failure, CategoryRepository};
use crate::error::{Resource, StoreError, StoreResult};
use crate::metrics::timer_store;
use crate::model::{Category, CategoryPayload};

const SELECT_CATEGORIES: &str =
    "SELECT id, name, description, created_at FROM categories ORDER BY id";

const SELECT_CATEGORY: &str =
    "SELECT id, name, description, created_at FROM categories WHERE id = $1";

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, description) VALUES ($1, $2)
     RETURNING id, name, description, created_at";

const UPDATE_CATEGORY: &str = "UPDATE categories SET name = $1, description = $2 WHERE id = $3
     RETURNING id, name, description, created_at";

const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = $1";

/// Category repository backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i32) -> StoreError {
    StoreError::NotFound {
        resource: Resource::Category,
        id,
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let _timer = timer_store("category_list");
        sqlx::query_as::<_, Category>(SELECT_CATEGORIES)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_failure("category_list", e))
    }

    async fn get(&self, id: i32) -> StoreResult<Category> {
        let _timer = timer_store("category_get");
        sqlx::query_as::<_, Category>(SELECT_CATEGORY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("category_get", e))?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, payload: &CategoryPayload) -> StoreResult<Category> {
        let _timer = timer_store("category_create");
        sqlx::query_as::<_, Category>(INSERT_CATEGORY)
            .bind(&payload.name)
            .bind(&payload.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_failure("category_create", e))
    }

    async fn update(&self, id: i32, payload: &CategoryPayload) -> StoreResult<Category> {
        let _timer = timer_store("category_update");
        sqlx::query_as::<_, Category>(UPDATE_CATEGORY)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("category_update", e))?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let _timer = timer_store("category_delete");
        let result = sqlx::query(DELETE_CATEGORY)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_failure("category_delete", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
