//! PostgreSQL element repository.
//!
//! Elements live in `skating_elements`. Detail lookups LEFT JOIN
//! `categories` so an element whose category is gone still resolves, with
//! `category_name` left empty.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{store_failure, ElementRepository};
use crate::error::{Resource, StoreError, StoreResult};
use crate::metrics::timer_store;
use crate::model::{Element, ElementDetail, ElementPayload};

const SELECT_ELEMENTS: &str = "SELECT id, name, code, category_id, base_value, difficulty_level, created_at
     FROM skating_elements
     ORDER BY id";

const SELECT_ELEMENT_DETAIL: &str = "SELECT
    e.id,
    e.name,
    e.code,
    e.category_id,
    c.name AS category_name,
    e.base_value,
    e.difficulty_level,
    e.created_at
FROM skating_elements e
LEFT JOIN categories c ON e.category_id = c.id
WHERE e.id = $1";

const INSERT_ELEMENT: &str = "INSERT INTO skating_elements (name, code, category_id, base_value, difficulty_level)
     VALUES ($1, $2, $3, $4, $5)
     RETURNING id, name, code, category_id, base_value, difficulty_level, created_at";

const UPDATE_ELEMENT: &str = "UPDATE skating_elements
     SET name = $1, code = $2, category_id = $3, base_value = $4, difficulty_level = $5
     WHERE id = $6
     RETURNING id, name, code, category_id, base_value, difficulty_level, created_at";

const DELETE_ELEMENT: &str = "DELETE FROM skating_elements WHERE id = $1";

/// Element repository backed by a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgElementRepository {
    pool: PgPool,
}

impl PgElementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i32) -> StoreError {
    StoreError::NotFound {
        resource: Resource::Element,
        id,
    }
}

#[async_trait]
impl ElementRepository for PgElementRepository {
    async fn list(&self) -> StoreResult<Vec<Element>> {
        let _timer = timer_store("element_list");
        sqlx::query_as::<_, Element>(SELECT_ELEMENTS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_failure("element_list", e))
    }

    async fn get(&self, id: i32) -> StoreResult<ElementDetail> {
        let _timer = timer_store("element_get");
        sqlx::query_as::<_, ElementDetail>(SELECT_ELEMENT_DETAIL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("element_get", e))?
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, payload: &ElementPayload) -> StoreResult<Element> {
        let _timer = timer_store("element_create");
        sqlx::query_as::<_, Element>(INSERT_ELEMENT)
            .bind(&payload.name)
            .bind(&payload.code)
            .bind(payload.category_id)
            .bind(payload.base_value)
            .bind(&payload.difficulty_level)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_failure("element_create", e))
    }

    async fn update(&self, id: i32, payload: &ElementPayload) -> StoreResult<Element> {
        let _timer = timer_store("element_update");
        sqlx::query_as::<_, Element>(UPDATE_ELEMENT)
            .bind(&payload.name)
            .bind(&payload.code)
            .bind(payload.category_id)
            .bind(payload.base_value)
            .bind(&payload.difficulty_level)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_failure("element_update", e))?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let _timer = timer_store("element_delete");
        let result = sqlx::query(DELETE_ELEMENT)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_failure("element_delete", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
