//! Skating elements and their category-joined detail view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single skating element (stored in `skating_elements`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Element {
    /// Store-assigned identifier.
    pub id: i32,
    /// Display name, e.g. "Triple Axel".
    pub name: String,
    /// Short scoring code, e.g. "3A".
    pub code: String,
    /// Owning category.
    pub category_id: i32,
    /// Base value in points.
    pub base_value: f64,
    /// Free-form difficulty label.
    pub difficulty_level: String,
    /// Creation time, set by the store.
    pub created_at: DateTime<Utc>,
}

/// Element joined with the name of its category.
///
/// `category_name` is `None` when `category_id` references no category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ElementDetail {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub category_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub base_value: f64,
    pub difficulty_level: String,
    pub created_at: DateTime<Utc>,
}

/// Writable fields of an element. Updates replace all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ElementPayload {
    pub name: String,
    pub code: String,
    pub category_id: i32,
    pub base_value: f64,
    pub difficulty_level: String,
}

impl Element {
    /// Attach a category name to build the detail view.
    pub fn into_detail(self, category_name: Option<String>) -> ElementDetail {
        ElementDetail {
            id: self.id,
            name: self.name,
            code: self.code,
            category_id: self.category_id,
            category_name,
            base_value: self.base_value,
            difficulty_level: self.difficulty_level,
            created_at: self.created_at,
        }
    }
}
