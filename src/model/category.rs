//! Skating element categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A group of skating elements (e.g. "Spins", "Jumps").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation time, set by the store.
    pub created_at: DateTime<Utc>,
}

/// Writable fields of a category.
///
/// Absent fields decode as empty strings. Create and update both replace
/// every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CategoryPayload {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}
