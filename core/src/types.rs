//! Domain types for todo records.
//!
//! # Design
//! `Todo` is both the row shape read back from SQLite and the JSON body
//! returned by the API, so it derives `sqlx::FromRow` alongside serde.
//! Wire names are camelCase (`createdAt`, `updatedAt`) while the columns
//! stay snake_case.
//!
//! `CreateTodo` and `UpdateTodo` are the only inputs the store accepts.
//! Neither carries an id or timestamps; those are owned by storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "title": "My Todo",
    "description": "This is a todo",
    "completed": false,
    "createdAt": "2023-01-01T00:00:00Z",
    "updatedAt": "2023-01-01T00:00:00Z"
}))]
pub struct Todo {
    /// Assigned by storage on insert, never reused.
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo. New todos always start with `completed = false`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for an existing todo. Only the fields present are
/// applied; omitted (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
