//! Error types for the todo store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because every id-addressed operation
//! must report "the record does not exist" distinctly from a storage fault.
//! Callers match on the variant; nothing inspects error messages.

use thiserror::Error;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No todo with this id exists.
    #[error("todo {id} not found")]
    NotFound { id: i64 },

    /// The database rejected or failed the statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
