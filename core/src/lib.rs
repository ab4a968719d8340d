//! Todo records and their SQLite persistence.
//!
//! # Overview
//! `TodoStore` is the persistence gateway for the todo service: it lists,
//! reads, creates, updates and deletes rows in the `todos` table and reports
//! missing ids as `StoreError::NotFound`.
//!
//! # Design
//! - The store is an explicit handle built at startup and passed down; there
//!   is no global connection.
//! - Types double as API schemas (serde + utoipa) so the HTTP layer does not
//!   need a second set of DTOs.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::{StoreConfig, TodoStore};
pub use types::{CreateTodo, Todo, UpdateTodo};
