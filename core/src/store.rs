//! SQLite-backed persistence for todo records.
//!
//! # Design
//! `TodoStore` wraps a `SqlitePool` and is the only code that touches the
//! `todos` table. It is constructed once at startup and cloned into each
//! request's state; clones share the pool.
//!
//! Every id-addressed operation resolves a missing row to
//! `StoreError::NotFound`. Mutations run as a single statement with
//! `RETURNING`, so the caller sees the committed row without a second read.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::StoreError;
use crate::types::{CreateTodo, Todo, UpdateTodo};

const CREATE_TODOS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT NOT NULL,
        description TEXT,
        completed   BOOLEAN NOT NULL DEFAULT 0,
        created_at  DATETIME NOT NULL,
        updated_at  DATETIME NOT NULL
    )";

/// Where the database lives and how many connections may be open to it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./db.sqlite"),
            max_connections: 5,
        }
    }
}

/// Handle to the todo table. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Build a store over the database file in `config`, creating the file
    /// if needed. No connection is opened until the first query, so this
    /// never fails; use [`TodoStore::ping`] to check reachability.
    ///
    /// Every new connection creates the `todos` table if it is missing, so
    /// a database that only becomes reachable after startup still serves.
    pub fn connect(config: &StoreConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query(CREATE_TODOS_TABLE).execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect_lazy_with(options);
        Self { pool }
    }

    /// A private in-memory database with the schema already created.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to exactly one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Round-trip a trivial query to verify the database is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the `todos` table if it does not exist yet. Safe to repeat.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TODOS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Every todo, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed, created_at, updated_at
             FROM todos
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, completed, created_at, updated_at
             FROM todos
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    /// Insert a new todo with `completed = false` and both timestamps set
    /// to now. Returns the stored row including its assigned id.
    pub async fn create(&self, input: CreateTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description, completed, created_at, updated_at)
             VALUES (?, ?, 0, ?, ?)
             RETURNING id, title, description, completed, created_at, updated_at",
        )
        .bind(input.title)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = todo.id, "created todo");
        Ok(todo)
    }

    /// Apply the fields present in `patch` and refresh `updated_at`.
    pub async fn update(&self, id: i64, patch: UpdateTodo) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos
             SET title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 completed = COALESCE(?, completed),
                 updated_at = ?
             WHERE id = ?
             RETURNING id, title, description, completed, created_at, updated_at",
        )
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.completed)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })?;
        debug!(id, "updated todo");
        Ok(todo)
    }

    /// Permanently remove the todo. Its id is never handed out again.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    async fn store() -> TodoStore {
        TodoStore::in_memory().await.unwrap()
    }

    fn create(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = store().await;
        let created = store.create(create("A")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.title, "A");
        assert!(created.description.is_none());
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_keeps_description() {
        let store = store().await;
        let created = store
            .create(CreateTodo {
                title: "Groceries".to_string(),
                description: Some("milk, eggs".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.description.as_deref(), Some("milk, eggs"));
    }

    #[tokio::test]
    async fn partial_update_only_touches_supplied_fields() {
        let store = store().await;
        let created = store
            .create(CreateTodo {
                title: "Walk dog".to_string(),
                description: Some("around the block".to_string()),
            })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        let patch = UpdateTodo {
            completed: Some(true),
            ..UpdateTodo::default()
        };
        let updated = store.update(created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Walk dog");
        assert_eq!(updated.description.as_deref(), Some("around the block"));
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_can_change_title_and_description() {
        let store = store().await;
        let created = store.create(create("Old")).await.unwrap();
        let patch = UpdateTodo {
            title: Some("New".to_string()),
            description: Some("details".to_string()),
            completed: None,
        };
        let updated = store.update(created.id, patch).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description.as_deref(), Some("details"));
        assert!(!updated.completed);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = store().await;
        store.create(create("present")).await.unwrap();

        for id in [0, 2, 42, -1] {
            assert!(matches!(
                store.get_by_id(id).await,
                Err(StoreError::NotFound { id: missing }) if missing == id
            ));
            assert!(store
                .update(id, UpdateTodo::default())
                .await
                .unwrap_err()
                .is_not_found());
            assert!(store.delete(id).await.unwrap_err().is_not_found());
        }
    }

    #[tokio::test]
    async fn delete_is_terminal() {
        let store = store().await;
        let created = store.create(create("gone soon")).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(store.get_by_id(created.id).await.unwrap_err().is_not_found());
        assert!(store.delete(created.id).await.unwrap_err().is_not_found());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = store().await;
        let first = store.create(create("one")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(create("two")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_returns_every_created_todo() {
        let store = store().await;
        assert!(store.list_all().await.unwrap().is_empty());

        let mut ids = Vec::new();
        for n in 0..5 {
            ids.push(store.create(create(&format!("todo {n}"))).await.unwrap().id);
        }

        let listed: Vec<i64> = store.list_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = store().await;
        store.create(create("kept")).await.unwrap();
        store.ensure_schema().await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn store_recovers_once_database_becomes_reachable() {
        let dir = tempfile::tempdir().unwrap();
        let later = dir.path().join("later");
        let config = StoreConfig {
            path: later.join("db.sqlite"),
            ..StoreConfig::default()
        };
        let store = TodoStore::connect(&config);
        assert!(store.ping().await.is_err());

        std::fs::create_dir(&later).unwrap();

        let created = store.create(create("after recovery")).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![created]);
        store.close().await;
    }

    #[tokio::test]
    async fn unreachable_database_fails_ping_without_failing_connect() {
        let config = StoreConfig {
            path: PathBuf::from("/nonexistent-dir/for/todo/db.sqlite"),
            ..StoreConfig::default()
        };
        let store = TodoStore::connect(&config);
        assert!(matches!(store.ping().await, Err(StoreError::Database(_))));
    }
}
