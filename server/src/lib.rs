//! HTTP front end for the todo store.
//!
//! # Overview
//! Five JSON endpoints under `/api/todos` plus generated API docs under
//! `/api-docs`. Handlers delegate to [`TodoStore`]; nothing is kept in
//! process memory between requests.
//!
//! # Design
//! - The store handle is router state, built once by the caller.
//! - [`app`] is usable without a socket, so tests drive it with
//!   `tower::ServiceExt::oneshot`; [`run`] binds it to a listener.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;

use std::future::Future;

use axum::routing::get;
use axum::Router;
use todo_core::{StoreError, TodoStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

pub use config::Config;
pub use error::{ApiError, ErrorBody};

pub const API_PREFIX: &str = "/api/todos";

fn todo_routes() -> Router<TodoStore> {
    Router::new()
        .route("/", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
}

/// `/api/todos/` with a trailing slash; the nested `/` route only matches
/// the bare prefix.
const API_PREFIX_SLASH: &str = "/api/todos/";

fn router(store: TodoStore, doc: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        .nest(API_PREFIX, todo_routes())
        .route(
            API_PREFIX_SLASH,
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .with_state(store)
        .merge(docs::router(doc))
        .layer(TraceLayer::new_for_http())
}

/// The full application router over `store`.
pub fn app(store: TodoStore) -> Router {
    router(store, docs::ApiDoc::openapi())
}

/// Check the database is reachable and create the schema if needed.
pub async fn prepare_storage(store: &TodoStore) -> Result<(), StoreError> {
    store.ping().await?;
    info!("database connected");
    store.ensure_schema().await?;
    info!("database schema ready");
    Ok(())
}

/// Serve the application on `listener` until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    store: TodoStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let port = listener.local_addr()?.port();
    let app = router(store, docs::openapi(port));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
