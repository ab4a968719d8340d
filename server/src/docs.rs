//! Generated OpenAPI document and the Swagger UI page that renders it.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use todo_core::{CreateTodo, Todo, UpdateTodo};
use utoipa::openapi::server::ServerBuilder;
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API", version = "1.0.0", description = "A simple Todo API"),
    paths(
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(Todo, CreateTodo, UpdateTodo, ErrorBody)),
    tags((name = "todos", description = "Todo management"))
)]
pub struct ApiDoc;

/// The API document with a development server entry for `port`.
pub fn openapi(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(format!("http://localhost:{port}"))
        .description(Some("Development server"))
        .build()]);
    doc
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Todo API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub fn router(doc: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        .route(DOCS_PATH, get(swagger_ui))
        .route(OPENAPI_JSON_PATH, get(openapi_json))
        .with_state(Arc::new(doc))
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

async fn openapi_json(
    State(doc): State<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(doc.as_ref().clone())
}
