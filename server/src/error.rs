//! Mapping from store failures to HTTP responses.
//!
//! Only two shapes ever reach a client: 404 `{"error":"Todo not found"}`
//! and 500 with a fixed per-operation message. The underlying error is
//! logged, never serialized.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use todo_core::StoreError;
use utoipa::ToSchema;

pub const NOT_FOUND_MESSAGE: &str = "Todo not found";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"error": "Todo not found"}))]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal {
        message: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Classify a store error, using `message` as the client-facing text if
    /// it is anything other than a missing record.
    pub fn from_store(source: StoreError, message: &'static str) -> Self {
        match source {
            StoreError::NotFound { .. } => ApiError::NotFound,
            source => ApiError::Internal { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound => NOT_FOUND_MESSAGE,
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
                message
            }
        };
        let body = ErrorBody {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
