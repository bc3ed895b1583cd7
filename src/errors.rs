use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl AppError {
    /// Status code and JSON body for this error.
    ///
    /// Only `Unauthorized` and `BadRequest` are client errors. Every other
    /// variant comes from storage or from something unexpected and is
    /// reported as a generic server error with the error text attached.
    pub fn to_response(&self) -> (StatusCode, serde_json::Value) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "msg": "Unauthorized" })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "msg": "Server error", "error": other.to_string() }),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(body)).into_response()
    }
}
