use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure raised by a reply generator.
#[derive(Debug, Clone, thiserror::Error)]
#[error("generation failed: {message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced while handling a chat request.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A session was resolved but its transcript is gone. Never expected.
    #[error("session not found: {0}")]
    NotFound(String),

    /// A handler panicked before producing a response.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ChatError::Generation(_) | ChatError::NotFound(_) | ChatError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
