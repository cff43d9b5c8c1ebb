use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failures surfaced at the point of a user action. None are fatal to the
/// session; the user can retry after the condition clears.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("wrong access code")]
    InvalidCode,

    #[error("join blocked for another {remaining_secs}s")]
    CooldownActive { remaining_secs: i64 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCode => StatusCode::BAD_REQUEST,
            AppError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("request failed: {}", self);
        }

        let body = match &self {
            AppError::InvalidCode => json!({
                "error": "invalid_code",
                "detail": "Fel kod!"
            }),
            AppError::CooldownActive { remaining_secs } => json!({
                "error": "cooldown_active",
                "remaining_secs": remaining_secs,
                "detail": format!("Vänta {} sekunder.", remaining_secs)
            }),
            AppError::NotFound(id) => json!({
                "error": "not_found",
                "id": id
            }),
            AppError::Persistence(_) => json!({
                "error": "persistence_failure"
            }),
        };

        (status, Json(body)).into_response()
    }
}
