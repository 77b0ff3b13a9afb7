//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::auth::AuthError;

// Errors

/// Error surface shared by every handler. Each variant carries the
/// status code the front-end depends on; anything unexpected falls into
/// `Internal` and becomes a logged 500.
pub enum ApiError {
    Unauthorized(String),
    RateLimited(String),
    BadRequest(String),
    CapacityExceeded,
    NotFound,
    Internal(anyhow::Error),
}

impl ApiError {
    /// Gate errors map onto HTTP statuses here rather than via `From`,
    /// which would collide with the blanket anyhow conversion.
    pub fn from_auth(err: AuthError) -> Self {
        match err {
            AuthError::WrongPin { .. } => Self::Unauthorized(err.to_string()),
            AuthError::TooManyAttempts | AuthError::Banned { .. } => {
                Self::RateLimited(err.to_string())
            }
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::CapacityExceeded => (
                StatusCode::BAD_REQUEST,
                "Maximum de 3 messages actifs atteint".to_string(),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "Message introuvable".to_string()),
            Self::Internal(err) => {
                // Always log unexpected faults
                tracing::error!("{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Une erreur est survenue".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod messages {
    pub use crate::api::routes::messages::public::*;
}

pub mod time {
    pub use crate::api::routes::time::public::*;
}
