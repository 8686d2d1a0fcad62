use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// AI failures never appear here: the adapter turns them into fallback values.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoSession => AppError::Unauthorized,
            StoreError::WrongRole { .. } => AppError::Forbidden(err.to_string()),
            StoreError::JobNotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::SessionChanged | StoreError::DuplicateId(_) | StoreError::Busy(_) => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Sign in to continue".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::store::BusyKey;

    #[test]
    fn test_store_errors_map_to_http_semantics() {
        let cases = [
            (StoreError::NoSession, StatusCode::UNAUTHORIZED),
            (
                StoreError::WrongRole {
                    expected: UserRole::Admin,
                    actual: UserRole::Seeker,
                },
                StatusCode::FORBIDDEN,
            ),
            (StoreError::JobNotFound("9".to_string()), StatusCode::NOT_FOUND),
            (
                StoreError::Busy(BusyKey::DescriptionAssist),
                StatusCode::CONFLICT,
            ),
            (StoreError::SessionChanged, StatusCode::CONFLICT),
        ];
        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_wrong_role_message_names_both_roles() {
        let err = AppError::from(StoreError::WrongRole {
            expected: UserRole::Admin,
            actual: UserRole::Seeker,
        });
        assert_eq!(
            err.to_string(),
            "Forbidden: This action requires role ADMIN, current role is SEEKER"
        );
    }
}
