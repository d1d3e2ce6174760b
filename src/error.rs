use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface, mapped onto one HTTP status and a
/// `{"error": message}` body. Store and hashing internals are redacted from
/// the client; the raw error goes to the log instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// Identical for unknown email and wrong password, so a login attempt
    /// cannot reveal whether an account exists.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    Store(#[from] sqlx::Error),

    #[error("Password hashing error")]
    PasswordHash(String),

    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidCredentials | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::PasswordHash(_) | ApiError::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => error!(error = %e, "store error"),
            ApiError::Jwt(e) => error!(error = %e, "jwt error"),
            _ => {}
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failures_are_indistinguishable() {
        // Unknown email and wrong password must map to the same status and
        // message, whatever caused them.
        let unknown_email = ApiError::InvalidCredentials;
        let wrong_password = ApiError::InvalidCredentials;
        assert_eq!(unknown_email.status(), wrong_password.status());
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_failures_map_to_unauthorized() {
        for err in [
            ApiError::MissingToken,
            ApiError::InvalidToken,
            ApiError::TokenExpired,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn store_errors_are_redacted() {
        let err = ApiError::Store(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Database error");
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = ApiError::NotFound("Budget");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Budget not found");
    }

    #[test]
    fn conflict_is_a_bad_request_with_its_message() {
        let err = ApiError::Conflict("Email already exists.".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Email already exists.");
    }
}
