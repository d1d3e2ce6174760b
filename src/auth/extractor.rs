use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and validates the bearer token, yielding the caller's user id.
pub struct AuthUser(pub i32);

impl AuthUser {
    /// A caller may only touch their own resources. Every handler that takes
    /// a target user id (path or body) runs this before any store access.
    pub fn authorize(&self, user_id: i32) -> Result<(), ApiError> {
        if self.0 != user_id {
            warn!(caller = self.0, target = user_id, "ownership check failed");
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(ApiError::InvalidToken)?;

        let claims = keys.verify(token).map_err(|e| {
            warn!("invalid or expired token");
            e
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_accepts_own_id() {
        assert!(AuthUser(7).authorize(7).is_ok());
    }

    #[test]
    fn authorize_rejects_other_id() {
        let err = AuthUser(7).authorize(8).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }
}
