use super::common::HttpError;
use crate::api::error::ApiError;
use crate::domain::types::UserRole;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

// ==========================================
// Identity set by the upstream auth gateway
// ==========================================
// The service does no authentication of its own; it trusts
// these headers and only checks they are present.

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn new(user_id: &str, role: UserRole) -> Self {
        Self {
            user_id: user_id.to_string(),
            role,
        }
    }

    pub fn from_parts(parts: &Parts) -> Result<Self, HttpError> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id = header(USER_ID_HEADER).ok_or(ApiError::Unauthenticated)?;
        let role = header(USER_ROLE_HEADER)
            .map(UserRole::from_header)
            .unwrap_or_default();

        Ok(Self::new(user_id, role))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)
    }
}
