use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::UserId};

/// Header in which the upstream authentication layer passes the user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller, already authenticated upstream
///
/// This service never checks credentials. Requests without a positive
/// integer in `x-user-id` are rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(UserId)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("missing authenticated user".to_string()))?;

        raw.to_str()
            .ok()
            .and_then(parse_user_id)
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Unauthorized("invalid authenticated user".to_string()))
    }
}
