use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use super::{jwt::TokenError, repo_types::User};
use crate::{error::AppError, state::AppState};

/// Resolves the bearer token to the calling user's record.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized("Not authenticated"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized("Not authenticated"))?;

        let claims = state.jwt.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => debug!("expired token"),
                TokenError::Invalid => warn!("invalid token"),
            }
            AppError::Unauthorized("Could not validate credentials")
        })?;

        // Unknown subject is Unauthorized too, so account existence does not leak.
        let user = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!("token subject has no matching user");
                AppError::Unauthorized("Could not validate credentials")
            })?;

        Ok(AuthUser(user))
    }
}
