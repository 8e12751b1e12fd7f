use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::services::Identity;
use crate::{error::AppError, state::AppState};

/// Extracts the bearer token and resolves it to the caller's identity.
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?;

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| {
                warn!("malformed Authorization header");
                AppError::Unauthorized
            })?;

        let identity = state.identity.verify(token).await.map_err(|e| {
            warn!(error = %e, "token rejected");
            AppError::Unauthorized
        })?;

        Ok(AuthUser(identity))
    }
}

// Expect "Bearer <token>", scheme matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
