/**
 * Admin Authorization
 *
 * This module guards write endpoints. It extracts the bearer token from the
 * Authorization header and checks it against the session store.
 *
 * The two failure modes are deliberately distinct:
 *
 * - No token supplied (missing header, malformed header, empty token)
 *   answers `401`, telling the client to log in.
 * - A token supplied but unknown or expired answers `403`, telling the
 *   client its credential is stale. The token is also revoked so the stale
 *   credential cannot linger in the store.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::ApiError;
use crate::server::state::AppState;

/// Extractor proving the request carries a live admin session.
///
/// Use as a handler argument on admin-only endpoints; rejection produces
/// the appropriate 401/403 response before the handler body runs.
#[derive(Clone, Debug)]
pub struct AdminSession {
    /// The validated bearer token
    pub token: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;

        if !state.sessions.validate(token) {
            tracing::warn!("rejected request with invalid or expired token");
            state.sessions.revoke(token);
            return Err(ApiError::InvalidToken);
        }

        Ok(AdminSession {
            token: token.to_string(),
        })
    }
}
