/**
 * Login Handler
 *
 * This module implements the admin authentication handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Verify the submitted password against the configured admin secret
 * 2. Mint an opaque session token on success
 * 3. Return the token with the admin role
 *
 * # Security
 *
 * - The secret is verified with bcrypt, so comparison does not depend on how
 *   much of the password matches
 * - Failure reveals nothing beyond pass/fail: the response is a 401 with the
 *   viewer role and no token
 * - No lockout or backoff is applied
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::server::state::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin password
    pub password: String,
}

/// Login response body
///
/// `role` is `"admin"` with a token on success, `"view"` with no token on
/// failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: String,
    pub token: Option<String>,
}

/// Login handler
///
/// # Returns
///
/// `200` with `{role: "admin", token}` when the password matches the
/// configured admin secret, `401` with `{role: "view", token: null}` when it
/// does not.
///
/// # Errors
///
/// * `500 Internal Server Error` - if password verification or token
///   generation itself fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let valid = match bcrypt::verify(&request.password, &state.config.admin_password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("password verification error: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if !valid {
        tracing::warn!("rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                role: "view".to_string(),
                token: None,
            }),
        )
            .into_response();
    }

    match state.sessions.issue() {
        Ok(token) => {
            tracing::info!("admin session issued");
            Json(LoginResponse {
                role: "admin".to_string(),
                token: Some(token),
            })
            .into_response()
        }
        Err(e) => e.into_response(),
    }
}
