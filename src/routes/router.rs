/**
 * Router Configuration
 *
 * This module builds the Axum router.
 *
 * # Routes
 *
 * - `GET  /api/config` - page configuration (no auth)
 * - `POST /api/config` - replace configuration (admin)
 * - `POST /api/auth/login` - admin login
 * - `GET  /api/data/{year}` - calendar document (no auth)
 * - `POST /api/data/{year}` - replace document (admin)
 * - `GET  /ws` - WebSocket upgrade for the live update stream
 *
 * If the configured static directory exists it is served as the fallback
 * (with index.html for directories), so a built client can sit in front of
 * the API. Otherwise unknown routes answer 404.
 */

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::auth::handlers::login;
use crate::calendar::handlers::{get_config, get_data, save_config, save_data};
use crate::realtime::ws::ws_upgrade;
use crate::server::state::AppState;

/// Create the router with all routes configured.
pub fn create_router(state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/api/config", get(get_config).post(save_config))
        .route("/api/auth/login", post(login))
        .route("/api/data/{year}", get(get_data).post(save_data))
        .route("/ws", get(ws_upgrade));

    let static_dir = &state.config.static_dir;
    let router = if static_dir.is_dir() {
        tracing::info!("serving static files from {}", static_dir.display());
        router.fallback_service(
            ServeDir::new(static_dir).append_index_html_on_directories(true),
        )
    } else {
        router.fallback(|| async { "404 Not Found" })
    };

    router.with_state(state)
}
