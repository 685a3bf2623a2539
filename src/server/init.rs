/**
 * Server Initialization
 *
 * This module assembles the service from its parts.
 *
 * # Initialization Steps
 *
 * 1. Create the connection registry and the broadcast hub over it
 * 2. Create the session store and the document store
 * 3. Build the router with the shared state
 * 4. Spawn the liveness sweep task
 *
 * The returned `App` owns the sweep handle; the binary aborts it after the
 * listener shuts down so no timer outlives the service.
 */

use std::sync::Arc;

use axum::Router;

use crate::auth::sessions::{SessionStore, SESSION_TTL};
use crate::calendar::store::DocumentStore;
use crate::realtime::broadcast::BroadcastHub;
use crate::realtime::registry::{ConnectionRegistry, Sweeper, SWEEP_PERIOD};
use crate::routes::router::create_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

/// The assembled service: router, shared state, and the sweep task handle.
pub struct App {
    pub router: Router<()>,
    pub state: AppState,
    pub sweeper: Sweeper,
}

/// Assemble the service from `config`.
///
/// Must be called from within a Tokio runtime (the liveness sweep task is
/// spawned here).
pub fn create_app(config: ServerConfig) -> App {
    tracing::info!("initializing wallcal server");

    let registry = ConnectionRegistry::new();
    let hub = BroadcastHub::new(registry.clone());
    let sessions = SessionStore::new(SESSION_TTL);
    let documents = DocumentStore::new(config.data_dir.clone());

    let state = AppState {
        config: Arc::new(config),
        sessions,
        documents,
        registry: registry.clone(),
        hub,
    };

    let router = create_router(state.clone());
    let sweeper = Sweeper::spawn(registry, SWEEP_PERIOD);

    tracing::info!("router configured, liveness sweep running");

    App {
        router,
        state,
        sweeper,
    }
}
