/**
 * Application State
 *
 * This module defines the state container shared by all handlers and the
 * `FromRef` implementations that let handlers extract just the piece they
 * need.
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and internally synchronized: the stores
 * and the registry share their contents across clones, and the
 * configuration is immutable behind an `Arc`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::sessions::SessionStore;
use crate::calendar::store::DocumentStore;
use crate::realtime::broadcast::BroadcastHub;
use crate::realtime::registry::ConnectionRegistry;
use crate::server::config::ServerConfig;

/// Central state container for the service.
#[derive(Clone)]
pub struct AppState {
    /// Immutable startup configuration
    pub config: Arc<ServerConfig>,

    /// Live admin session tokens
    pub sessions: SessionStore,

    /// File-backed calendar document and configuration records
    pub documents: DocumentStore,

    /// Live WebSocket connections
    pub registry: ConnectionRegistry,

    /// Fan-out of change notifications over the registry
    pub hub: BroadcastHub,
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for DocumentStore {
    fn from_ref(state: &AppState) -> Self {
        state.documents.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

impl FromRef<AppState> for BroadcastHub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}
