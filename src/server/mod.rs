/**
 * Server Bootstrap
 *
 * This module wires the service together: environment configuration, the
 * shared application state, and the router plus background tasks.
 */

pub mod config;
pub mod init;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, App};
pub use state::AppState;
