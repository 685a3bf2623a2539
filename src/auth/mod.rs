/**
 * Authentication
 *
 * This module owns admin authentication: the session store that issues and
 * validates opaque bearer tokens, and the login handler.
 *
 * There is a single admin role backed by a single configured secret. Viewers
 * never authenticate; read endpoints are open.
 */

pub mod handlers;
pub mod sessions;

pub use sessions::SessionStore;
