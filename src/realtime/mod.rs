/**
 * Real-time Fabric
 *
 * This module owns everything about live client connections: the registry
 * that tracks them, the periodic liveness sweep that prunes the dead ones,
 * the broadcast hub that fans out change notifications, and the WebSocket
 * handler that bridges a socket to the registry.
 *
 * Delivery is best-effort and fire-and-forget. There is no replay for
 * missed messages: a client that reconnects re-fetches current state over
 * the HTTP read path.
 */

pub mod broadcast;
pub mod registry;
pub mod ws;

pub use broadcast::{BroadcastHub, Update};
pub use registry::{ConnectionRegistry, Sweeper};
