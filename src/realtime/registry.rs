/**
 * Connection Registry and Liveness Sweep
 *
 * Tracks live WebSocket connections and prunes unresponsive ones.
 *
 * # Per-connection State Machine
 *
 * ```text
 * Connecting -> Open(alive) -> Open(suspect) -> Closed
 * ```
 *
 * A connection enters alive on registration. Each sweep tick demotes every
 * alive connection to suspect and sends it a protocol Ping; a Pong promotes
 * it back to alive. A connection still suspect at the next tick is
 * terminated and dropped from the registry, so a silent peer is gone within
 * two sweep intervals while a responsive one is never touched. Transport
 * close or error removes the connection immediately, independent of sweep
 * timing.
 *
 * # Ownership
 *
 * Membership is mutated only through `add` / `remove` / `sweep` here. The
 * broadcast hub iterates connections through `for_each_open` and never
 * mutates the set.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use uuid::Uuid;

/// Interval between liveness sweeps.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(30);

/// Sending half of a connection's outbound message channel.
///
/// The socket task owns the receiving half; dropping the sender is how the
/// registry terminates a connection.
pub type Outbound = mpsc::UnboundedSender<Message>;

struct ConnectionRecord {
    outbound: Outbound,
    alive: bool,
    last_pong: Option<DateTime<Utc>>,
}

/// Registry of live WebSocket connections.
///
/// Cloning is cheap; all clones share the same connection set.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<Uuid, ConnectionRecord>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened connection. Returns its identity.
    pub fn add(&self, outbound: Outbound) -> Uuid {
        let id = Uuid::new_v4();
        self.connections.lock().expect("registry lock poisoned").insert(
            id,
            ConnectionRecord {
                outbound,
                alive: true,
                last_pong: None,
            },
        );
        tracing::info!(connection = %id, "client connected");
        id
    }

    /// Remove a connection, typically on transport close or error.
    pub fn remove(&self, id: &Uuid) {
        if self
            .connections
            .lock()
            .expect("registry lock poisoned")
            .remove(id)
            .is_some()
        {
            tracing::info!(connection = %id, "client disconnected");
        }
    }

    /// Record a liveness acknowledgement: suspect goes back to alive.
    pub fn record_pong(&self, id: &Uuid) {
        if let Some(record) = self
            .connections
            .lock()
            .expect("registry lock poisoned")
            .get_mut(id)
        {
            record.alive = true;
            record.last_pong = Some(Utc::now());
        }
    }

    /// Run one sweep tick.
    ///
    /// Every connection still suspect from the previous tick is terminated
    /// and removed; every alive connection is demoted to suspect and sent a
    /// Ping. Returns the number of terminated connections.
    pub fn sweep(&self) -> usize {
        let mut connections = self.connections.lock().expect("registry lock poisoned");
        let before = connections.len();

        connections.retain(|id, record| {
            if !record.alive {
                tracing::info!(
                    connection = %id,
                    last_pong = ?record.last_pong,
                    "terminating unresponsive connection"
                );
                return false;
            }
            record.alive = false;
            let _ = record.outbound.send(Message::Ping(Bytes::new()));
            true
        });

        before - connections.len()
    }

    /// Visit the outbound handle of every open connection (alive or
    /// suspect). Returns how many were visited.
    pub fn for_each_open<F: FnMut(&Outbound)>(&self, mut visit: F) -> usize {
        let connections = self.connections.lock().expect("registry lock poisoned");
        for record in connections.values() {
            visit(&record.outbound);
        }
        connections.len()
    }

    /// Number of registered connections.
    pub fn count(&self) -> usize {
        self.connections.lock().expect("registry lock poisoned").len()
    }
}

/// Handle to the periodic liveness sweep task.
///
/// Owned by the application lifecycle: spawned at startup, aborted on
/// shutdown (or when the handle is dropped) so no timer outlives the
/// service.
pub struct Sweeper {
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn the sweep task over `registry`, ticking every `period`.
    pub fn spawn(registry: ConnectionRegistry, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; skip it so connections get a
            // full period before their first probe.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let terminated = registry.sweep();
                if terminated > 0 {
                    tracing::debug!(terminated, "liveness sweep pruned connections");
                }
            }
        });
        Self { handle }
    }

    /// Stop the sweep task.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
