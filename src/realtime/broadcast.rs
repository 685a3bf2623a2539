/**
 * Change Broadcasting
 *
 * This module defines the envelope pushed to WebSocket clients and the hub
 * that fans it out.
 *
 * # Envelope Format
 *
 * ```json
 * {"kind": "DATA_UPDATE",   "payload": {"year": 2030, "data": { ... }}}
 * {"kind": "CONFIG_UPDATE", "payload": { ... }}
 * ```
 *
 * Every envelope carries the complete new state for whatever changed; there
 * are no deltas, matching the whole-document replacement write policy.
 *
 * # Delivery
 *
 * Best-effort and fire-and-forget. Suspect connections still receive pushes;
 * only the liveness sweep removes them. A failed send to one connection
 * never blocks or fails delivery to the others, and nothing is replayed for
 * clients that were disconnected at broadcast time.
 */

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};

use crate::calendar::document::{CalendarDocument, PageConfig};
use crate::realtime::registry::ConnectionRegistry;

/// A change notification pushed to every connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum Update {
    /// The calendar document for a year was replaced.
    #[serde(rename = "DATA_UPDATE")]
    Data { year: i32, data: CalendarDocument },

    /// The page configuration was replaced.
    #[serde(rename = "CONFIG_UPDATE")]
    Config(PageConfig),
}

/// Fans out change notifications to every registered connection.
///
/// The hub only iterates the registry; it never adds or removes members.
#[derive(Clone)]
pub struct BroadcastHub {
    registry: ConnectionRegistry,
}

impl BroadcastHub {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Push `update` to every open connection.
    ///
    /// Returns the number of connections the envelope was handed to. A send
    /// that fails because the peer is mid-teardown is ignored; the sweep or
    /// the socket task will remove the record.
    pub fn notify(&self, update: &Update) -> usize {
        let text = match serde_json::to_string(update) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to serialize update envelope: {e}");
                return 0;
            }
        };

        let delivered = self.registry.for_each_open(|outbound| {
            let _ = outbound.send(Message::Text(text.clone().into()));
        });

        tracing::debug!(subscribers = delivered, "update broadcast");
        delivered
    }
}
