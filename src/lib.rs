//! Wallcal - Shared Calendar Server
//!
//! Wallcal is a small self-hosted shared calendar service. Any number of
//! viewers can fetch the per-year calendar document; a single authenticated
//! admin role can replace it; every successful save is persisted to disk and
//! pushed to all connected WebSocket clients in real time.
//!
//! # Module Structure
//!
//! - **`server`** - Bootstrap: environment configuration, application state,
//!   router and background-task wiring
//! - **`auth`** - Admin session store (opaque bearer tokens) and the login
//!   handler
//! - **`calendar`** - The calendar document model, the file-backed document
//!   store, and the read/write HTTP handlers
//! - **`realtime`** - WebSocket connection registry, liveness sweep, and the
//!   broadcast hub that fans out change notifications
//! - **`middleware`** - Bearer-token extraction for admin-only endpoints
//! - **`routes`** - Router assembly
//! - **`error`** - Error taxonomy and HTTP response conversion

pub mod auth;
pub mod calendar;
pub mod error;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod server;
