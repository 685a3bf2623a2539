//! Request middleware: admin bearer-token extraction.

pub mod auth;

pub use auth::AdminSession;
