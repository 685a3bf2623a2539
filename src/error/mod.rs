/**
 * Error Handling
 *
 * This module defines the server error taxonomy and its conversion to HTTP
 * responses.
 *
 * # Error Categories
 *
 * - Authorization errors: a missing bearer token and a presented-but-invalid
 *   token are distinct failures with distinct status codes
 * - Validation errors: a structurally invalid document is rejected before any
 *   persistence is attempted
 * - Persistence errors: write failures are reported to the caller; read
 *   failures degrade to "no data" inside the document store and never reach
 *   this type
 *
 * No error here is fatal. The only fatal condition in the service is the
 * missing admin secret at startup, which is a `server::config::ConfigError`.
 */

pub mod conversion;
pub mod types;

pub use types::ApiError;
