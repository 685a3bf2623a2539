/**
 * Calendar HTTP Handlers
 *
 * Read and write handlers for calendar documents and the page configuration.
 *
 * # Endpoints
 *
 * - `GET  /api/config` - current page configuration (no auth)
 * - `POST /api/config` - replace the configuration (admin)
 * - `GET  /api/data/{year}` - full document for a year (no auth)
 * - `POST /api/data/{year}` - replace the document for a year (admin)
 *
 * Reads never hard-fail on missing data: an unknown year answers with an
 * empty object sentinel and the configuration falls back to the environment
 * defaults. Writes validate shape first, persist second, broadcast third,
 * and only then answer the writer, so the writer's success response and the
 * viewers' notifications describe the same persisted state.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::calendar::document::{CalendarDocument, PageConfig};
use crate::error::ApiError;
use crate::middleware::auth::AdminSession;
use crate::realtime::broadcast::Update;
use crate::server::state::AppState;

/// GET /api/config
///
/// Returns the persisted page configuration, or the environment-seeded
/// defaults if none has been saved yet. Never fails.
pub async fn get_config(State(state): State<AppState>) -> Json<PageConfig> {
    let config = state
        .documents
        .read_config()
        .await
        .unwrap_or_else(|| state.config.page_defaults.clone());
    Json(config)
}

/// POST /api/config (admin)
///
/// Replaces the page configuration wholesale, persists it, and notifies all
/// connected clients with a `CONFIG_UPDATE` envelope.
pub async fn save_config(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(config): Json<PageConfig>,
) -> Result<&'static str, ApiError> {
    state.documents.write_config(&config).await?;

    let delivered = state.hub.notify(&Update::Config(config));
    tracing::info!(subscribers = delivered, "page configuration replaced");

    Ok("Config saved successfully.")
}

/// GET /api/data/{year}
///
/// Returns the full calendar document for `year`, or `{}` if no document has
/// ever been saved for it. Clients build the empty calendar skeleton
/// themselves; nothing is persisted by a read.
pub async fn get_data(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Json<serde_json::Value> {
    let payload = match state.documents.read(year).await {
        Some(document) => match serde_json::to_value(&document) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(year, "failed to serialize document: {e}");
                serde_json::json!({})
            }
        },
        None => serde_json::json!({}),
    };
    Json(payload)
}

/// POST /api/data/{year} (admin)
///
/// Validates the submitted document shape, persists it as the full record
/// for `year`, and notifies all connected clients with a `DATA_UPDATE`
/// envelope carrying the complete new document.
///
/// # Errors
///
/// * `400 Bad Request` - missing required top-level fields or too many
///   categories; nothing is persisted
/// * `500 Internal Server Error` - the record could not be written; the
///   previous record is untouched
pub async fn save_data(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Json(payload): Json<serde_json::Value>,
) -> Result<&'static str, ApiError> {
    let document = CalendarDocument::from_payload(payload)?;

    state.documents.write(year, &document).await?;

    let delivered = state.hub.notify(&Update::Data {
        year,
        data: document,
    });
    tracing::info!(year, subscribers = delivered, "calendar document saved");

    Ok("Data saved successfully.")
}
