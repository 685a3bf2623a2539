/**
 * Calendar Documents
 *
 * This module owns the calendar data model, the file-backed document store,
 * and the HTTP handlers for reading and replacing documents and the page
 * configuration.
 *
 * Documents are partitioned by year and replaced wholesale on every save.
 * There is no field-level patching and no merge: the last completed write
 * wins, which is the intended behavior for a single-admin deployment.
 */

pub mod document;
pub mod handlers;
pub mod store;

pub use document::{CalendarDocument, DayEntry, KeyItem, PageConfig};
pub use store::DocumentStore;
