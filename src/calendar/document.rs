/**
 * Calendar Document Model
 *
 * This module defines the per-year calendar document and the page
 * configuration, together with the shape validation applied at the write
 * boundary.
 *
 * # Document Shape
 *
 * ```json
 * {
 *   "dayData":         { "2030-06-01": { ... }, ... },
 *   "keyItems":        [ { "id": "cat_1", ... }, ... ],
 *   "lastUpdatedText": "Updated June 1"
 * }
 * ```
 *
 * All three top-level keys must be present for a save to be accepted.
 * Everything below the top level is lenient: missing inner fields take
 * defaults, and two legacy spellings are still accepted on read (`content`
 * for a day's icon list, `icon` for an icon reference's `value`). Writes
 * always serialize the canonical names.
 *
 * # Reference Integrity
 *
 * `colorId` and icon references are logical foreign keys into `keyItems`.
 * They are not checked here: a key item deleted after being referenced
 * simply renders as unknown on the client, it never fails a read or write.
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Upper bound on category-type key items in one document.
pub const MAX_CATEGORIES: usize = 5;

/// The full persisted record for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDocument {
    /// Day entries keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub day_data: BTreeMap<String, DayEntry>,

    /// Legend entries: categories and activity icons, in display order
    #[serde(default)]
    pub key_items: Vec<KeyItem>,

    /// Free-text "last updated" marker shown to viewers
    #[serde(default)]
    pub last_updated_text: Option<String>,
}

impl CalendarDocument {
    /// Validate a submitted save body and convert it into a document.
    ///
    /// This is the write-boundary gate: the three top-level keys must be
    /// present (`dayData`, `keyItems`, `lastUpdatedText`) and the category
    /// count must not exceed [`MAX_CATEGORIES`]. Reads go through plain
    /// deserialization instead and stay permissive.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without touching storage.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, ApiError> {
        for field in ["dayData", "keyItems", "lastUpdatedText"] {
            if payload.get(field).is_none() {
                return Err(ApiError::validation(format!(
                    "missing required field `{field}`"
                )));
            }
        }

        let document: CalendarDocument = serde_json::from_value(payload)
            .map_err(|e| ApiError::validation(format!("malformed document: {e}")))?;

        let categories = document.categories().count();
        if categories > MAX_CATEGORIES {
            return Err(ApiError::validation(format!(
                "at most {MAX_CATEGORIES} categories are allowed, got {categories}"
            )));
        }

        Ok(document)
    }

    /// Key items that color day cells.
    pub fn categories(&self) -> impl Iterator<Item = &KeyItem> {
        self.key_items.iter().filter(|item| item.is_color_key)
    }
}

/// One day's record inside a calendar document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub year: i32,
    /// Comma-separated location text
    #[serde(default)]
    pub locations: String,
    /// Rich-text detail body
    #[serde(default)]
    pub details: String,
    /// Category reference, `"none"` when uncolored
    #[serde(default = "default_color_id")]
    pub color_id: String,
    /// Ordered activity icon references; `content` is the legacy spelling
    #[serde(default, alias = "content")]
    pub icons: Vec<IconRef>,
}

fn default_color_id() -> String {
    "none".to_string()
}

/// Reference to an activity icon in a day entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRef {
    /// Icon name; `icon` is the legacy spelling
    #[serde(default, alias = "icon", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Icon color class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A legend entry: either a day-coloring category or a selectable activity
/// icon, discriminated by `is_color_key`. Order in the list is display order
/// and is preserved through saves verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// `true` for categories, `false` for activity icons
    #[serde(default)]
    pub is_color_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Whether the legend shows an aggregate count for this item
    #[serde(default)]
    pub show_count: bool,
}

/// Page-level configuration, independent of any year.
///
/// Seeded from environment defaults at startup, replaceable at runtime via
/// POST /api/config, persisted as its own durable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default)]
    pub header_name: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub banner_html: Option<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_name: None,
            timezone: default_timezone(),
            banner_html: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_payload() -> serde_json::Value {
        json!({
            "dayData": {
                "2030-06-01": {
                    "day": 1,
                    "month": "June",
                    "year": 2030,
                    "locations": "Lake house",
                    "details": "<p>Opening weekend</p>",
                    "colorId": "cat_1",
                    "icons": [{"value": "Star", "color": "text-red-600"}]
                }
            },
            "keyItems": [
                {"id": "cat_1", "label": "Family", "isColorKey": true,
                 "colorCode": "orange", "showCount": true}
            ],
            "lastUpdatedText": "Updated June 1"
        })
    }

    #[test]
    fn test_valid_payload_accepted() {
        let document = CalendarDocument::from_payload(valid_payload()).unwrap();
        assert_eq!(document.day_data.len(), 1);
        assert_eq!(document.key_items.len(), 1);
        assert_eq!(document.last_updated_text.as_deref(), Some("Updated June 1"));

        let entry = &document.day_data["2030-06-01"];
        assert_eq!(entry.color_id, "cat_1");
        assert_eq!(entry.icons[0].value.as_deref(), Some("Star"));
    }

    #[test]
    fn test_missing_day_data_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("dayData");
        let error = CalendarDocument::from_payload(payload).unwrap_err();
        assert!(error.to_string().contains("dayData"));
    }

    #[test]
    fn test_missing_key_items_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("keyItems");
        let error = CalendarDocument::from_payload(payload).unwrap_err();
        assert!(error.to_string().contains("keyItems"));
    }

    #[test]
    fn test_missing_last_updated_rejected() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("lastUpdatedText");
        assert!(CalendarDocument::from_payload(payload).is_err());
    }

    #[test]
    fn test_null_last_updated_accepted() {
        // The key must be present, but null is a defined value.
        let mut payload = valid_payload();
        payload["lastUpdatedText"] = json!(null);
        let document = CalendarDocument::from_payload(payload).unwrap();
        assert_eq!(document.last_updated_text, None);
    }

    #[test]
    fn test_category_cap_enforced() {
        let mut payload = valid_payload();
        let items: Vec<_> = (0..MAX_CATEGORIES + 1)
            .map(|i| json!({"id": format!("cat_{i}"), "label": "C", "isColorKey": true}))
            .collect();
        payload["keyItems"] = json!(items);
        assert!(CalendarDocument::from_payload(payload).is_err());
    }

    #[test]
    fn test_activity_items_do_not_count_toward_cap() {
        let mut payload = valid_payload();
        let items: Vec<_> = (0..MAX_CATEGORIES + 3)
            .map(|i| json!({"id": format!("icon_{i}"), "label": "A", "isColorKey": false}))
            .collect();
        payload["keyItems"] = json!(items);
        assert!(CalendarDocument::from_payload(payload).is_ok());
    }

    #[test]
    fn test_legacy_day_entry_shape_reads() {
        // Old documents stored the icon list as `content` with `icon` keys.
        let raw = json!({
            "dayData": {
                "2027-03-14": {
                    "day": 14,
                    "month": "March",
                    "year": 2027,
                    "content": [{"icon": "Star", "color": "text-blue-600"}]
                }
            },
            "keyItems": [],
            "lastUpdatedText": ""
        });

        let document: CalendarDocument = serde_json::from_value(raw).unwrap();
        let entry = &document.day_data["2027-03-14"];
        assert_eq!(entry.icons[0].value.as_deref(), Some("Star"));
        assert_eq!(entry.color_id, "none");
        assert_eq!(entry.locations, "");
    }

    #[test]
    fn test_read_is_permissive_about_missing_top_level_fields() {
        // A persisted record predating the current shape still loads.
        let raw = json!({"dayData": {}});
        let document: CalendarDocument = serde_json::from_value(raw).unwrap();
        assert!(document.key_items.is_empty());
        assert_eq!(document.last_updated_text, None);
    }

    #[test]
    fn test_write_serializes_canonical_names() {
        let document = CalendarDocument::from_payload(valid_payload()).unwrap();
        let out = serde_json::to_value(&document).unwrap();
        let entry = &out["dayData"]["2030-06-01"];
        assert!(entry.get("icons").is_some());
        assert!(entry.get("content").is_none());
        assert!(entry["icons"][0].get("value").is_some());
    }

    #[test]
    fn test_key_item_order_preserved() {
        let mut payload = valid_payload();
        payload["keyItems"] = json!([
            {"id": "b", "label": "B", "isColorKey": true},
            {"id": "a", "label": "A", "isColorKey": true},
            {"id": "c", "label": "C", "isColorKey": false}
        ]);
        let document = CalendarDocument::from_payload(payload).unwrap();
        let ids: Vec<_> = document.key_items.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_document_round_trips() {
        let document = CalendarDocument::from_payload(valid_payload()).unwrap();
        let json = serde_json::to_string(&document).unwrap();
        let back: CalendarDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document, back);
    }

    #[test]
    fn test_page_config_defaults() {
        let config: PageConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.header_name, None);
    }

    #[test]
    fn test_page_config_serializes_nulls() {
        // Viewers expect every key present, null when unset.
        let out = serde_json::to_value(PageConfig::default()).unwrap();
        assert!(out.get("headerName").is_some());
        assert!(out["headerName"].is_null());
        assert_eq!(out["timezone"], "UTC");
    }
}
