/**
 * Document Store
 *
 * File-backed persistence for calendar documents and the page configuration.
 *
 * # Layout
 *
 * One JSON file per calendar year under the data directory
 * (`<data_dir>/<year>_data.json`) plus a single `config.json` for the page
 * configuration. The data directory is created on first write.
 *
 * # Read/Write Contract
 *
 * Reads are fail-soft: a missing, unreadable, or corrupt record is reported
 * as absent, never as an error. Writes go to a temporary file first and are
 * renamed into place, so a concurrent reader observes either the old record
 * or the new one, never a partial write. Writes to the same year are
 * serialized through a per-year lock; writes from different admin sessions
 * still race at the document level and the last completed write wins.
 */

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::calendar::document::{CalendarDocument, PageConfig};
use crate::error::ApiError;

/// File-backed store of per-year calendar documents.
///
/// Cloning is cheap; all clones share the same lock table.
#[derive(Clone)]
pub struct DocumentStore {
    data_dir: PathBuf,
    year_locks: Arc<Mutex<HashMap<i32, Arc<tokio::sync::Mutex<()>>>>>,
    config_lock: Arc<tokio::sync::Mutex<()>>,
}

impl DocumentStore {
    /// Create a store rooted at `data_dir`. The directory may not exist yet;
    /// it is created by the first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            year_locks: Arc::new(Mutex::new(HashMap::new())),
            config_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Read the persisted document for `year`.
    ///
    /// Returns `None` if no record exists or the record cannot be read or
    /// parsed. Corruption is logged and treated as absence.
    pub async fn read(&self, year: i32) -> Option<CalendarDocument> {
        read_record(self.year_path(year), &format!("year {year}")).await
    }

    /// Persist `document` as the full record for `year`, replacing any
    /// previous record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` on I/O failure; the previous record is
    /// left intact in that case.
    pub async fn write(&self, year: i32, document: &CalendarDocument) -> Result<(), ApiError> {
        let lock = self.year_lock(year);
        let _guard = lock.lock().await;
        self.write_record(self.year_path(year), document).await
    }

    /// Read the persisted page configuration, if any.
    pub async fn read_config(&self) -> Option<PageConfig> {
        read_record(self.config_path(), "config").await
    }

    /// Persist `config` as the page configuration record.
    pub async fn write_config(&self, config: &PageConfig) -> Result<(), ApiError> {
        let _guard = self.config_lock.lock().await;
        self.write_record(self.config_path(), config).await
    }

    fn year_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(format!("{year}_data.json"))
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    fn year_lock(&self, year: i32) -> Arc<tokio::sync::Mutex<()>> {
        self.year_locks
            .lock()
            .expect("year lock table poisoned")
            .entry(year)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Serialize and atomically replace the record at `path`.
    ///
    /// The caller must hold the lock covering `path`.
    async fn write_record<T: serde::Serialize>(
        &self,
        path: PathBuf,
        record: &T,
    ) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let json = serde_json::to_string_pretty(record)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// Read and parse a JSON record, degrading every failure to `None`.
async fn read_record<T: serde::de::DeserializeOwned>(path: PathBuf, what: &str) -> Option<T> {
    let raw = match tokio::fs::read(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::error!("failed to read record for {what}: {e}");
            return None;
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!("corrupt record for {what}, treating as absent: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::document::{DayEntry, KeyItem};
    use pretty_assertions::assert_eq;

    fn sample_document() -> CalendarDocument {
        let mut day_data = std::collections::BTreeMap::new();
        day_data.insert(
            "2030-06-01".to_string(),
            DayEntry {
                day: 1,
                month: "June".to_string(),
                year: 2030,
                locations: "Lake house".to_string(),
                details: "<p>Opening weekend</p>".to_string(),
                color_id: "cat_1".to_string(),
                icons: Vec::new(),
            },
        );
        CalendarDocument {
            day_data,
            key_items: vec![KeyItem {
                id: "cat_1".to_string(),
                label: "Family".to_string(),
                is_color_key: true,
                color_code: Some("orange".to_string()),
                icon: None,
                icon_color: None,
                show_count: true,
            }],
            last_updated_text: Some("Updated June 1".to_string()),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> DocumentStore {
        DocumentStore::new(dir.path().join("data"))
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let document = sample_document();
        store.write(2030, &document).await.unwrap();

        let loaded = store.read(2030).await.unwrap();
        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_read_missing_year_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.read(1999).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("2030_data.json"), "{ not json").unwrap();

        assert!(store.read(2030).await.is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut document = sample_document();
        store.write(2030, &document).await.unwrap();

        document.last_updated_text = Some("Updated June 2".to_string());
        store.write(2030, &document).await.unwrap();

        let loaded = store.read(2030).await.unwrap();
        assert_eq!(
            loaded.last_updated_text.as_deref(),
            Some("Updated June 2")
        );
    }

    #[tokio::test]
    async fn test_years_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.write(2030, &sample_document()).await.unwrap();
        assert!(store.read(2030).await.is_some());
        assert!(store.read(2031).await.is_none());
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(2030, &sample_document()).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("data"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.read_config().await.is_none());

        let config = PageConfig {
            header_name: Some("Smith Family".to_string()),
            timezone: "America/New_York".to_string(),
            banner_html: None,
        };
        store.write_config(&config).await.unwrap();
        assert_eq!(store.read_config().await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_legacy_record_reads() {
        // Records written by an older revision load with defaults filled in.
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(
            data_dir.join("2027_data.json"),
            r#"{"dayData": {"2027-01-01": {"day": 1, "month": "January",
                "content": [{"icon": "Star"}]}}}"#,
        )
        .unwrap();

        let loaded = store.read(2027).await.unwrap();
        let entry = &loaded.day_data["2027-01-01"];
        assert_eq!(entry.icons[0].value.as_deref(), Some("Star"));
        assert!(loaded.key_items.is_empty());
    }
}
