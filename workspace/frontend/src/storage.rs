//! Browser side of the prediction history: `window.localStorage` as the
//! key/value backend and the CSV file download.

use common::error::{HistoryError, Result};
use common::history::{self, HistoryStore, KeyValueStore};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// `window.localStorage` as a [`KeyValueStore`].
///
/// Every call looks the storage object up again, so a missing window or
/// disabled storage shows up as a per-call error instead of at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| HistoryError::Storage("no window available".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| HistoryError::Storage("local storage is disabled".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> HistoryError {
    HistoryError::Storage(format!("{:?}", value))
}

/// Record id from the wall clock and `Math.random`.
fn next_record_id() -> String {
    history::generate_id(js_sys::Date::now() as u64, js_sys::Math::random())
}

/// The history store backed by local storage.
pub fn history_store() -> HistoryStore<BrowserStorage> {
    HistoryStore::new(BrowserStorage, next_record_id)
}

/// Downloads the CSV export as `diabetes_predictions_<date>.csv`.
/// Does nothing when the history is empty.
pub fn download_csv() -> std::result::Result<(), String> {
    let csv = history_store().export_to_csv();
    if csv.is_empty() {
        log::debug!("CSV export skipped, history is empty");
        return Ok(());
    }

    let file_name = export_file_name(chrono::Utc::now());
    trigger_download(&csv, &file_name).map_err(|e| {
        let error_msg = format!("Failed to export CSV: {:?}", e);
        log::error!("{}", error_msg);
        error_msg
    })?;

    log::info!("Exported prediction history to {}", file_name);
    Ok(())
}

/// Export file name for the UTC calendar day of `now`.
fn export_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    history::csv_file_name(now.date_naive())
}

fn trigger_download(contents: &str, file_name: &str) -> std::result::Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(contents));

    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let href = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&href);
    link.set_download(file_name);
    link.click();

    Url::revoke_object_url(&href)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_file_name_uses_utc_day() {
        let late_evening = Utc.with_ymd_and_hms(2024, 6, 9, 23, 30, 0).unwrap();
        assert_eq!(export_file_name(late_evening), "diabetes_predictions_2024-06-09.csv");

        let after_midnight = Utc.with_ymd_and_hms(2024, 6, 10, 0, 5, 0).unwrap();
        assert_eq!(export_file_name(after_midnight), "diabetes_predictions_2024-06-10.csv");
    }
}
