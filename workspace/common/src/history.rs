//! Client-local prediction history.
//!
//! The history is a single JSON array of [`PredictionRecord`] stored under
//! [`STORAGE_KEY`], most recent first and capped at [`MAX_HISTORY`] entries.
//! The backing store is injected through [`KeyValueStore`] so the same logic
//! runs against browser local storage and against [`MemoryStore`] in tests.
//!
//! Reads never fail: a missing, unreadable or corrupted value is treated as an
//! empty history. Writes report storage failures to the caller.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};
use crate::prediction::{
    PredictionInput, PredictionResult, RiskLevel, format_probability, outcome_label,
};

/// Local-storage key holding the serialized history.
pub const STORAGE_KEY: &str = "diabetes_prediction_history";

/// Maximum number of records kept.
pub const MAX_HISTORY: usize = 50;

pub const CSV_HEADER: [&str; 12] = [
    "Date",
    "Pregnancies",
    "Glucose",
    "Blood Pressure",
    "Skin Thickness",
    "Insulin",
    "BMI",
    "Diabetes Pedigree",
    "Age",
    "Prediction",
    "Probability",
    "Risk Level",
];

/// String key/value storage port (browser local storage or a fake).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The part of a prediction result that is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub prediction: u8,
    pub probability: f64,
    pub risk_level: RiskLevel,
}

impl From<&PredictionResult> for RecordedResult {
    fn from(result: &PredictionResult) -> Self {
        Self {
            prediction: result.prediction,
            probability: result.probability,
            risk_level: result.risk_level,
        }
    }
}

/// A record before it is given an id by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPredictionRecord {
    pub timestamp: String,
    pub input: PredictionInput,
    pub result: RecordedResult,
}

impl NewPredictionRecord {
    /// Builds the history entry for a successful prediction.
    pub fn from_prediction(input: PredictionInput, result: &PredictionResult) -> Self {
        Self {
            timestamp: result.timestamp.clone(),
            input,
            result: RecordedResult::from(result),
        }
    }
}

/// One persisted history entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub timestamp: String,
    pub input: PredictionInput,
    pub result: RecordedResult,
}

impl PredictionRecord {
    fn from_new(id: String, record: NewPredictionRecord) -> Self {
        Self {
            id,
            timestamp: record.timestamp,
            input: record.input,
            result: record.result,
        }
    }

    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn csv_row(&self) -> String {
        let input = &self.input;
        [
            format_csv_date(&self.timestamp),
            input.pregnancies.to_string(),
            input.glucose.to_string(),
            input.blood_pressure.to_string(),
            input.skin_thickness.to_string(),
            input.insulin.to_string(),
            input.bmi.to_string(),
            input.diabetes_pedigree.to_string(),
            input.age.to_string(),
            outcome_label(self.result.prediction).to_string(),
            format_probability(self.result.probability),
            self.result.risk_level.to_string(),
        ]
        .join(",")
    }
}

/// Renders a record timestamp as `M/D/YYYY, h:mm:ss AM` in UTC. Timestamps
/// that are not RFC 3339 are returned unchanged.
pub fn format_csv_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Serializes records to CSV: header plus one row per record, `\n`-joined.
/// An empty slice yields an empty string. Fields are not quoted.
pub fn records_to_csv(records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    std::iter::once(CSV_HEADER.join(","))
        .chain(records.iter().map(PredictionRecord::csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Name of the exported file for a given day.
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("diabetes_predictions_{}.csv", date.format("%Y-%m-%d"))
}

/// Builds a record id from a millisecond clock reading and a random number in
/// `[0, 1)`: the time in base 36 followed by the random fraction's base-36 digits.
pub fn generate_id(now_millis: u64, random: f64) -> String {
    let mut id = to_base36(now_millis);
    id.push_str(&fraction_to_base36(random, 11));
    id
}

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn fraction_to_base36(fraction: f64, max_digits: usize) -> String {
    let mut x = fraction.fract().abs();
    let mut out = String::with_capacity(max_digits);
    for _ in 0..max_digits {
        if x <= 0.0 {
            break;
        }
        x *= 36.0;
        let digit = x.floor();
        out.push(DIGITS[digit as usize % 36] as char);
        x -= digit;
    }
    out
}

/// Bounded, most-recent-first log of predictions over a [`KeyValueStore`].
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    next_id: Box<dyn Fn() -> String>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// `next_id` supplies ids for new records, see [`generate_id`].
    pub fn new(storage: S, next_id: impl Fn() -> String + 'static) -> Self {
        Self {
            storage,
            next_id: Box::new(next_id),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored history, distinguishing "absent" from "corrupted".
    pub fn try_get_history(&self) -> Result<Vec<PredictionRecord>> {
        match self.storage.get(STORAGE_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.is_empty() => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| HistoryError::Corrupted(e.to_string()))
            }
        }
    }

    /// Reads the stored history; any failure reads as an empty history.
    pub fn get_history(&self) -> Vec<PredictionRecord> {
        self.try_get_history().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable prediction history");
            Vec::new()
        })
    }

    /// Prepends a record with a fresh id, keeps the newest [`MAX_HISTORY`]
    /// entries and writes the list back. Returns the stored record.
    pub fn add_to_history(&self, record: NewPredictionRecord) -> Result<PredictionRecord> {
        let stored = PredictionRecord::from_new((self.next_id)(), record);

        let mut history = self.get_history();
        history.insert(0, stored.clone());
        history.truncate(MAX_HISTORY);
        self.write(&history)?;

        tracing::debug!(id = %stored.id, len = history.len(), "prediction added to history");
        Ok(stored)
    }

    /// Removes the record with `id`. Unknown ids leave the list as it was.
    pub fn delete_from_history(&self, id: &str) -> Result<()> {
        let mut history = self.get_history();
        let before = history.len();
        history.retain(|record| record.id != id);
        if history.len() == before {
            tracing::debug!(%id, "no history record to delete");
        }
        self.write(&history)
    }

    /// Drops the whole history.
    pub fn clear_history(&self) -> Result<()> {
        tracing::info!("clearing prediction history");
        self.storage.remove(STORAGE_KEY)
    }

    /// CSV export of the current history; empty string when there is none.
    pub fn export_to_csv(&self) -> String {
        records_to_csv(&self.get_history())
    }

    fn write(&self, history: &[PredictionRecord]) -> Result<()> {
        let raw = serde_json::to_string(history)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.storage.set(STORAGE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_store() -> HistoryStore<MemoryStore> {
        let counter = Rc::new(Cell::new(0u32));
        HistoryStore::new(MemoryStore::new(), move || {
            counter.set(counter.get() + 1);
            format!("id-{}", counter.get())
        })
    }

    fn example_input() -> PredictionInput {
        PredictionInput {
            pregnancies: 2.0,
            glucose: 150.0,
            blood_pressure: 80.0,
            skin_thickness: 30.0,
            insulin: 100.0,
            bmi: 32.1,
            diabetes_pedigree: 0.6,
            age: 45.0,
        }
    }

    fn new_record(probability: f64) -> NewPredictionRecord {
        NewPredictionRecord {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            input: example_input(),
            result: RecordedResult {
                prediction: 1,
                probability,
                risk_level: RiskLevel::High,
            },
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(HistoryError::Storage("denied".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(HistoryError::Storage("quota exceeded".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(HistoryError::Storage("denied".to_string()))
        }
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let store = counting_store();
        assert!(store.get_history().is_empty());
        assert_eq!(store.try_get_history(), Ok(Vec::new()));
    }

    #[test]
    fn test_add_returns_stored_record_with_id() {
        let store = counting_store();
        let stored = store.add_to_history(new_record(0.82)).unwrap();
        assert_eq!(stored.id, "id-1");
        assert_eq!(store.get_history(), vec![stored]);
    }

    #[test]
    fn test_history_is_capped_and_most_recent_first() {
        let store = counting_store();
        for i in 0..(MAX_HISTORY + 7) {
            store.add_to_history(new_record(i as f64 / 100.0)).unwrap();
            let history = store.get_history();
            assert!(history.len() <= MAX_HISTORY);
            assert_eq!(history[0].id, format!("id-{}", i + 1));
        }

        let history = store.get_history();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history[0].id, format!("id-{}", MAX_HISTORY + 7));
        assert_eq!(history[MAX_HISTORY - 1].id, "id-8");
    }

    #[test]
    fn test_corrupted_value_reads_empty() {
        let store = counting_store();
        store.storage().set(STORAGE_KEY, "{not json").unwrap();

        assert!(store.get_history().is_empty());
        assert!(matches!(
            store.try_get_history(),
            Err(HistoryError::Corrupted(_))
        ));
    }

    #[test]
    fn test_wrong_shape_reads_empty() {
        let store = counting_store();
        store
            .storage()
            .set(STORAGE_KEY, r#"[{"id":"x","timestamp":"t"}]"#)
            .unwrap();
        assert!(store.get_history().is_empty());
    }

    #[test]
    fn test_add_over_corrupted_value_starts_fresh() {
        let store = counting_store();
        store.storage().set(STORAGE_KEY, "garbage").unwrap();
        store.add_to_history(new_record(0.5)).unwrap();
        assert_eq!(store.get_history().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_leaves_history_unchanged() {
        let store = counting_store();
        store.add_to_history(new_record(0.1)).unwrap();
        store.add_to_history(new_record(0.2)).unwrap();
        let before = store.get_history();

        store.delete_from_history("missing").unwrap();
        assert_eq!(store.get_history(), before);
    }

    #[test]
    fn test_delete_removes_matching_record() {
        let store = counting_store();
        store.add_to_history(new_record(0.1)).unwrap();
        store.add_to_history(new_record(0.2)).unwrap();
        store.add_to_history(new_record(0.3)).unwrap();

        store.delete_from_history("id-2").unwrap();
        let ids: Vec<String> = store.get_history().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["id-3", "id-1"]);
    }

    #[test]
    fn test_clear_history() {
        let store = counting_store();
        store.add_to_history(new_record(0.4)).unwrap();
        store.clear_history().unwrap();

        assert!(store.get_history().is_empty());
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_storage_failures() {
        let store = HistoryStore::new(BrokenStore, || "id".to_string());
        assert!(store.get_history().is_empty());
        assert!(matches!(
            store.add_to_history(new_record(0.4)),
            Err(HistoryError::Storage(_))
        ));
        assert!(store.clear_history().is_err());
    }

    #[test]
    fn test_export_empty_history() {
        assert_eq!(counting_store().export_to_csv(), "");
    }

    #[test]
    fn test_export_example_row() {
        let store = counting_store();
        store.add_to_history(new_record(0.82)).unwrap();

        let csv = store.export_to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Date,Pregnancies,Glucose,Blood Pressure,Skin Thickness,Insulin,BMI,Diabetes Pedigree,Age,Prediction,Probability,Risk Level"
        );
        assert_eq!(
            lines[1],
            "1/1/2024, 12:00:00 AM,2,150,80,30,100,32.1,0.6,45,Positive,82.0%,high"
        );
        assert!(lines[1].ends_with("Positive,82.0%,high"));
    }

    #[test]
    fn test_export_rounds_probability_ties_up() {
        let store = counting_store();
        store.add_to_history(new_record(0.8125)).unwrap();

        let csv = store.export_to_csv();
        assert!(csv.lines().nth(1).is_some_and(|row| row.contains(",81.3%,")));
    }

    #[test]
    fn test_export_has_one_row_per_record_in_history_order() {
        let store = counting_store();
        for p in [0.1, 0.5, 0.9] {
            store.add_to_history(new_record(p)).unwrap();
        }

        let csv = store.export_to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(",90.0%,"));
        assert!(lines[3].contains(",10.0%,"));
    }

    #[test]
    fn test_csv_date_formatting() {
        assert_eq!(
            format_csv_date("2024-03-05T14:07:09.123456Z"),
            "3/5/2024, 2:07:09 PM"
        );
        assert_eq!(format_csv_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_csv_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(csv_file_name(date), "diabetes_predictions_2024-06-09.csv");
    }

    #[test]
    fn test_generate_id() {
        assert_eq!(generate_id(35, 0.5), "zi");
        assert_eq!(generate_id(0, 0.0), "0");

        let id = generate_id(1_700_000_000_000, 0.123456789);
        assert!(id.starts_with(&to_base36(1_700_000_000_000)));
        assert!(id.len() > 8);
        assert_ne!(id, generate_id(1_700_000_000_000, 0.987654321));
    }

    #[test]
    fn test_reads_records_written_by_older_clients() {
        let raw = r#"[{"id":"lq2x9k1abc","timestamp":"2024-01-01T00:00:00Z",
            "input":{"pregnancies":2,"glucose":150,"blood_pressure":80,"skin_thickness":30,
                     "insulin":100,"bmi":32.1,"diabetes_pedigree":0.6,"age":45},
            "result":{"prediction":1,"probability":0.82,"risk_level":"high"}}]"#;
        let store = counting_store();
        store.storage().set(STORAGE_KEY, raw).unwrap();

        let history = store.get_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].input, example_input());
    }
}
