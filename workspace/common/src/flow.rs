//! What happens once a prediction request has finished.

use crate::error::ApiError;
use crate::history::{HistoryStore, KeyValueStore, NewPredictionRecord, PredictionRecord};
use crate::prediction::{PredictionInput, PredictionResult};

/// Result of a finished prediction request, ready for the page to render.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success {
        result: PredictionResult,
        /// The history entry, absent when it could not be written.
        record: Option<PredictionRecord>,
        /// Non-fatal notice when the history write failed.
        history_warning: Option<String>,
    },
    Failure {
        message: String,
    },
}

/// Settles a prediction: successful results are appended to history (reduced
/// to prediction, probability and risk level) and returned for display;
/// failures become the message for the error banner.
pub fn settle_prediction<S: KeyValueStore>(
    store: &HistoryStore<S>,
    input: &PredictionInput,
    response: Result<PredictionResult, ApiError>,
) -> PredictionOutcome {
    match response {
        Ok(result) => {
            let entry = NewPredictionRecord::from_prediction(*input, &result);
            let (record, history_warning) = match store.add_to_history(entry) {
                Ok(record) => (Some(record), None),
                Err(e) => {
                    tracing::warn!(error = %e, "prediction not saved to history");
                    (None, Some(format!("Prediction could not be saved to history: {e}")))
                }
            };
            PredictionOutcome::Success {
                result,
                record,
                history_warning,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "prediction request failed");
            PredictionOutcome::Failure {
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;
    use crate::history::MemoryStore;
    use crate::prediction::RiskLevel;
    use std::collections::BTreeMap;

    fn result() -> PredictionResult {
        PredictionResult {
            prediction: 0,
            probability: 0.42,
            risk_level: RiskLevel::Moderate,
            timestamp: "2024-05-01T08:30:00Z".to_string(),
            recommendations: vec!["Monitor your blood sugar levels periodically".to_string()],
            input_values: None,
            feature_analysis: BTreeMap::new(),
        }
    }

    #[test]
    fn test_success_is_recorded() {
        let store = HistoryStore::new(MemoryStore::new(), || "abc".to_string());
        let input = PredictionInput::sample();

        let outcome = settle_prediction(&store, &input, Ok(result()));
        let PredictionOutcome::Success { record, history_warning, .. } = outcome else {
            panic!("expected success");
        };
        assert!(history_warning.is_none());

        let record = record.unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.timestamp, "2024-05-01T08:30:00Z");
        assert_eq!(record.input, input);
        assert_eq!(record.result.risk_level, RiskLevel::Moderate);
        assert_eq!(store.get_history(), vec![record]);
    }

    #[test]
    fn test_failure_leaves_history_untouched() {
        let store = HistoryStore::new(MemoryStore::new(), || "abc".to_string());
        let outcome = settle_prediction(
            &store,
            &PredictionInput::default(),
            Err(ApiError::Server {
                status: 503,
                message: "Model not loaded. Please try again later.".to_string(),
            }),
        );

        assert_eq!(
            outcome,
            PredictionOutcome::Failure {
                message: "Model not loaded. Please try again later.".to_string()
            }
        );
        assert!(store.get_history().is_empty());
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> crate::error::Result<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Err(HistoryError::Storage("quota exceeded".to_string()))
        }
        fn remove(&self, _key: &str) -> crate::error::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_history_write_failure_still_shows_result() {
        let store = HistoryStore::new(FullStore, || "abc".to_string());
        let outcome = settle_prediction(&store, &PredictionInput::default(), Ok(result()));

        match outcome {
            PredictionOutcome::Success { result: shown, record, history_warning } => {
                assert_eq!(shown.probability, 0.42);
                assert!(record.is_none());
                assert!(history_warning.unwrap().contains("quota exceeded"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
