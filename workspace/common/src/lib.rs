//! Browser-independent core of the diabetes risk frontend.
//! Transport types for the prediction API, form validation, the prediction
//! history store and its CSV export. Everything here compiles natively so it
//! can be unit tested without a browser.

pub mod api;
pub mod error;
pub mod fields;
pub mod flow;
pub mod history;
pub mod prediction;
pub mod stats;

pub use error::{ApiError, HistoryError};
pub use fields::{FieldConfig, FieldErrors, FormField, validate_field, validate_input};
pub use flow::{PredictionOutcome, settle_prediction};
pub use history::{
    HistoryStore, KeyValueStore, MemoryStore, NewPredictionRecord, PredictionRecord,
    RecordedResult,
};
pub use prediction::{
    FeatureAnalysis, FeatureInfo, FeatureInfoResponse, FeatureStatus, HealthResponse,
    PredictionInput, PredictionResult, RiskLevel,
};
pub use stats::{HistorySummary, TrendPoint};
