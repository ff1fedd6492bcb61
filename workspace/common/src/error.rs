use thiserror::Error;

/// Message shown when a failed response carries no usable `detail`.
pub const GENERIC_PREDICTION_ERROR: &str = "Failed to get prediction";

/// Errors from talking to the prediction API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Unable to reach the prediction service ({0}). Please make sure the backend is running.")]
    Network(String),

    /// Non-success status; `message` is the server's `detail` or a generic fallback
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Success status but the body does not have the expected shape
    #[error("Unexpected response from the prediction service: {0}")]
    InvalidResponse(String),

    /// The request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
}

/// Errors from the history store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// The storage backend refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// The stored value is not a valid history array
    #[error("Stored history is corrupted: {0}")]
    Corrupted(String),

    /// The history could not be encoded
    #[error("Failed to serialize history: {0}")]
    Serialization(String),
}

/// Type alias for Result with HistoryError
pub type Result<T> = std::result::Result<T, HistoryError>;
