//! Response decoding for the prediction API.
//!
//! Transport lives in the frontend; this module turns a status code and a raw
//! body into a typed result so the branching can be tested without a browser.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, GENERIC_PREDICTION_ERROR};
use crate::prediction::PredictionResult;

/// Path of the prediction endpoint, relative to the API base.
pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";
pub const FEATURE_INFO_PATH: &str = "/feature-info";

/// Error body of a failed request. FastAPI-style services put a string in
/// `detail` for handled errors and a list for validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Extracts the human-readable message of a failed response, falling back to
/// `fallback` when the body is not JSON or has no string `detail`.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Decodes any JSON response of the API, mapping failures to [`ApiError`].
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, ApiError> {
    if !is_success(status) {
        let message = error_message(body, fallback);
        tracing::warn!(status, %message, "prediction service returned an error");
        return Err(ApiError::Server { status, message });
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, "response does not match the expected shape");
        ApiError::InvalidResponse(e.to_string())
    })
}

/// Decodes the response of `POST /predict`.
pub fn decode_prediction_response(status: u16, body: &str) -> Result<PredictionResult, ApiError> {
    let result: PredictionResult = decode_response(status, body, GENERIC_PREDICTION_ERROR)?;

    if !(0.0..=1.0).contains(&result.probability) || result.prediction > 1 {
        return Err(ApiError::InvalidResponse(format!(
            "prediction {} with probability {} is out of range",
            result.prediction, result.probability
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::RiskLevel;

    const OK_BODY: &str = r#"{"prediction":0,"probability":0.12,"risk_level":"low",
        "timestamp":"2024-01-01T00:00:00Z","recommendations":[],"feature_analysis":{}}"#;

    #[test]
    fn test_success_is_decoded() {
        let result = decode_prediction_response(200, OK_BODY).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.is_positive());
    }

    #[test]
    fn test_error_detail_is_used() {
        let err = decode_prediction_response(
            503,
            r#"{"detail":"Model not loaded. Please try again later."}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 503,
                message: "Model not loaded. Please try again later.".to_string()
            }
        );
        assert_eq!(err.to_string(), "Model not loaded. Please try again later.");
    }

    #[test]
    fn test_error_without_detail_falls_back() {
        for body in ["<html>Bad Gateway</html>", "{}", r#"{"detail":[{"msg":"bad"}]}"#, ""] {
            let err = decode_prediction_response(422, body).unwrap_err();
            assert_eq!(err.to_string(), GENERIC_PREDICTION_ERROR);
        }
    }

    #[test]
    fn test_shape_mismatch_is_distinct() {
        let err = decode_prediction_response(200, r#"{"prediction":"yes"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));

        let err = decode_prediction_response(
            200,
            r#"{"prediction":1,"probability":1.7,"risk_level":"high","timestamp":"t"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
