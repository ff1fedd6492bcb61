use common::api::{self, FEATURE_INFO_PATH, HEALTH_PATH, PREDICT_PATH};
use common::{ApiError, FeatureInfoResponse, HealthResponse, PredictionInput, PredictionResult};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::settings;

// API_BASE is retrieved from settings
fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Reads status and body of a response and hands them to the shared decoder.
async fn decode<T>(endpoint: &str, response: Response, fallback: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    // An unreadable body is decoded like an empty one: generic message on
    // failure, shape error on success.
    let body = response.text().await.unwrap_or_else(|e| {
        log::warn!("{} - Failed to read response body: {}", endpoint, e);
        String::new()
    });

    log::trace!("{} - Response received ({}), parsing JSON", endpoint, status);
    api::decode_response(status, &body, fallback)
}

/// Common GET request handler
async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    get_url(endpoint, &api_url(endpoint)).await
}

async fn get_url<T>(endpoint: &str, url: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    log::debug!("GET request to: {}", url);

    let response = Request::get(url).send().await.map_err(|e| {
        log::error!("GET {} - Request failed: {}", endpoint, e);
        ApiError::Network(e.to_string())
    })?;

    let result = decode(endpoint, response, &format!("GET {} failed", endpoint)).await;
    if result.is_ok() {
        log::info!("GET {} - Success", endpoint);
    }
    result
}

/// Submits the metrics to `POST /predict`.
///
/// One request, no retry and no timeout: the caller keeps its submit control
/// disabled until this resolves.
pub async fn predict(input: &PredictionInput) -> Result<PredictionResult, ApiError> {
    let url = api_url(PREDICT_PATH);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(input)
        .map_err(|e| {
            log::error!("POST {} - Failed to serialize request: {}", PREDICT_PATH, e);
            ApiError::Serialization(e.to_string())
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", PREDICT_PATH, e);
            ApiError::Network(e.to_string())
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let result = api::decode_prediction_response(status, &body);
    match &result {
        Ok(prediction) => log::info!(
            "POST {} - Success: risk {} ({:.3})",
            PREDICT_PATH,
            prediction.risk_level,
            prediction.probability
        ),
        Err(e) => log::error!("POST {} - {}", PREDICT_PATH, e),
    }
    result
}

/// Service status from `GET /health`.
pub async fn get_health() -> Result<HealthResponse, ApiError> {
    log::trace!("Checking prediction service health");
    get(HEALTH_PATH).await
}

/// `GET /health` against an arbitrary API base, e.g. one not saved yet.
pub async fn get_health_at(base_url: &str) -> Result<HealthResponse, ApiError> {
    let url = settings::join_endpoint(base_url, HEALTH_PATH);
    log::trace!("Checking prediction service health at {}", url);
    get_url(HEALTH_PATH, &url).await
}

/// Reference ranges from `GET /feature-info`.
pub async fn get_feature_info() -> Result<FeatureInfoResponse, ApiError> {
    log::trace!("Fetching feature reference information");
    let result: Result<FeatureInfoResponse, ApiError> = get(FEATURE_INFO_PATH).await;
    match &result {
        Ok(info) => log::info!("Fetched reference info for {} features", info.total_features),
        Err(e) => log::error!("Failed to fetch feature info: {}", e),
    }
    result
}
