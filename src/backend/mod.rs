//! Nutrition estimation backend client
//!
//! Uploads one capture (photo + peripheral envelope) as a multipart POST and
//! decodes the recognition response. One logical async operation per call:
//! no retries, no deadline, no cancellation. Transport failures and
//! unparseable responses are reported as distinct errors so callers can tell
//! "unreachable service" from "unexpected response".

use std::path::Path;

use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::models::SessionRecognitionResult;

/// Default estimation endpoint, overridable per client
pub const DEFAULT_ENDPOINT: &str = "http://104.198.163.62:5000/nutritionestimation";

/// Backend error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("nutrition estimation service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service responded, but not with the expected recognition schema
    #[error("unexpected response from nutrition estimation service: {0}")]
    ResponseFormat(String),

    /// A capture file could not be read before upload
    #[error("failed to read capture file: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for the nutrition estimation service
#[derive(Debug, Clone)]
pub struct NutritionEstimationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for NutritionEstimationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NutritionEstimationClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submit one capture and decode the recognition result
    ///
    /// The request carries exactly four parts, in order: `image` (binary,
    /// `image.jpg`, `image/jpg`), `peripheral` (envelope bytes,
    /// `peripheral.json`, `text/plain`), `session_id` and `token` (raw
    /// UTF-8, no filename).
    pub async fn submit(
        &self,
        token: &str,
        session_id: &str,
        json_path: &Path,
        photo_path: &Path,
    ) -> Result<SessionRecognitionResult, BackendError> {
        let envelope_bytes = tokio::fs::read(json_path).await?;
        let photo_bytes = tokio::fs::read(photo_path).await?;

        let form = Form::new()
            .part(
                "image",
                Part::bytes(photo_bytes)
                    .file_name("image.jpg")
                    .mime_str("image/jpg")
                    .map_err(BackendError::Transport)?,
            )
            .part(
                "peripheral",
                Part::bytes(envelope_bytes)
                    .file_name("peripheral.json")
                    .mime_str("text/plain")
                    .map_err(BackendError::Transport)?,
            )
            .text("session_id", session_id.to_owned())
            .text("token", token.to_owned());

        tracing::debug!(%session_id, endpoint = %self.endpoint, "submitting capture");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        // A response exists from here on; anything that goes wrong now is a
        // format problem, not a transport one.
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::ResponseFormat(e.to_string()))?;
        parse_response(&body)
    }
}

/// Decode a raw response body into the recognition result schema
fn parse_response(body: &[u8]) -> Result<SessionRecognitionResult, BackendError> {
    serde_json::from_slice(body).map_err(|e| BackendError::ResponseFormat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_response_decodes() {
        let body = br#"{
            "results": [
                {
                    "weight": 150.0,
                    "carbs": 45.0,
                    "area": 120.5,
                    "volume": -1.0,
                    "candidates": [{"name": "pasta"}]
                }
            ]
        }"#;
        let result = parse_response(body).unwrap();
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].candidates[0].name, "pasta");
    }

    #[test]
    fn test_malformed_body_is_response_format_error() {
        let err = parse_response(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, BackendError::ResponseFormat(_)));
    }

    #[test]
    fn test_wrong_schema_is_response_format_error() {
        let err = parse_response(br#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, BackendError::ResponseFormat(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let dir = std::env::temp_dir().join(format!("mealscan-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let json_path = dir.join("peripheral.json");
        let photo_path = dir.join("image.jpg");
        std::fs::write(&json_path, b"{}").unwrap();
        std::fs::write(&photo_path, b"\xFF\xD8").unwrap();

        // Port 9 (discard) is not listening; the connection fails before any
        // response exists.
        let client = NutritionEstimationClient::with_endpoint("http://127.0.0.1:9/estimate");
        let err = client
            .submit("token", "session", &json_path, &photo_path)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_capture_file_is_io_error() {
        let client = NutritionEstimationClient::new();
        let err = client
            .submit(
                "token",
                "session",
                Path::new("/nonexistent/peripheral.json"),
                Path::new("/nonexistent/image.jpg"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }
}
