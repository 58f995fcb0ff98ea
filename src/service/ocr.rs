// service/ocr.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request timed out")]
    Timeout,
    #[error("OCR request failed: {0}")]
    Request(String),
    #[error("OCR response malformed: {0}")]
    Response(String),
}

/// Text extraction over a stored screenshot. Callers must treat any error as
/// "no text extracted" rather than failing the surrounding operation.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn extract_text(&self, image_url: &str) -> Result<String, OcrError>;
}

/// OCR over a plain HTTP endpoint: POST {"image_url": ...} -> {"text": ...}.
/// The request timeout bounds how long a subscription submission can stall
/// on extraction.
pub struct HttpOcrEngine {
    client: Client,
    api_url: String,
}

impl HttpOcrEngine {
    pub fn new(api_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self { client, api_url }
    }
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    text: String,
}

#[async_trait]
impl OcrEngine for HttpOcrEngine {
    async fn extract_text(&self, image_url: &str) -> Result<String, OcrError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&json!({ "image_url": image_url }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OcrError::Timeout
                } else {
                    OcrError::Request(e.to_string())
                }
            })?;

        let response = response
            .error_for_status()
            .map_err(|e| OcrError::Request(e.to_string()))?;

        let body: OcrResponse = response
            .json()
            .await
            .map_err(|e| OcrError::Response(e.to_string()))?;

        Ok(body.text)
    }
}
