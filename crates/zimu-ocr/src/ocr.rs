use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::capture::encode_png;
use crate::preprocess::NormalizedImage;

pub const PLACEHOLDER_FAILURE_REASON: &str = "no recognition engine installed";

/// Confidence assumed when a backend does not report one
const UNSPECIFIED_CONFIDENCE: f32 = 0.5;

/// Outcome of one recognition call
///
/// Failures are values, not errors: `succeeded` is false and
/// `failure_reason` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub text: String,
    /// Advisory only, in [0, 1]
    pub confidence: f32,
    pub succeeded: bool,
    pub failure_reason: Option<String>,
}

impl RecognitionResult {
    pub fn success(text: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            text: text.into(),
            confidence,
            succeeded: true,
            failure_reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            confidence: 0.0,
            succeeded: false,
            failure_reason: Some(reason.into()),
        }
    }

    /// Recognized text, if recognition succeeded with something non-blank
    pub fn usable_text(&self) -> Option<&str> {
        if self.succeeded && !self.text.trim().is_empty() {
            Some(&self.text)
        } else {
            None
        }
    }
}

/// Text recognition backend
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Recognize caption text; never fails, see [`RecognitionResult`]
    async fn recognize(&self, image: &NormalizedImage) -> RecognitionResult;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Engine installed when no real backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEngine;

#[async_trait]
impl RecognitionEngine for PlaceholderEngine {
    async fn recognize(&self, _image: &NormalizedImage) -> RecognitionResult {
        RecognitionResult::failure(PLACEHOLDER_FAILURE_REASON)
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

#[derive(Debug, thiserror::Error)]
enum RecognizeError {
    #[error("caption image is empty")]
    EmptyImage,

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("recognizer returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    text: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Remote recognizer: POSTs the PNG-encoded caption and reads back JSON
/// `{ "text": ..., "confidence": ... }`
#[derive(Clone)]
pub struct HttpRecognitionEngine {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

impl HttpRecognitionEngine {
    pub fn new(endpoint: String, language: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build recognizer client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint,
            language,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_recognize(
        &self,
        image: &NormalizedImage,
    ) -> Result<RecognitionResult, RecognizeError> {
        if image.is_empty() {
            return Err(RecognizeError::EmptyImage);
        }

        let png = encode_png(image.as_rgba())?;
        tracing::debug!(
            "Sending {}x{} caption ({} bytes) to {}",
            image.width(),
            image.height(),
            png.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("language", self.language.as_str())])
            .header(CONTENT_TYPE, "image/png")
            .body(png)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecognizeError::Status(response.status()));
        }

        let body: RecognizeResponse = response.json().await?;
        Ok(RecognitionResult::success(
            body.text,
            body.confidence.unwrap_or(UNSPECIFIED_CONFIDENCE),
        ))
    }
}

#[async_trait]
impl RecognitionEngine for HttpRecognitionEngine {
    async fn recognize(&self, image: &NormalizedImage) -> RecognitionResult {
        match self.try_recognize(image).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Recognition via {} failed: {}", self.endpoint, e);
                RecognitionResult::failure(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
