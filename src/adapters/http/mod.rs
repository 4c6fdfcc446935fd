//! HTTP adapter: `Predictor` backed by the remote `/predict` endpoint.
//!
//! Sends the image as a multipart form (`file` field) and decodes the JSON
//! answer. The client is blocking; callers run it off the UI thread.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::domain::{ImageUpload, PredictionResult};
use crate::ports::{PredictError, Predictor, GENERIC_FAILURE_MESSAGE};

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Transport(err.to_string())
    }
}

/// Prediction client for a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    /// Create a client for `{base_url}/predict`.
    ///
    /// The request timeout is disabled: an analysis runs until the server
    /// answers or the connection fails.
    ///
    /// # Errors
    /// Returns `PredictError::Transport` if the TLS backend cannot be initialized.
    pub fn new(base_url: &str) -> Result<Self, PredictError> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, image: &ImageUpload) -> Result<PredictionResult, PredictError> {
        tracing::debug!(
            "POST {} ({}, {} bytes)",
            self.endpoint,
            image.kind().mime(),
            image.size_bytes()
        );

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.kind().mime())?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            tracing::debug!("Prediction endpoint answered {}", status);
            return Err(PredictError::Rejected {
                status: status.as_u16(),
                message: failure_message(&body),
            });
        }

        parse_prediction(&body)
    }
}

/// Extract the user-facing message from a failed response body.
///
/// Uses the `detail` string when it is present and non-empty; anything else
/// (missing field, non-string detail, non-JSON body) yields the generic message.
#[must_use]
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// Decode and validate a success body.
///
/// # Errors
/// Returns `PredictError::InvalidResponse` if the body does not match the contract.
pub fn parse_prediction(body: &str) -> Result<PredictionResult, PredictError> {
    let result: PredictionResult =
        serde_json::from_str(body).map_err(|e| PredictError::InvalidResponse(e.to_string()))?;
    result.validate().map_err(PredictError::InvalidResponse)?;
    Ok(result)
}
