//! Predictor port: Trait for the remote disease classifier.

use crate::domain::{ImageUpload, PredictionResult};

/// Message surfaced when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction failed.";

/// Why a prediction attempt produced no result.
///
/// `Display` is exactly the text shown in the error area.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// The endpoint answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connection, TLS, I/O)
    #[error("{0}")]
    Transport(String),

    /// A success status with a body that is not a valid prediction
    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),
}

/// Trait for prediction backends.
///
/// Implementations send one image and return the decoded payload. They must
/// not retry on their own: every failure is terminal for the attempt.
pub trait Predictor: Send + Sync {
    /// Classify a leaf image.
    ///
    /// # Errors
    /// Returns `PredictError` describing the failed attempt.
    fn predict(&self, image: &ImageUpload) -> Result<PredictionResult, PredictError>;
}
