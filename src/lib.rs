//! # Agri-Detect
//!
//! Terminal client for plant-leaf disease detection.
//!
//! Drop (paste or drag) a leaf photo into the terminal, send it to the
//! prediction endpoint, and read the diagnosis: disease name, confidence
//! gauge, description, symptoms and prevention tips.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Session state machine, upload filter, prediction payload
//! - `ports`: The `Predictor` trait
//! - `adapters`: reqwest-based predictor, log sanitization
//! - `application`: Session controller driving the domain through a port
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::ClientConfig;
pub use domain::{PredictionResult, Session, SessionPhase};

/// Result type for Agri-Detect operations
pub type Result<T> = std::result::Result<T, AgriDetectError>;

/// Main error type for Agri-Detect
#[derive(Debug, thiserror::Error)]
pub enum AgriDetectError {
    #[error("Prediction failed: {0}")]
    Predict(#[from] ports::PredictError),

    #[error("Upload rejected: {0}")]
    Upload(#[from] domain::UploadError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
