//! Ports layer: Trait definitions for external operations.
//!
//! The prediction endpoint is the only external system; the trait keeps the
//! session controller and the worker independent of the HTTP client.

mod predictor;

pub use predictor::{PredictError, Predictor, GENERIC_FAILURE_MESSAGE};
