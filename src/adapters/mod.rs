//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the `/predict` endpoint
//! - `sanitize`: redaction of image payloads and secrets in logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictor;
