//! Application layer: Use cases and services.
//!
//! Orchestrates the session state machine with the predictor port.

mod session;

pub use session::{PendingSubmission, SessionController};
