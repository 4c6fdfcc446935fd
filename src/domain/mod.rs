//! Domain layer: Core types of the leaf-diagnosis client.
//!
//! Pure Rust types with no I/O beyond reading a dropped file. The session
//! type owns every state transition; the application layer only drives it.

mod prediction;
mod session;
mod upload;

pub use prediction::{ConfidenceGauge, DiseaseDetails, GaugeLevel, PredictionResult};
pub use session::{Session, SessionPhase, SubmissionTicket};
pub use upload::{
    accept_drop, parse_dropped_path, ImageKind, ImageUpload, UploadError, ACCEPTED_EXTENSIONS,
};
