//! Session controller: Drives the upload/predict/display cycle.
//!
//! This service coordinates:
//! - Drop handling through the upload filter
//! - Submission to a `Predictor`
//! - Applying the outcome to the session
//!
//! Submission is split in two so the network call can run on a worker
//! thread: `begin_submit` flips the session into analyzing and hands back
//! what to send, `resolve` applies the outcome on the UI thread.

use std::sync::Arc;

use crate::domain::{
    accept_drop, ImageUpload, PredictionResult, Session, SubmissionTicket, UploadError,
};
use crate::ports::{PredictError, Predictor};

/// A submission that has been started but not resolved.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub upload: ImageUpload,
}

/// Service owning the session and the predictor it submits to.
pub struct SessionController<P>
where
    P: Predictor,
{
    predictor: Arc<P>,
    session: Session,
}

impl<P> SessionController<P>
where
    P: Predictor,
{
    /// Create a controller with an empty session.
    pub fn new(predictor: Arc<P>) -> Self {
        Self {
            predictor,
            session: Session::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shared handle to the predictor, for worker threads.
    #[must_use]
    pub fn predictor(&self) -> Arc<P> {
        Arc::clone(&self.predictor)
    }

    /// Select an already-loaded upload.
    pub fn on_file_dropped(&mut self, upload: ImageUpload) {
        tracing::info!(
            "Selected {} ({}, {} bytes)",
            upload.file_name(),
            upload.kind().mime(),
            upload.size_bytes()
        );
        self.session.select(upload);
    }

    /// Run raw dropped text through the filter and select the file.
    ///
    /// # Errors
    /// Returns the rejection reason; the session is left untouched.
    pub fn on_text_dropped(&mut self, text: &str) -> Result<(), UploadError> {
        match accept_drop(text) {
            Ok(upload) => {
                self.on_file_dropped(upload);
                Ok(())
            }
            Err(e) => {
                tracing::info!("Drop rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Enter the analyzing state.
    ///
    /// Returns `None` without touching the session when no file is selected
    /// or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        let (ticket, upload) = self.session.start_submission()?;
        tracing::info!("Submitting {} for analysis", upload.file_name());
        Some(PendingSubmission { ticket, upload })
    }

    /// Apply a prediction outcome. Stale tickets are ignored.
    ///
    /// Returns whether the session changed.
    pub fn resolve(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictionResult, PredictError>,
    ) -> bool {
        match &outcome {
            Ok(result) => tracing::info!(
                "Prediction: {} ({:.1}%)",
                result.disease_name,
                result.confidence * 100.0
            ),
            Err(e) => tracing::warn!("Prediction error: {:?}", e),
        }

        let applied = self
            .session
            .resolve(ticket, outcome.map_err(|e| e.to_string()));
        if !applied {
            tracing::debug!("Discarding stale prediction outcome");
        }
        applied
    }

    /// Submit and wait for the outcome on the current thread.
    ///
    /// No-op when there is nothing to submit.
    pub fn submit(&mut self) {
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let outcome = self.predictor.predict(&pending.upload);
        self.resolve(pending.ticket, outcome);
    }

    /// Reset to idle. No-op when there is neither a file nor a result.
    pub fn clear(&mut self) {
        if !self.session.can_clear() {
            return;
        }
        tracing::debug!("Clearing session ({})", self.session.phase());
        self.session.reset();
    }
}
