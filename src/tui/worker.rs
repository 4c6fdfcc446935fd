//! Background prediction worker.
//!
//! Runs the blocking HTTP call on its own thread and reports back over a
//! channel, so the TUI loop keeps drawing the loader while a request is out.
//! There is no cancellation: an abandoned worker finishes and its message is
//! dropped as stale by the session.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::PendingSubmission;
use crate::domain::{PredictionResult, SubmissionTicket};
use crate::ports::{PredictError, Predictor};

/// Progress updates from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Request is being sent
    Uploading,
    /// Request finished, successfully or not
    Complete {
        ticket: SubmissionTicket,
        outcome: Result<PredictionResult, PredictError>,
    },
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    /// Ticket of the submission this worker serves
    pub ticket: SubmissionTicket,
    /// Receiver for progress updates
    pub progress_rx: Receiver<PredictionProgress>,
    /// Thread handle (for joining)
    handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// `Err(TryRecvError::Disconnected)` means the worker is gone without
    /// reporting completion.
    pub fn try_recv(&self) -> Result<PredictionProgress, TryRecvError> {
        self.progress_rx.try_recv()
    }

    /// Whether the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Worker that runs one prediction in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background prediction for a started submission.
    pub fn spawn<P>(predictor: Arc<P>, submission: PendingSubmission) -> PredictionWorkerHandle
    where
        P: Predictor + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let ticket = submission.ticket;

        let handle = thread::spawn(move || {
            Self::run_with_progress(predictor.as_ref(), submission, tx);
        });

        PredictionWorkerHandle {
            ticket,
            progress_rx: rx,
            handle,
        }
    }

    fn run_with_progress<P>(
        predictor: &P,
        submission: PendingSubmission,
        tx: Sender<PredictionProgress>,
    ) where
        P: Predictor + ?Sized,
    {
        let _ = tx.send(PredictionProgress::Uploading);

        let outcome = predictor.predict(&submission.upload);

        // The receiver may be gone if the app quit mid-request.
        let _ = tx.send(PredictionProgress::Complete {
            ticket: submission.ticket,
            outcome,
        });
    }
}
