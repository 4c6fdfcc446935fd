//! Client-side state for one upload/predict/display cycle.
//!
//! The representation makes the invariants structural:
//! - the preview URL lives next to the selected file, so one exists iff the other does
//! - result and error share one `Outcome` slot, so at most one is set
//!
//! The loading flag is tied to an in-flight submission ticket. Clearing or
//! dropping a new file abandons the ticket, and a resolution carrying an
//! abandoned ticket is ignored.

use super::prediction::PredictionResult;
use super::upload::ImageUpload;

/// Identifies one submission. Resolutions are matched against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

/// The selected image and its derived preview reference.
#[derive(Debug, Clone, PartialEq)]
struct Selection {
    upload: ImageUpload,
    preview_url: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Result(PredictionResult),
    Error(String),
}

/// Coarse state of the session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Selected,
    Analyzing,
    Resulted,
    Errored,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Selected => write!(f, "selected"),
            Self::Analyzing => write!(f, "analyzing"),
            Self::Resulted => write!(f, "resulted"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Full UI session state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    selection: Option<Selection>,
    outcome: Option<Outcome>,
    in_flight: Option<SubmissionTicket>,
    next_ticket: u64,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&ImageUpload> {
        self.selection.as_ref().map(|s| &s.upload)
    }

    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.preview_url.as_str())
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.outcome {
            Some(Outcome::Result(r)) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Error(e)) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading() {
            return SessionPhase::Analyzing;
        }
        match (&self.outcome, &self.selection) {
            (Some(Outcome::Result(_)), _) => SessionPhase::Resulted,
            (Some(Outcome::Error(_)), _) => SessionPhase::Errored,
            (None, Some(_)) => SessionPhase::Selected,
            (None, None) => SessionPhase::Idle,
        }
    }

    /// Whether "Analyze" is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.is_loading()
    }

    /// Whether "Clear" is enabled.
    #[must_use]
    pub fn can_clear(&self) -> bool {
        self.selection.is_some() || self.result().is_some()
    }

    /// Replace the selection and drop any previous outcome.
    pub fn select(&mut self, upload: ImageUpload) {
        let preview_url = upload.preview_url();
        self.selection = Some(Selection {
            upload,
            preview_url,
        });
        self.outcome = None;
        self.in_flight = None;
    }

    /// Enter the analyzing state. Returns the ticket and the file to send,
    /// or `None` when there is nothing to send or a request is already out.
    pub fn start_submission(&mut self) -> Option<(SubmissionTicket, ImageUpload)> {
        if !self.can_submit() {
            return None;
        }
        let upload = self.selection.as_ref()?.upload.clone();

        self.next_ticket += 1;
        let ticket = SubmissionTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.outcome = None;

        Some((ticket, upload))
    }

    /// Apply the outcome of a submission. Returns `false` (and changes
    /// nothing) when the ticket is not the one in flight.
    pub fn resolve(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictionResult, String>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.outcome = Some(match outcome {
            Ok(result) => Outcome::Result(result),
            Err(message) => Outcome::Error(message),
        });
        self.in_flight = None;
        true
    }

    /// Back to idle. The ticket counter survives so stale tickets stay stale.
    pub fn reset(&mut self) {
        self.selection = None;
        self.outcome = None;
        self.in_flight = None;
    }
}
