//! Dialog session: flow state plus the single user-visible status line.
//!
//! Mirrors the interaction contract of the credential dialog:
//! `Idle -> DialogOpen -> Submitting -> Idle`, with every terminal outcome
//! overwriting the one status line. No history is kept; the status from a
//! finished submission stays visible until the dialog is opened again.

use crate::response::Outcome;

/// In-progress status shown the moment the dialog closes on submit.
pub const MSG_IN_PROGRESS: &str =
    "Starting… this may take a few minutes depending on how many payslips you have.";
/// Terminal status for a successful submission.
pub const MSG_DOWNLOAD_STARTED: &str = "Download started.";
/// Terminal status for a 400 response.
pub const MSG_BAD_REQUEST: &str = "Username and password are required.";
/// Terminal status for a transport-level failure.
pub const MSG_NETWORK_ERROR: &str = "Network error.";

/// Where the flow currently is. Terminal outcomes return to `Idle`
/// implicitly; the dialog is closed and the status line retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    DialogOpen,
    Submitting,
}

/// How one submission ended; each variant maps to exactly one status line.
/// `rid` is the correlation id to display (server echo preferred).
#[derive(Debug, Clone, Copy)]
pub enum Disposition<'a> {
    DownloadStarted,
    NotFound { rid: &'a str },
    BadRequest,
    ServerError { rid: &'a str },
    NetworkError,
}

impl<'a> Disposition<'a> {
    /// Maps a classified response to its disposition.
    pub fn of(outcome: &Outcome, rid: &'a str) -> Self {
        match outcome {
            Outcome::Success { .. } => Disposition::DownloadStarted,
            Outcome::NotFound => Disposition::NotFound { rid },
            Outcome::BadRequest => Disposition::BadRequest,
            Outcome::ServerError { .. } => Disposition::ServerError { rid },
        }
    }
}

/// One dialog interaction: the open/closed flag and the status line, the
/// only two pieces of mutable UI state in the flow.
#[derive(Debug, Default)]
pub struct Session {
    state: FlowState,
    status: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Latest status line; empty right after the dialog opens.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Opens the credential dialog and clears the status line.
    pub fn open(&mut self) {
        self.state = FlowState::DialogOpen;
        self.status.clear();
    }

    /// Closes the dialog without submitting. No request is made and the
    /// status line is left as-is.
    pub fn cancel(&mut self) {
        self.state = FlowState::Idle;
    }

    /// Dialog closes, the request is about to go out.
    pub fn begin_submission(&mut self) {
        self.state = FlowState::Submitting;
        self.status = MSG_IN_PROGRESS.to_string();
    }

    /// Records the terminal status for this submission and returns to idle.
    /// Identical dispositions always produce identical status lines.
    pub fn finish(&mut self, disposition: Disposition<'_>) {
        self.status = match disposition {
            Disposition::DownloadStarted => MSG_DOWNLOAD_STARTED.to_string(),
            Disposition::NotFound { rid } => {
                format!("No payslips found or login failed. Request-ID={rid}")
            }
            Disposition::BadRequest => MSG_BAD_REQUEST.to_string(),
            Disposition::ServerError { rid } => {
                format!("Error while fetching payslips. Request-ID={rid}")
            }
            Disposition::NetworkError => MSG_NETWORK_ERROR.to_string(),
        };
        self.state = FlowState::Idle;
    }
}
