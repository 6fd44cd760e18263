use crate::{CycleError, Notice};

/// Inputs fed to the state machine by the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// One poll finished: the decoded (still unvalidated) payload, or the
    /// failure the API client reported.
    PollCompleted(Result<serde_json::Value, CycleError>),
    /// A notice was handed to the messaging transport successfully.
    NoticeDelivered {
        /// The notice that went out.
        notice: Notice,
    },
    /// The messaging transport did not accept the notice.
    NoticeFailed {
        /// The notice that was attempted.
        notice: Notice,
        /// Transport diagnostic, for the log only.
        reason: String,
    },
}
