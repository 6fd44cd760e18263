use thiserror::Error;

/// A failure inside one poll cycle.
///
/// The orchestrator compares these values structurally when deciding whether
/// a failure notification repeats the one already delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// Network-level failure talking to the status API.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The API answered with a non-OK HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus {
        /// The status code the endpoint returned.
        status: u16,
        /// Raw response body text.
        body: String,
    },
    /// The response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
    /// The response was something other than a JSON object.
    #[error("response must be a JSON object")]
    NotAnObject,
    /// The `homeworks` field was not a list.
    #[error("`homeworks` must be a list")]
    HomeworksNotAList,
    /// A required field is absent from the response or a record.
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    /// A review status outside the known verdict set.
    #[error("unknown review status `{0}`")]
    UnknownStatus(String),
}
