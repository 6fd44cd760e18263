use std::fmt;

/// Error raised by one status API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Classified failure.
    pub kind: ApiFailure,
    /// Underlying cause text, or the raw response body for HTTP and decode
    /// failures.
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Classified failure for a status API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// DNS, connect, or other network-level failure.
    Network,
    /// The request or connection timed out.
    Timeout,
    /// The endpoint answered with a status other than 200.
    HttpStatus(u16),
    /// The response body could not be decoded as JSON.
    Decode,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Decode => write!(f, "undecodable body"),
        }
    }
}
