//! Retry-budget exhaustion error.

use std::fmt;

/// Outcome of the last failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastFailure {
    /// The server answered with a status of 300 or above.
    Status(u32),
    /// No response was received; holds the transport error message.
    Transport(String),
}

impl fmt::Display for LastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastFailure::Status(code) => write!(f, "{}", code),
            LastFailure::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

/// Every attempt allowed by the backoff policy failed. Fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error requesting from url: {url} - {last_failure}")]
pub struct FetchExhausted {
    pub url: String,
    pub attempts: u32,
    pub last_failure: LastFailure,
}

impl FetchExhausted {
    /// Status code of the last attempt, if the server answered at all.
    pub fn status(&self) -> Option<u32> {
        match self.last_failure {
            LastFailure::Status(code) => Some(code),
            LastFailure::Transport(_) => None,
        }
    }
}
