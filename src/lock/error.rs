use thiserror::Error;

/// Error type for lock operations against the remote lock service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The request could not be sent or no response arrived (network, timeout).
    #[error("lock service unreachable: {0}")]
    Transport(String),
    /// The service answered with a non-2xx HTTP status.
    #[error("lock service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match `{success, message?}`.
    #[error("malformed lock service response: {0}")]
    Protocol(String),
    /// The service refused the transition; the message is its own explanation.
    #[error("{0}")]
    Rejected(String),
    /// The lock table's mutex was poisoned (a thread panicked while holding it).
    #[error("lock table poisoned: {0}")]
    Poisoned(String),
    /// The path is outside wiki governance, so no lock action applies.
    #[error("{0} is not a wiki path")]
    Unmanaged(String),
}

impl LockError {
    /// Short class name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            LockError::Transport(_) => "transport",
            LockError::Status { .. } => "status",
            LockError::Protocol(_) => "protocol",
            LockError::Rejected(_) => "rejected",
            LockError::Poisoned(_) => "poisoned",
            LockError::Unmanaged(_) => "unmanaged",
        }
    }
}
