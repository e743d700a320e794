//! Wire vocabulary shared by the coordinator, the client and the contract server.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LockError;
use crate::path::ResourcePath;

/// Used when a failure arrives without an explanation of its own.
const UNSPECIFIED_FAILURE: &str = "lock service reported a failure without a message";

/// The two transitions a caller may request against a managed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockAction {
    /// "Edit": take the lock so the notebook becomes writable.
    #[serde(rename = "acquire_lock", alias = "aquire_lock")]
    Acquire,
    /// "Publish": give the lock back.
    #[serde(rename = "release_lock")]
    Release,
}

impl LockAction {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockAction::Acquire => "acquire_lock",
            LockAction::Release => "release_lock",
        }
    }

    /// Parse a wire name, accepting the legacy `aquire_lock` spelling.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "acquire_lock" | "aquire_lock" => Some(LockAction::Acquire),
            "release_lock" => Some(LockAction::Release),
            _ => None,
        }
    }
}

impl fmt::Display for LockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lock ownership of one path, relative to the asking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Unlocked,
    LockedByCaller,
    LockedByOther,
}

impl LockState {
    /// The host's `writable` flag for a notebook in this state.
    pub fn is_writable(&self) -> bool {
        matches!(self, LockState::LockedByCaller)
    }
}

/// One `{action, path}` message to the lock service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    action: LockAction,
    path: ResourcePath,
}

impl ActionRequest {
    /// Build a request. Fails for paths outside wiki governance.
    pub fn new(action: LockAction, path: ResourcePath) -> Result<Self, LockError> {
        if !path.is_managed() {
            return Err(LockError::Unmanaged(path.to_string()));
        }
        Ok(ActionRequest { action, path })
    }

    pub fn action(&self) -> LockAction {
        self.action
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn into_parts(self) -> (LockAction, ResourcePath) {
        (self.action, self.path)
    }
}

/// Body shape the service actually sends, before the invariants are checked.
#[derive(Debug, Deserialize)]
struct WireResult {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Outcome of one lock action. `message` is present exactly when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        ActionResult {
            success: true,
            message: None,
        }
    }

    /// A failed result. An empty message is replaced with a generic diagnostic.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            UNSPECIFIED_FAILURE.to_string()
        } else {
            message
        };
        ActionResult {
            success: false,
            message: Some(message),
        }
    }

    /// Parse a service response body, enforcing the message invariant.
    ///
    /// `{"success": true, "message": ""}` is accepted as a plain success;
    /// a failure without a message is a protocol error.
    pub fn from_json(body: &[u8]) -> Result<Self, LockError> {
        let wire: WireResult =
            serde_json::from_slice(body).map_err(|e| LockError::Protocol(e.to_string()))?;
        match (wire.success, wire.message) {
            (true, _) => Ok(ActionResult::ok()),
            (false, Some(message)) if !message.is_empty() => Ok(ActionResult::failed(message)),
            (false, _) => Err(LockError::Protocol(
                "failure response carries no message".to_string(),
            )),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// `Ok(())` on success, otherwise the remote explanation as a rejection.
    pub fn into_result(self) -> Result<(), LockError> {
        match self.message {
            None => Ok(()),
            Some(message) => Err(LockError::Rejected(message)),
        }
    }
}

impl From<LockError> for ActionResult {
    fn from(err: LockError) -> Self {
        match err {
            LockError::Rejected(message) => ActionResult::failed(message),
            other => ActionResult::failed(other.to_string()),
        }
    }
}
