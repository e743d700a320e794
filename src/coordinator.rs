//! LockCoordinator: decides edit vs publish for a notebook and performs it.
//!
//! The coordinator is split into a pure decision ([`LockCoordinator::determine_action`])
//! and one suspending remote transition ([`LockCoordinator::perform`]). It keeps
//! no state: the lock service is the only authority on who owns a path, and the
//! host refreshes its own `writable` flag after a successful result.
//!
//! ```ignore
//! use wiki_lock::{HttpLockService, LockCoordinator, ResourcePath, WikiConfig};
//!
//! let coordinator = LockCoordinator::new(HttpLockService::new(&WikiConfig::default())?);
//! let path = ResourcePath::new("_design/_home.ipynb");
//!
//! if let Some(action) = wiki_lock::determine_action(&path, false) {
//!     let result = coordinator.perform(action, &path).await;
//!     if result.is_success() {
//!         // reload the notebook so `writable` reflects the new lock
//!     }
//! }
//! ```

use tracing::{info, warn};

use crate::lock::{ActionRequest, ActionResult, LockAction, LockService};
use crate::path::ResourcePath;

/// Which action the toolbar should offer for `path`.
///
/// `None` for unmanaged paths; otherwise `Acquire` when the session cannot
/// write and `Release` when it holds the lock.
pub fn determine_action(path: &ResourcePath, writable: bool) -> Option<LockAction> {
    if !path.is_managed() {
        return None;
    }
    Some(if writable {
        LockAction::Release
    } else {
        LockAction::Acquire
    })
}

/// Stateless mediator between the notebook UI and a [`LockService`].
#[derive(Debug, Clone)]
pub struct LockCoordinator<S> {
    service: S,
}

impl<S: LockService> LockCoordinator<S> {
    pub fn new(service: S) -> Self {
        LockCoordinator { service }
    }

    /// See [`determine_action`].
    pub fn determine_action(path: &ResourcePath, writable: bool) -> Option<LockAction> {
        determine_action(path, writable)
    }

    /// Send `action` for `path` to the lock service, once.
    ///
    /// Never fails: transport, status and protocol problems come back as a
    /// failed [`ActionResult`] with a diagnostic, remote refusals with the
    /// service's own message. Unmanaged paths are refused without a request.
    pub async fn perform(&self, action: LockAction, path: &ResourcePath) -> ActionResult {
        let request = match ActionRequest::new(action, path.clone()) {
            Ok(request) => request,
            Err(err) => {
                warn!(%action, %path, error_kind = err.kind(), "refusing lock action");
                return err.into();
            }
        };

        match self.service.submit(&request).await {
            Ok(result) if result.is_success() => {
                info!(%action, %path, "lock action succeeded");
                result
            }
            Ok(result) => {
                warn!(
                    %action,
                    %path,
                    error_kind = "rejected",
                    reason = result.message().unwrap_or_default(),
                    "lock service rejected action"
                );
                result
            }
            Err(err) => {
                warn!(%action, %path, error_kind = err.kind(), error = %err, "lock action failed");
                err.into()
            }
        }
    }

    /// Decide and perform in one step, as a toolbar click does.
    ///
    /// `None` when no action applies to `path`.
    pub async fn toggle(&self, path: &ResourcePath, writable: bool) -> Option<ActionResult> {
        let action = determine_action(path, writable)?;
        Some(self.perform(action, path).await)
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
