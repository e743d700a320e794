use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ActionRequest, ActionResult, LockAction, LockError, LockService, LockState};
use crate::path::ResourcePath;

/// In-memory owner table implementing the lock service's arbitration rules.
///
/// One `Mutex<HashMap<path, owner>>` serializes every transition, so two
/// sessions racing to acquire the same path see exactly one winner.
/// Shared (via `Arc`) by [`InMemoryLockService`] handles and by the HTTP
/// contract server.
#[derive(Debug, Default)]
pub struct InMemoryLockTable {
    owners: Mutex<HashMap<String, String>>,
}

impl InMemoryLockTable {
    pub fn new() -> Self {
        InMemoryLockTable {
            owners: Mutex::new(HashMap::new()),
        }
    }

    /// Apply one request on behalf of `caller`.
    ///
    /// Returns a failed result for refused transitions; `Err` only when the
    /// table itself is unusable.
    pub fn apply(&self, caller: &str, request: &ActionRequest) -> Result<ActionResult, LockError> {
        let path = request.path();
        if !path.is_managed() {
            return Ok(LockError::Unmanaged(path.to_string()).into());
        }

        let mut owners = self
            .owners
            .lock()
            .map_err(|_| LockError::Poisoned("owner map".into()))?;
        let current = owners.get(path.as_str()).cloned();

        let result = match (request.action(), current) {
            (LockAction::Acquire, None) => {
                owners.insert(path.to_string(), caller.to_string());
                ActionResult::ok()
            }
            (LockAction::Acquire, Some(owner)) if owner == caller => ActionResult::ok(),
            (LockAction::Acquire, Some(owner)) => {
                ActionResult::failed(format!("{path} is already locked by {owner}"))
            }
            (LockAction::Release, Some(owner)) if owner == caller => {
                owners.remove(path.as_str());
                ActionResult::ok()
            }
            (LockAction::Release, _) => {
                ActionResult::failed(format!("{path} is not locked by {caller}"))
            }
        };
        Ok(result)
    }

    /// Lock state of `path` as seen by `caller`.
    pub fn state(&self, path: &ResourcePath, caller: &str) -> Result<LockState, LockError> {
        let owners = self
            .owners
            .lock()
            .map_err(|_| LockError::Poisoned("owner map".into()))?;
        Ok(match owners.get(path.as_str()) {
            None => LockState::Unlocked,
            Some(owner) if owner == caller => LockState::LockedByCaller,
            Some(_) => LockState::LockedByOther,
        })
    }

    /// Current owner of `path`, if locked.
    pub fn owner(&self, path: &ResourcePath) -> Result<Option<String>, LockError> {
        let owners = self
            .owners
            .lock()
            .map_err(|_| LockError::Poisoned("owner map".into()))?;
        Ok(owners.get(path.as_str()).cloned())
    }
}

/// A [`LockService`] bound to one session identity over a shared table.
#[derive(Debug, Clone)]
pub struct InMemoryLockService {
    table: Arc<InMemoryLockTable>,
    owner: String,
}

impl InMemoryLockService {
    /// A service over a fresh table.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_table(Arc::new(InMemoryLockTable::new()), owner)
    }

    pub fn with_table(table: Arc<InMemoryLockTable>, owner: impl Into<String>) -> Self {
        InMemoryLockService {
            table,
            owner: owner.into(),
        }
    }

    /// Another session over the same table.
    pub fn session(&self, owner: impl Into<String>) -> Self {
        Self::with_table(Arc::clone(&self.table), owner)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn table(&self) -> &Arc<InMemoryLockTable> {
        &self.table
    }

    /// Lock state of `path` for this session.
    pub fn state(&self, path: &ResourcePath) -> Result<LockState, LockError> {
        self.table.state(path, &self.owner)
    }
}

#[async_trait]
impl LockService for InMemoryLockService {
    async fn submit(&self, request: &ActionRequest) -> Result<ActionResult, LockError> {
        self.table.apply(&self.owner, request)
    }
}
