use std::sync::Arc;

use async_trait::async_trait;

use super::{ActionRequest, ActionResult, LockError};

/// The remote authority over per-path lock ownership.
///
/// Implementations send one request and report what the authority said.
/// A well-formed refusal is `Ok` with a failed [`ActionResult`]; `Err` is
/// reserved for requests that never got a proper answer. The HTTP client
/// talks to a real server; `InMemoryLockService` arbitrates in-process.
#[async_trait]
pub trait LockService: Send + Sync {
    /// Submit a single request. Never retried by the implementation.
    async fn submit(&self, request: &ActionRequest) -> Result<ActionResult, LockError>;
}

#[async_trait]
impl<S: LockService + ?Sized> LockService for Arc<S> {
    async fn submit(&self, request: &ActionRequest) -> Result<ActionResult, LockError> {
        (**self).submit(request).await
    }
}
