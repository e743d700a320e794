//! Lock vocabulary and the seam to the remote lock service.

mod action;
mod error;
mod http;
mod in_memory;
mod service;

pub use action::{ActionRequest, ActionResult, LockAction, LockState};
pub use error::LockError;
pub use http::HttpLockService;
pub use in_memory::{InMemoryLockService, InMemoryLockTable};
pub use service::LockService;
