//! Lock/publish coordination for wiki-managed notebooks.
//!
//! A notebook whose file name starts with `_` is under wiki governance. Its
//! toolbar offers "edit" (acquire the lock) while it is read-only and
//! "publish" (release the lock) while the session holds it. The
//! [`LockCoordinator`] picks the action and forwards it to the remote
//! [`LockService`], which alone decides who owns what.

mod config;
mod coordinator;
mod error;
mod lock;
mod path;

#[cfg(feature = "http")]
pub mod server;

pub use config::{ConfigLoader, WikiConfig, DEFAULT_CONFIG_FILENAME, DEFAULT_ENV_PREFIX};
pub use coordinator::{determine_action, LockCoordinator};
pub use error::ConfigError;
pub use lock::{
    ActionRequest, ActionResult, HttpLockService, InMemoryLockService, InMemoryLockTable,
    LockAction, LockError, LockService, LockState,
};
pub use path::{ResourcePath, MANAGED_MARKER};
