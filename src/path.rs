//! Resource paths and the managed-path rule.
//!
//! A wiki notebook is "managed" when the final segment of its path starts
//! with `_`. Only managed paths take part in the lock/publish workflow;
//! everything else is an ordinary file the wiki leaves alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker character that puts a file under wiki governance.
pub const MANAGED_MARKER: char = '_';

/// A slash-delimited resource identifier, as reported by the notebook host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        ResourcePath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment. Empty for `""` and for directory paths ending in `/`.
    pub fn file_name(&self) -> &str {
        let trimmed = self.0.strip_prefix('/').unwrap_or(&self.0);
        trimmed.rsplit('/').next().unwrap_or("")
    }

    /// True iff the final segment begins with [`MANAGED_MARKER`].
    pub fn is_managed(&self) -> bool {
        self.file_name().starts_with(MANAGED_MARKER)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        ResourcePath::new(path)
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        ResourcePath(path)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
