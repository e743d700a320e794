//! Client configuration.
//!
//! Sources are merged in this order, later overriding earlier:
//! 1. `WikiConfig::default()`
//! 2. a TOML file (explicit path, or `wiki-lock.toml` in the working directory)
//! 3. environment variables prefixed `WIKI_LOCK_` (e.g. `WIKI_LOCK_BASE_URL`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILENAME: &str = "wiki-lock.toml";
pub const DEFAULT_ENV_PREFIX: &str = "WIKI_LOCK_";

/// Where the lock endpoint lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Notebook server base URL, including any base path prefix.
    pub base_url: String,
    /// Endpoint path below `base_url`.
    pub endpoint: String,
    /// Per-request timeout. A timeout is reported as a transport failure.
    pub request_timeout_ms: u64,
    /// Sent verbatim as the `Authorization` header when set.
    pub auth_token: Option<String>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        WikiConfig {
            base_url: "http://127.0.0.1:8888".to_string(),
            endpoint: "api/wiki".to_string(),
            request_timeout_ms: 30_000,
            auth_token: None,
        }
    }
}

impl WikiConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        WikiConfig {
            base_url: base_url.into(),
            ..WikiConfig::default()
        }
    }

    /// `base_url` and `endpoint` joined by exactly one `/`.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.endpoint.trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Loads [`WikiConfig`] from defaults, a TOML file and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        ConfigLoader {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Read this TOML file instead of looking for `wiki-lock.toml`.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<WikiConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(WikiConfig::default()));

        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        if path.exists() {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(&path));
        } else if self.config_path.is_some() {
            return Err(ConfigError::Invalid(format!(
                "config file {} does not exist",
                path.display()
            )));
        }

        // Env values are type-sniffed, so a numeric token would arrive as an
        // integer. The token is read raw instead.
        figment = figment.merge(Env::prefixed(&self.env_prefix).ignore(&["auth_token"]));
        if let Ok(token) = std::env::var(format!("{}AUTH_TOKEN", self.env_prefix)) {
            figment = figment.merge(Serialized::default("auth_token", token));
        }

        let config: WikiConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
