use thiserror::Error;

/// Error type for loading [`WikiConfig`](crate::WikiConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the config shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    /// Values loaded but failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(Box::new(err))
    }
}
