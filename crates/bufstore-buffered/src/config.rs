use bufstore_store::DEFAULT_KEY_CHANNEL_CAPACITY;
use serde::{Deserialize, Serialize};

/// Errors from loading a [`BufferConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    #[error("config parse error: {0}")]
    Parse(String),

    /// A setting is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for a [`BufferedStore`](crate::BufferedStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    /// Enable hash verification on read in both stores at construction.
    /// When `false` the stores keep whatever setting they already had.
    pub hash_on_read: bool,
    /// Buffer size of the merged key stream. Kept small so the consumer
    /// paces both upstream enumerations.
    pub key_stream_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            hash_on_read: false,
            key_stream_capacity: DEFAULT_KEY_CHANNEL_CAPACITY,
        }
    }
}

impl BufferConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the store cannot honour.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.key_stream_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "key_stream_capacity",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
