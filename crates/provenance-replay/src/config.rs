//! Configuration loading and typed config structures for the replay host.
//!
//! The host owns the facts the ledger consumes but never decides: who the
//! admin is and which block height the chain starts at. Both come from a YAML
//! file; `PROVENANCE_ADMIN` overrides the admin identity.

use std::path::Path;

use serde::Deserialize;

use provenance_types::{BlockHeight, Principal};

/// Environment variable overriding `ledger.admin`.
pub const ADMIN_ENV: &str = "PROVENANCE_ADMIN";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Ledger identity and genesis settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HostConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if no admin is configured.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if no admin is configured.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_admin(yaml, std::env::var(ADMIN_ENV).ok())
    }

    /// Parse configuration from a YAML string with an explicit admin override.
    ///
    /// # Errors
    ///
    /// Same as [`HostConfig::parse`].
    pub fn parse_with_admin(yaml: &str, admin: Option<String>) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.ledger.override_admin(admin);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.admin.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: format!("ledger.admin must be set (or {ADMIN_ENV})"),
            });
        }
        Ok(())
    }
}

/// Ledger identity and genesis settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// The single admin identity.
    #[serde(default)]
    pub admin: String,

    /// Block height the clock starts at.
    #[serde(default)]
    pub genesis_height: u64,
}

impl LedgerConfig {
    /// Replace the admin when an override (normally [`ADMIN_ENV`]) is given.
    pub fn override_admin(&mut self, admin: Option<String>) {
        if let Some(val) = admin {
            self.admin = val;
        }
    }

    /// Return the admin as a [`Principal`].
    pub fn admin_principal(&self) -> Principal {
        Principal::new(self.admin.trim())
    }

    /// Return the genesis height.
    pub const fn genesis(&self) -> BlockHeight {
        BlockHeight(self.genesis_height)
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Subscriber output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
