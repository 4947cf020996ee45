//! Client configuration
//!
//! Loaded from an optional JSON file. Every field has a default, so an
//! empty object (or no file at all) is a valid configuration. Command-line
//! flags are applied on top with [`ClientConfig::apply_overrides`].
//!
//! ```json
//! {
//!   "server_url": "http://127.0.0.1:5000",
//!   "timeout_secs": 10,
//!   "message_clear_ms": 2000,
//!   "default_method": "truth-table",
//!   "log_level": "warn"
//! }
//! ```

mod errors;

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::InferenceMethod;
use crate::observability::Severity;

pub use errors::{ConfigError, ConfigResult};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend base URL (default: "http://127.0.0.1:5000")
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay before a success message clears itself (default: 2000)
    #[serde(default = "default_message_clear_ms")]
    pub message_clear_ms: u64,

    /// Inference method selected at startup (default: "truth-table")
    #[serde(default)]
    pub default_method: InferenceMethod,

    /// Minimum log severity. Unset means WARN in the REPL and INFO for
    /// one-shot commands.
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_message_clear_ms() -> u64 {
    2000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            message_clear_ms: default_message_clear_ms(),
            default_method: InferenceMethod::default(),
            log_level: None,
        }
    }
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub method: Option<InferenceMethod>,
    pub log_level: Option<String>,
}

impl ClientConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise start from the defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.server_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "server_url",
                format!("'{}' must start with http:// or https://", self.server_url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be > 0"));
        }
        if self.message_clear_ms == 0 {
            return Err(ConfigError::invalid("message_clear_ms", "must be > 0"));
        }
        self.severity(Severity::Info)?;
        Ok(())
    }

    /// Apply command-line overrides and re-validate
    pub fn apply_overrides(mut self, overrides: Overrides) -> ConfigResult<Self> {
        if let Some(url) = overrides.server_url {
            self.server_url = url;
        }
        if let Some(method) = overrides.method {
            self.default_method = method;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        self.validate()?;
        Ok(self)
    }

    /// The configured minimum log severity, or `fallback` when unset
    pub fn severity(&self, fallback: Severity) -> ConfigResult<Severity> {
        match &self.log_level {
            Some(level) => level
                .parse()
                .map_err(|reason: String| ConfigError::invalid("log_level", reason)),
            None => Ok(fallback),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn message_clear_after(&self) -> Duration {
        Duration::from_millis(self.message_clear_ms)
    }
}
