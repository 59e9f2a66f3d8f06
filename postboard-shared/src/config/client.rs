use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::Path};

/// Errors raised while resolving a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was asked for
        path: String,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or JSON for [`ClientConfig`]
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// The file extension is neither `.toml` nor `.json`
    #[error("unsupported configuration format '{0}'. Use 'toml' or 'json'.")]
    UnsupportedFormat(String),

    /// A setting holds an unusable value
    #[error("invalid configuration: {field} - {message}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Client settings, resolved from defaults, an optional file, and the
/// `POSTBOARD_*` environment variables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the posts backend, e.g. `http://localhost:5000`
    pub api_base_url: String,

    /// Logging level or `tracing` filter directive
    pub log_level: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Overrides `api_base_url`
    pub const ENV_API_URL: &'static str = "POSTBOARD_API_URL";
    /// Overrides `log_level`
    pub const ENV_LOG_LEVEL: &'static str = "POSTBOARD_LOG_LEVEL";
    /// Overrides `request_timeout_secs`
    pub const ENV_TIMEOUT: &'static str = "POSTBOARD_TIMEOUT_SECS";

    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a `.toml` or `.json` configuration file.
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed, or the result is invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Apply environment variables to fields that still hold their default.
    ///
    /// `lookup` resolves a variable name to its value.
    ///
    /// # Errors
    /// Fails when the timeout variable is not a number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::with_defaults();

        if self.api_base_url == defaults.api_base_url
            && let Some(url) = lookup(Self::ENV_API_URL)
        {
            self.api_base_url = url;
        }
        if self.log_level == defaults.log_level
            && let Some(level) = lookup(Self::ENV_LOG_LEVEL)
        {
            self.log_level = level;
        }
        if self.request_timeout_secs == defaults.request_timeout_secs
            && let Some(raw) = lookup(Self::ENV_TIMEOUT)
        {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "request_timeout_secs",
                message: format!("{} must be a whole number of seconds", Self::ENV_TIMEOUT),
            })?;
        }

        Ok(())
    }

    /// Reject settings no client could work with.
    ///
    /// # Errors
    /// Names the first field that is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url).map_err(|err| ConfigError::Invalid {
            field: "api_base_url",
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "api_base_url",
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_level",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// `request_timeout_secs` as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Render as TOML, the format `load_config` reads back.
    ///
    /// # Errors
    /// Only fails if serialization itself fails.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}
