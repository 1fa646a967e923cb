//! Configuration management for mcsign.
//!
//! Parses `mcsign.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `signing.consumer_key`
//! - `signing.private_key`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mcsign.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override consumer key.
    pub consumer_key: Option<String>,
    /// Override private key path (relative to the working directory).
    pub private_key: Option<PathBuf>,
    /// Override signature method name.
    pub signature_method: Option<String>,
    /// Override charset name.
    pub charset: Option<String>,
}

impl CliSettings {
    fn is_empty(&self) -> bool {
        self.consumer_key.is_none()
            && self.private_key.is_none()
            && self.signature_method.is_none()
            && self.charset.is_none()
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signing section as parsed from TOML.
    #[serde(rename = "signing")]
    signing_raw: Option<SigningConfigRaw>,

    /// Resolved signing configuration (set after loading).
    #[serde(skip)]
    pub signing: Option<SigningConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw signing configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
struct SigningConfigRaw {
    consumer_key: String,
    private_key: String,
    signature_method: Option<String>,
    charset: Option<String>,
}

/// Resolved signing configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SigningConfig {
    /// Consumer key of the Mastercard Developers project.
    pub consumer_key: String,
    /// Path to the PEM private key.
    pub private_key: PathBuf,
    /// Signature method name; `None` probes.
    pub signature_method: Option<String>,
    /// Charset name; `None` means UTF-8.
    pub charset: Option<String>,
}

impl SigningConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.consumer_key, "signing.consumer_key")?;
        if self.private_key.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "signing.private_key cannot be empty".to_owned(),
            ));
        }
        if let Some(method) = &self.signature_method {
            require_non_empty(method, "signing.signature_method")?;
        }
        if let Some(charset) = &self.charset {
            require_non_empty(charset, "signing.charset")?;
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`signing.consumer_key`").
        field: String,
        /// Error message (e.g., "${`MC_CONSUMER_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mcsign.toml` in the current directory and
    /// parents, falling back to an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a referenced environment variable is unset.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Get validated signing configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither the `[signing]` section
    /// nor CLI settings provided credentials, or a field is invalid.
    pub fn require_signing(&self) -> Result<&SigningConfig, ConfigError> {
        let signing = self.signing.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[signing] section or --consumer-key/--private-key required".into(),
            )
        })?;
        signing.validate()?;
        Ok(signing)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.is_empty() {
            return;
        }
        let signing = self.signing.get_or_insert_with(SigningConfig::default);

        if let Some(consumer_key) = &settings.consumer_key {
            signing.consumer_key.clone_from(consumer_key);
        }
        if let Some(private_key) = &settings.private_key {
            signing.private_key.clone_from(private_key);
        }
        if let Some(method) = &settings.signature_method {
            signing.signature_method = Some(method.clone());
        }
        if let Some(charset) = &settings.charset {
            signing.charset = Some(charset.clone());
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut signing) = self.signing_raw {
            signing.consumer_key =
                expand::expand_env(&signing.consumer_key, "signing.consumer_key")?;
            signing.private_key = expand::expand_env(&signing.private_key, "signing.private_key")?;
        }
        Ok(())
    }

    /// Resolve the private key path against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.signing = self.signing_raw.as_ref().map(|raw| SigningConfig {
            consumer_key: raw.consumer_key.clone(),
            private_key: if raw.private_key.is_empty() {
                PathBuf::new()
            } else {
                config_dir.join(&raw.private_key)
            },
            signature_method: raw.signature_method.clone(),
            charset: raw.charset.clone(),
        });
    }
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
