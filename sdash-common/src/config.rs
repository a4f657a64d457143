//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. User config directory (`~/.config/sdash/config.toml` on Linux)
//! 4. Built-in defaults (no file)
//!
//! Missing optional files are not an error; the service starts on defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SDASH_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port (loopback only)
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Upload and session limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,

    /// Fragments kept per uploaded file
    #[serde(default = "default_max_fragments")]
    pub max_fragments: usize,

    /// Past analyses kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_fragments: default_max_fragments(),
            history_limit: default_history_limit(),
        }
    }
}

/// How confidence is chosen inside the documented jitter bands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitterMode {
    /// Fixed midpoint of each band
    #[default]
    Midpoint,
    /// Deterministic draw derived from `seed` and the text
    Seeded,
}

/// Classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub jitter: JitterMode,

    /// Required when `jitter = "seeded"`
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_port() -> u16 {
    5790
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_file_size() -> u64 {
    crate::MAX_FILE_SIZE_BYTES
}

fn default_max_fragments() -> usize {
    crate::MAX_FRAGMENTS_PER_FILE
}

fn default_history_limit() -> usize {
    crate::HISTORY_LIMIT
}

impl TomlConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration following the resolution priority
    ///
    /// An explicitly named file (CLI or environment) must exist. Without one,
    /// the user config file is used when present, otherwise built-in defaults.
    pub fn load(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg, CONFIG_ENV_VAR) {
            Some(ConfigSource::Explicit(path)) => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            Some(ConfigSource::UserDefault(path)) => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                warn!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_file_size_bytes == 0 {
            return Err(Error::Config("max_file_size_bytes must be positive".to_string()));
        }
        if self.limits.max_fragments == 0 {
            return Err(Error::Config("max_fragments must be positive".to_string()));
        }
        if self.limits.history_limit == 0 {
            return Err(Error::Config("history_limit must be positive".to_string()));
        }
        if self.classifier.jitter == JitterMode::Seeded && self.classifier.seed.is_none() {
            return Err(Error::Config(
                "classifier.seed is required when classifier.jitter = \"seeded\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a config file path came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line or in the environment
    Explicit(PathBuf),
    /// Found in the platform config directory
    UserDefault(PathBuf),
}

/// Resolve the config file path
///
/// Priority: command-line argument, then environment variable, then the
/// user config file if it exists.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<ConfigSource> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(ConfigSource::Explicit(PathBuf::from(path)));
        }
    }

    // Priority 3: User config file
    default_config_path()
        .filter(|path| path.exists())
        .map(ConfigSource::UserDefault)
}

/// Platform config file location (`<config_dir>/sdash/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sdash").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5790);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.limits.max_fragments, 100);
        assert_eq!(config.limits.history_limit, 10);
        assert_eq!(config.classifier.jitter, JitterMode::Midpoint);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 6000

            [limits]
            max_fragments = 25

            [classifier]
            jitter = "seeded"
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.limits.max_fragments, 25);
        assert_eq!(config.limits.history_limit, 10);
        assert_eq!(config.classifier.jitter, JitterMode::Seeded);
        assert_eq!(config.classifier.seed, Some(42));
    }

    #[test]
    fn test_seeded_without_seed_rejected() {
        let err = TomlConfig::from_toml_str("[classifier]\njitter = \"seeded\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = TomlConfig::from_toml_str("[limits]\nmax_fragments = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_fragments"));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(err.to_string().contains("Parse TOML failed"));
    }

    #[test]
    fn test_cli_argument_wins() {
        let cli = PathBuf::from("/tmp/sdash-cli.toml");
        let resolved = resolve_config_path(Some(&cli), "SDASH_TEST_UNUSED_VAR");
        assert_eq!(resolved, Some(ConfigSource::Explicit(cli)));
    }
}
