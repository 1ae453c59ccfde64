//! Blossom configuration system
//!
//! This crate provides centralized configuration for the Blossom widget
//! library, loading settings from `blossom.toml` with environment variable
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`BlossomConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A timing mode string was not recognised.
    #[error("unknown timing mode `{0}` (expected auto, native or manual)")]
    UnknownTimingMode(String),
}

/// Main configuration structure for Blossom
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BlossomConfig {
    /// Animation scheduling settings
    pub timing: TimingConfig,
    /// Status indicator defaults
    pub indicator: IndicatorConfig,
}

/// How delayed animation starts are scheduled on the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Trust whatever the backend reports about native delay support.
    #[default]
    Auto,
    /// Always hand delays to the backend.
    Native,
    /// Always defer creation with a timer, even if the backend could delay.
    Manual,
}

impl FromStr for TimingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "native" => Ok(Self::Native),
            "manual" => Ok(Self::Manual),
            other => Err(ConfigError::UnknownTimingMode(other.to_string())),
        }
    }
}

/// Animation scheduling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Override for the backend's delayed-start capability
    pub mode: TimingMode,
}

/// Status indicator defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Default animation variant name (kebab-case, e.g. "pulse", "ripple")
    pub variant: String,
    /// Default size token name (e.g. "medium", "extra-large")
    pub size: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            variant: "default".to_string(),
            size: "medium".to_string(),
        }
    }
}

impl BlossomConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `blossom.toml` in the current directory,
    /// or return the default configuration if the file is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file("blossom.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("BLOSSOM_TIMING_MODE") {
            if let Ok(mode) = val.parse::<TimingMode>() {
                self.timing.mode = mode;
            }
        }
        if let Ok(variant) = std::env::var("BLOSSOM_INDICATOR_VARIANT") {
            self.indicator.variant = variant;
        }
        if let Ok(size) = std::env::var("BLOSSOM_INDICATOR_SIZE") {
            self.indicator.size = size;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from blossom.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BlossomConfig::default();
        assert_eq!(config.timing.mode, TimingMode::Auto);
        assert_eq!(config.indicator.variant, "default");
        assert_eq!(config.indicator.size, "medium");
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = BlossomConfig::default();
        config.timing.mode = TimingMode::Manual;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: BlossomConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timing.mode, TimingMode::Manual);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: BlossomConfig = toml::from_str("[indicator]\nvariant = \"ripple\"\n").unwrap();
        assert_eq!(parsed.indicator.variant, "ripple");
        assert_eq!(parsed.indicator.size, "medium");
        assert_eq!(parsed.timing.mode, TimingMode::Auto);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nmode = \"native\"\n[indicator]\nsize = \"large\"").unwrap();

        let config = BlossomConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.timing.mode, TimingMode::Native);
        assert_eq!(config.indicator.size, "large");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = BlossomConfig::load_from_file("/definitely/not/here/blossom.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nmode = \"sideways\"").unwrap();

        let err = BlossomConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_timing_mode_from_str() {
        assert_eq!("Manual".parse::<TimingMode>().unwrap(), TimingMode::Manual);
        assert_eq!(" native ".parse::<TimingMode>().unwrap(), TimingMode::Native);
        assert!("later".parse::<TimingMode>().is_err());
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("BLOSSOM_TIMING_MODE", "manual");
            std::env::set_var("BLOSSOM_INDICATOR_VARIANT", "sonar");
        }

        let mut config = BlossomConfig::default();
        config.merge_with_env();

        assert_eq!(config.timing.mode, TimingMode::Manual);
        assert_eq!(config.indicator.variant, "sonar");

        unsafe {
            std::env::remove_var("BLOSSOM_TIMING_MODE");
            std::env::remove_var("BLOSSOM_INDICATOR_VARIANT");
        }
    }
}
