//! Placeholder configuration system
//!
//! This crate provides the tunable defaults for placeholder effects (highlight
//! timings, cross-fade spring, material-style color alphas), loaded from
//! `placeholder.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "placeholder.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure for placeholder effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaceholderSettings {
    /// Pulsing fade highlight timing
    pub fade: HighlightTiming,
    /// Sweeping shimmer highlight timing
    pub shimmer: ShimmerTiming,
    /// Spring used to cross-fade content and placeholder
    pub crossfade: CrossfadeSettings,
    /// Alphas used to derive colors from a surface/content color pair
    pub material: MaterialSettings,
}

/// One period of a repeating highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTiming {
    /// Length of one sweep or pulse in milliseconds
    pub duration_ms: f32,
    /// Pause before each iteration in milliseconds
    pub delay_ms: f32,
}

/// Shimmer timing plus the width of the bright band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerTiming {
    pub duration_ms: f32,
    pub delay_ms: f32,
    /// Band width as a fraction of the larger placeholder dimension
    pub band_fraction: f32,
}

/// Cross-fade spring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossfadeSettings {
    /// 1.0 is critically damped; lower values bounce
    pub damping_ratio: f32,
    pub stiffness: f32,
}

/// Material-style color derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Alpha of the content color composited over the background for the placeholder fill
    pub content_alpha: f32,
    /// Alpha of the background color used as fade highlight
    pub fade_highlight_alpha: f32,
    /// Alpha of the background color used as shimmer highlight
    pub shimmer_highlight_alpha: f32,
}

impl Default for HighlightTiming {
    fn default() -> Self {
        Self {
            duration_ms: 600.0,
            delay_ms: 200.0,
        }
    }
}

impl Default for ShimmerTiming {
    fn default() -> Self {
        Self {
            duration_ms: 1700.0,
            delay_ms: 200.0,
            band_fraction: 0.5,
        }
    }
}

impl Default for CrossfadeSettings {
    fn default() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
        }
    }
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            content_alpha: 0.1,
            fade_highlight_alpha: 0.3,
            shimmer_highlight_alpha: 0.75,
        }
    }
}

impl PlaceholderSettings {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the placeholder.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location (placeholder.toml in the current directory)
    /// or return default configuration if the file doesn't exist or is invalid
    pub fn load_or_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load_from_file(path).unwrap_or_else(|err| {
            warn!("ignoring {}: {}", DEFAULT_CONFIG_FILE, err);
            Self::default()
        })
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable values are ignored.
    pub fn merge_with_env(&mut self) {
        let read = |name: &str| std::env::var(name).ok().and_then(|v| v.parse::<f32>().ok());

        if let Some(v) = read("PLACEHOLDER_FADE_DURATION_MS") {
            self.fade.duration_ms = v;
        }
        if let Some(v) = read("PLACEHOLDER_FADE_DELAY_MS") {
            self.fade.delay_ms = v;
        }
        if let Some(v) = read("PLACEHOLDER_SHIMMER_DURATION_MS") {
            self.shimmer.duration_ms = v;
        }
        if let Some(v) = read("PLACEHOLDER_SHIMMER_DELAY_MS") {
            self.shimmer.delay_ms = v;
        }
        if let Some(v) = read("PLACEHOLDER_CROSSFADE_STIFFNESS") {
            self.crossfade.stiffness = v;
        }
        if let Some(v) = read("PLACEHOLDER_CROSSFADE_DAMPING") {
            self.crossfade.damping_ratio = v;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from placeholder.toml (or use defaults if not found)
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

    #[test]
    fn test_default_config() {
        let config = PlaceholderSettings::default();
        assert_eq!(config.fade.duration_ms, 600.0);
        assert_eq!(config.fade.delay_ms, 200.0);
        assert_eq!(config.shimmer.duration_ms, 1700.0);
        assert_eq!(config.crossfade.stiffness, 1500.0);
        assert_eq!(config.material.shimmer_highlight_alpha, 0.75);
    }

    #[test]
    fn test_toml_serialization() {
        let config = PlaceholderSettings::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = PlaceholderSettings::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed = PlaceholderSettings::from_toml_str(
            r#"
            [shimmer]
            duration_ms = 900.0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.shimmer.duration_ms, 900.0);
        assert_eq!(parsed.shimmer.delay_ms, 200.0);
        assert_eq!(parsed.fade, HighlightTiming::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = PlaceholderSettings::from_toml_str("[fade\nduration_ms = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("PLACEHOLDER_SHIMMER_DELAY_MS", "50");
            std::env::set_var("PLACEHOLDER_CROSSFADE_STIFFNESS", "not-a-number");
        }

        let mut config = PlaceholderSettings::default();
        config.merge_with_env();

        assert_eq!(config.shimmer.delay_ms, 50.0);
        assert_eq!(config.crossfade.stiffness, 1500.0);

        unsafe {
            std::env::remove_var("PLACEHOLDER_SHIMMER_DELAY_MS");
            std::env::remove_var("PLACEHOLDER_CROSSFADE_STIFFNESS");
        }
    }
}
