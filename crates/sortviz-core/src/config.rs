//! Configuration loading and typed config structures for the visualizer.
//!
//! The canonical configuration lives in `sortviz-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads and validates the
//! file. Every field has a default matching the classic visualizer
//! (100 bars, values 10..=410, 10 ms per step).

use std::path::Path;

use serde::Deserialize;

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

    /// Configuration values fail validation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level visualizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VisualizerConfig {
    /// Array generation settings.
    #[serde(default)]
    pub array: ArrayConfig,

    /// Step pacing settings.
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Demo run settings for the engine binary.
    #[serde(default)]
    pub demo: DemoConfig,
}

impl VisualizerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The environment variable `SORTVIZ_STEP_DELAY_MS` overrides
    /// `pacing.step_delay_ms` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.pacing.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.pacing.apply_env_overrides();
        Ok(config)
    }

    /// Validate field values against the engine's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array.size == 0 {
            return Err(ConfigError::Invalid {
                reason: "array.size must be at least 1".to_owned(),
            });
        }
        if self.array.min_value > self.array.max_value {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "array.min_value {} exceeds array.max_value {}",
                    self.array.min_value, self.array.max_value
                ),
            });
        }
        if sortviz_types::Algorithm::from_name(&self.demo.algorithm).is_none() {
            return Err(ConfigError::Invalid {
                reason: format!("demo.algorithm is not a known algorithm: {}", self.demo.algorithm),
            });
        }
        Ok(())
    }
}

/// Array generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArrayConfig {
    /// Number of elements to generate.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Smallest generated value (inclusive).
    #[serde(default = "default_min_value")]
    pub min_value: u32,

    /// Largest generated value (inclusive); bounded for display height.
    #[serde(default = "default_max_value")]
    pub max_value: u32,

    /// Random seed for reproducible arrays. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            min_value: default_min_value(),
            max_value: default_max_value(),
            seed: None,
        }
    }
}

/// Step pacing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PacingConfig {
    /// Milliseconds each visible step is held on screen. 0 disables
    /// pacing.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl PacingConfig {
    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("SORTVIZ_STEP_DELAY_MS") {
            if let Ok(ms) = raw.parse::<u64>() {
                self.step_delay_ms = ms;
            }
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

/// Demo run configuration for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Name of the algorithm the demo runs (see `Algorithm::from_name`).
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
        }
    }
}

const fn default_size() -> usize {
    100
}

const fn default_min_value() -> u32 {
    10
}

const fn default_max_value() -> u32 {
    410
}

const fn default_step_delay_ms() -> u64 {
    crate::emitter::DEFAULT_STEP_DELAY_MS
}

fn default_algorithm() -> String {
    String::from("quick")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_visualizer() {
        let config = VisualizerConfig::default();
        assert_eq!(config.array.size, 100);
        assert_eq!(config.array.min_value, 10);
        assert_eq!(config.array.max_value, 410);
        assert_eq!(config.array.seed, None);
        assert_eq!(config.pacing.step_delay_ms, 10);
        assert_eq!(config.demo.algorithm, "quick");
        config.validate().unwrap();
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let config = VisualizerConfig::parse(
            "array:\n  size: 64\n  seed: 7\ndemo:\n  algorithm: merge\n",
        )
        .unwrap();
        assert_eq!(config.array.size, 64);
        assert_eq!(config.array.seed, Some(7));
        assert_eq!(config.array.min_value, 10);
        assert_eq!(config.demo.algorithm, "merge");
    }

    #[test]
    fn rejects_zero_size() {
        let config = VisualizerConfig::parse("array:\n  size: 0\n").unwrap();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_inverted_range() {
        let config =
            VisualizerConfig::parse("array:\n  min_value: 500\n  max_value: 10\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_demo_algorithm() {
        let config = VisualizerConfig::parse("demo:\n  algorithm: bogo\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = VisualizerConfig::parse(": not yaml");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
