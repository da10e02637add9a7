//! Configuration parsing from YAML/JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::validate_config_schema;
use crate::confidence::DEFAULT_SOURCE_QUALITY_WEIGHT;
use crate::prompts::Mode;
use crate::InvalidInputError;

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Invalid config: {0}")]
    Invalid(#[from] InvalidInputError),
}

/// Settings for one protocol instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Phrasing and interaction mode
    #[serde(default)]
    pub mode: Mode,

    /// Multiplier on the source component of confidence, in [0, 1]
    #[serde(default = "default_source_quality_weight")]
    pub source_quality_weight: f64,
}

fn default_source_quality_weight() -> f64 {
    DEFAULT_SOURCE_QUALITY_WEIGHT
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            source_quality_weight: DEFAULT_SOURCE_QUALITY_WEIGHT,
        }
    }
}

impl ProtocolConfig {
    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        // An empty YAML document parses to null
        let value = if value.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            value
        };

        validate_config_schema(&value).map_err(ConfigError::SchemaError)?;

        let config: ProtocolConfig = serde_json::from_value(value)?;
        config.validate()?;

        tracing::debug!(
            mode = %config.mode,
            source_quality_weight = config.source_quality_weight,
            "loaded protocol config"
        );
        Ok(config)
    }

    /// Check values the schema cannot express, such as NaN weights built in code.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let weight = self.source_quality_weight;
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(InvalidInputError::InvalidSourceWeight(weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
mode: deep-auto
source_quality_weight: 0.75
"#;
        let config = ProtocolConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.mode, Mode::DeepAuto);
        assert_eq!(config.source_quality_weight, 0.75);
    }

    #[test]
    fn test_parse_json() {
        let config = ProtocolConfig::from_json(r#"{"mode": "deep-ask"}"#).unwrap();
        assert_eq!(config.mode, Mode::DeepAsk);
        assert_eq!(config.source_quality_weight, 1.0);
    }

    #[test]
    fn test_empty_mapping_gives_defaults() {
        let config = ProtocolConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ProtocolConfig::default());
    }

    #[test]
    fn test_unknown_mode_is_schema_error() {
        let err = ProtocolConfig::from_yaml("mode: socratic").unwrap_err();
        assert!(matches!(err, ConfigError::SchemaError(_)));
    }

    #[test]
    fn test_weight_above_one_is_schema_error() {
        let err = ProtocolConfig::from_json(r#"{"source_quality_weight": 2}"#).unwrap_err();
        assert!(matches!(err, ConfigError::SchemaError(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ProtocolConfig::from_yaml("mode: [basic").unwrap_err();
        assert!(matches!(err, ConfigError::YamlError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ProtocolConfig::from_yaml_file("/nonexistent/sst.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_validate_rejects_nan_weight() {
        let config = ProtocolConfig {
            mode: Mode::Basic,
            source_quality_weight: f64::NAN,
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidInputError::InvalidSourceWeight(_))
        ));
    }
}
