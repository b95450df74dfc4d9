//! Effective configuration with provenance
//!
//! Captures the merged configuration plus where each layer came from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use super::settings::{EditorSettings, INDEX_TOKEN};

/// Largest accepted pretty-print indent
const MAX_INDENT: u64 = 8;

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing config layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build effective config from builtin defaults, an optional TOML file
    /// and optional CLI overrides.
    pub fn build(file_path: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = file_path {
            if path.exists() {
                let (value, digest) = Self::load_toml_file(path)?;
                tracing::debug!(path = %path.display(), %digest, "loaded config file");
                layers.push(value);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::File,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            } else {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        Self::validate_config(&merged)?;

        Ok(Self {
            config: merged,
            sources,
        })
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(toml_value), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    fn validate_config(config: &Value) -> Result<(), ConfigError> {
        for key in ["placeholders.field", "placeholders.constant", "reset.field_name"] {
            match get_path(config, key).and_then(Value::as_str) {
                Some(s) if !s.is_empty() => {}
                _ => {
                    return Err(ConfigError::ValidationError(format!(
                        "{} must be a non-empty string",
                        key
                    )))
                }
            }
        }

        let min = get_path(config, "validators.length_min").and_then(Value::as_u64);
        let max = get_path(config, "validators.length_max").and_then(Value::as_u64);
        match (min, max) {
            (Some(min), Some(max)) if min <= max && max <= u64::from(u32::MAX) => {}
            _ => {
                return Err(ConfigError::ValidationError(
                    "validators.length_min and validators.length_max must be integers with length_min <= length_max"
                        .to_string(),
                ))
            }
        }

        match get_path(config, "validators.on_match").and_then(Value::as_str) {
            Some("pass") | Some("fail") => {}
            _ => {
                return Err(ConfigError::ValidationError(
                    "validators.on_match must be \"pass\" or \"fail\"".to_string(),
                ))
            }
        }

        match get_path(config, "output.indent").and_then(Value::as_u64) {
            Some(indent) if (1..=MAX_INDENT).contains(&indent) => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "output.indent must be in [1, {}]",
                    MAX_INDENT
                )))
            }
        }

        if let Some(field) = get_path(config, "placeholders.field").and_then(Value::as_str) {
            if !field.contains(INDEX_TOKEN) {
                tracing::warn!(
                    placeholder = field,
                    "field placeholder has no {} token; added fields will share a name",
                    INDEX_TOKEN
                );
            }
        }

        Ok(())
    }

    /// Resolve into typed settings
    pub fn settings(&self) -> Result<EditorSettings, ConfigError> {
        serde_json::from_value(self.config.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.config, path)
    }

    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(Value::as_u64)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }
}

fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, part| current.get(part))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifest_schema::OnMatch;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_with_defaults_only() {
        let config = EffectiveConfig::build(None, None).unwrap();

        assert_eq!(config.get_u64("output.indent"), Some(2));
        assert_eq!(config.get_str("reset.field_name"), Some("test"));
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].origin, ConfigOrigin::Builtin);
        assert_eq!(config.settings().unwrap(), EditorSettings::default());
    }

    #[test]
    fn test_build_with_cli_override() {
        let cli = serde_json::json!({"validators": {"on_match": "fail"}});
        let config = EffectiveConfig::build(None, Some(cli)).unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.validators.on_match, OnMatch::Fail);
        assert_eq!(settings.validators.length_max, 100);
        assert_eq!(config.sources.last().unwrap().origin, ConfigOrigin::Cli);
    }

    #[test]
    fn test_validation_length_bounds() {
        let cli = serde_json::json!({"validators": {"length_min": 10, "length_max": 5}});
        let err = EffectiveConfig::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("length_min"));
    }

    #[test]
    fn test_validation_indent() {
        let cli = serde_json::json!({"output": {"indent": 0}});
        let err = EffectiveConfig::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("output.indent"));
    }

    #[test]
    fn test_validation_on_match() {
        let cli = serde_json::json!({"validators": {"on_match": "maybe"}});
        assert!(EffectiveConfig::build(None, Some(cli)).is_err());
    }

    #[test]
    fn test_validation_empty_placeholder() {
        let cli = serde_json::json!({"placeholders": {"constant": ""}});
        let err = EffectiveConfig::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("placeholders.constant"));
    }

    #[test]
    fn test_load_toml_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[output]").unwrap();
        writeln!(temp, "indent = 4").unwrap();
        writeln!(temp, "[reset]").unwrap();
        writeln!(temp, "field_name = \"blank\"").unwrap();

        let config = EffectiveConfig::build(Some(temp.path()), None).unwrap();

        assert_eq!(config.get_u64("output.indent"), Some(4));
        assert_eq!(config.get_str("reset.field_name"), Some("blank"));
        assert_eq!(config.sources[1].origin, ConfigOrigin::File);
        assert_eq!(config.sources[1].digest.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let config =
            EffectiveConfig::build(Some(Path::new("/nonexistent/manifest-sync.toml")), None).unwrap();
        assert_eq!(config.sources.len(), 1);
    }

    #[test]
    fn test_bad_toml() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[output").unwrap();
        let err = EffectiveConfig::build(Some(temp.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
