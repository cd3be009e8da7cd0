//! Generator options and configuration
//!
//! Options can be given in code, as a JSON object, or loaded from:
//! - Default values
//! - Config file (schema-stack.toml)
//! - Environment variables (SCHEMA_STACK__*)
//!
//! ## Example config file (schema-stack.toml):
//! ```toml
//! [generator]
//! require_all = true
//! infer_string_format = true
//! convert_ints = true
//! additional_properties = false
//!
//! [output]
//! format = "compact"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StackError};

/// Options controlling schema generation
///
/// Unknown option names are rejected. Options that are absent (or `null` in a
/// JSON options object) take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// List every property of an object in `required`
    #[serde(alias = "requireAll")]
    pub require_all: bool,

    /// Add `format` to string schemas that look like dates, emails, etc.
    #[serde(alias = "inferStringFormat")]
    pub infer_string_format: bool,

    /// Describe integral numbers as `integer` instead of `number`
    #[serde(alias = "convertInts")]
    pub convert_ints: bool,

    /// `additionalProperties` for object schemas; omitted when `true`
    #[serde(alias = "additionalProperties")]
    pub additional_properties: Value,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            require_all: false,
            infer_string_format: false,
            convert_ints: true,
            additional_properties: Value::Bool(true),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from a JSON object, defaulting absent and `null` entries
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(StackError::Options(format!(
                "options must be an object, got {}",
                value
            )));
        };
        let present: serde_json::Map<String, Value> = map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let options: Self = serde_json::from_value(Value::Object(present))
            .map_err(|e| StackError::Options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// `additional_properties` must be a schema: a boolean or an object
    pub fn validate(&self) -> Result<()> {
        match &self.additional_properties {
            Value::Bool(_) | Value::Object(_) => Ok(()),
            other => Err(StackError::Options(format!(
                "additional_properties must be a boolean or a schema object, got {}",
                other
            ))),
        }
    }
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Render a JSON value in the configured format
    pub fn render(&self, value: &Value) -> Result<String> {
        let text = match self.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Compact => serde_json::to_string(value)?,
        };
        Ok(text)
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generator options
    #[serde(default)]
    pub generator: GeneratorOptions,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-stack.toml",
            ".schema-stack.toml",
            "config/schema-stack.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "schema-stack", "schema-stack") {
            let xdg_config = config_dir.config_dir().join("schema-stack.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_STACK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.generator.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert!(!options.require_all);
        assert!(!options.infer_string_format);
        assert!(options.convert_ints);
        assert_eq!(options.additional_properties, json!(true));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = GeneratorOptions::from_json(&json!({ "somethingNotValid": true })).unwrap_err();
        assert!(matches!(err, StackError::Options(_)));
    }

    #[test]
    fn test_null_options_take_default() {
        let options =
            GeneratorOptions::from_json(&json!({ "convertInts": null, "require_all": true }))
                .unwrap();
        assert!(options.convert_ints);
        assert!(options.require_all);
    }

    #[test]
    fn test_invalid_additional_properties() {
        let err = GeneratorOptions::from_json(&json!({ "additionalProperties": 3 })).unwrap_err();
        assert!(matches!(err, StackError::Options(_)));
        assert!(GeneratorOptions::from_json(&json!({ "additionalProperties": { "type": "string" } })).is_ok());
    }

    #[test]
    fn test_serialize_config() {
        let config = GeneratorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[generator]"));
        assert!(toml_str.contains("[output]"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let path = path.to_str().unwrap();

        let config = GeneratorConfig {
            generator: GeneratorOptions {
                require_all: true,
                additional_properties: json!(false),
                ..GeneratorOptions::default()
            },
            output: OutputConfig {
                format: OutputFormat::Compact,
            },
        };
        config.save(path).unwrap();

        let loaded = GeneratorConfig::load_from(Some(path)).unwrap();
        assert!(loaded.generator.require_all);
        assert_eq!(loaded.generator.additional_properties, json!(false));
        assert_eq!(loaded.output.format, OutputFormat::Compact);
    }

    #[test]
    fn test_render() {
        let output = OutputConfig {
            format: OutputFormat::Compact,
        };
        assert_eq!(output.render(&json!({ "a": 1 })).unwrap(), r#"{"a":1}"#);
    }
}
