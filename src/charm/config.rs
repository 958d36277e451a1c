//! Charm configuration schema (`config.yaml`)
//!
//! Only the flat type check is implemented: settings are matched against the
//! declared option types, with no range or pattern constraints.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bundle::OptionValue;
use crate::error::{CharmError, Result};

/// Declared type of a charm config option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Int,
    Float,
    Boolean,
    Secret,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionType::String => "string",
            OptionType::Int => "int",
            OptionType::Float => "float",
            OptionType::Boolean => "boolean",
            OptionType::Secret => "secret",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    #[serde(rename = "type")]
    pub option_type: OptionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ConfigOption {
    pub fn new(option_type: OptionType) -> Self {
        Self {
            option_type,
            default: None,
            description: String::new(),
        }
    }

    /// Check a value against the declared type. Null means "unset" and is
    /// always accepted.
    pub fn check(&self, name: &str, value: &OptionValue) -> std::result::Result<(), String> {
        let ok = match (self.option_type, value) {
            (_, OptionValue::Null)
            | (OptionType::String | OptionType::Secret, OptionValue::String(_))
            | (OptionType::Float, OptionValue::Integer(_) | OptionValue::Float(_))
            | (OptionType::Boolean, OptionValue::Bool(_)) => true,
            (OptionType::Int, v) => v.as_integral().is_some(),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(format!(
                "option {name:?} expected {}, got {value}",
                self.option_type
            ))
        }
    }
}

/// The options a charm accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub options: BTreeMap<String, ConfigOption>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `config.yaml` document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let schema: Option<Self> =
            serde_yaml::from_str(yaml).map_err(|e| CharmError::CharmConfigInvalid {
                message: e.to_string(),
            })?;
        let schema = schema.unwrap_or_default();
        for (name, option) in &schema.options {
            if let Some(default) = &option.default {
                option
                    .check(name, default)
                    .map_err(|message| CharmError::CharmConfigInvalid {
                        message: format!("invalid default: {message}"),
                    })?;
            }
        }
        Ok(schema)
    }

    pub fn with_option(mut self, name: impl Into<String>, option: ConfigOption) -> Self {
        self.options.insert(name.into(), option);
        self
    }

    /// Check bundle settings against the schema, reporting the first problem
    pub fn validate_settings(
        &self,
        settings: &BTreeMap<String, OptionValue>,
    ) -> std::result::Result<(), String> {
        for (name, value) in settings {
            let option = self
                .options
                .get(name)
                .ok_or_else(|| format!("unknown option {name:?}"))?;
            option.check(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ConfigSchema {
        ConfigSchema::from_yaml(
            r"
options:
  title:
    type: string
    default: My Blog
  port:
    type: int
    default: 80
  ratio:
    type: float
  debug:
    type: boolean
    description: Enable debug logging
  password:
    type: secret
",
        )
        .unwrap()
    }

    fn settings(pairs: &[(&str, OptionValue)]) -> BTreeMap<String, OptionValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_schema() {
        let schema = schema();
        assert_eq!(schema.options.len(), 5);
        assert_eq!(schema.options["port"].option_type, OptionType::Int);
        assert_eq!(schema.options["port"].default, Some(OptionValue::Integer(80)));
        assert_eq!(schema.options["debug"].description, "Enable debug logging");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(ConfigSchema::from_yaml("").unwrap(), ConfigSchema::default());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(ConfigSchema::from_yaml("options:\n  x:\n    type: list\n").is_err());
    }

    #[test]
    fn test_bad_default_is_rejected() {
        let err = ConfigSchema::from_yaml("options:\n  x:\n    type: int\n    default: abc\n")
            .unwrap_err();
        assert!(err.to_string().contains("invalid default"));
    }

    #[test]
    fn test_valid_settings() {
        let s = settings(&[
            ("title", OptionValue::from("hello")),
            ("port", OptionValue::Integer(8080)),
            ("ratio", OptionValue::Integer(1)),
            ("debug", OptionValue::Bool(true)),
            ("password", OptionValue::from("hunter2")),
        ]);
        assert!(schema().validate_settings(&s).is_ok());
    }

    #[test]
    fn test_integral_float_is_an_int() {
        let s = settings(&[("port", OptionValue::Float(8080.0))]);
        assert!(schema().validate_settings(&s).is_ok());
        let s = settings(&[("port", OptionValue::Float(80.5))]);
        assert!(schema().validate_settings(&s).is_err());
    }

    #[test]
    fn test_null_unsets() {
        let s = settings(&[("port", OptionValue::Null)]);
        assert!(schema().validate_settings(&s).is_ok());
    }

    #[test]
    fn test_unknown_option() {
        let s = settings(&[("nope", OptionValue::Integer(1))]);
        assert_eq!(
            schema().validate_settings(&s).unwrap_err(),
            "unknown option \"nope\""
        );
    }

    #[test]
    fn test_wrong_type() {
        let s = settings(&[("debug", OptionValue::from("yes"))]);
        assert_eq!(
            schema().validate_settings(&s).unwrap_err(),
            "option \"debug\" expected boolean, got \"yes\""
        );
    }
}
