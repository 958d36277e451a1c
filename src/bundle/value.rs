//! Loosely-typed values carried by bundle options and resources
//!
//! Option values and resource revisions arrive from the document untyped.
//! They are kept as [`OptionValue`] until something needs a concrete type;
//! the only coercion rule lives in [`ResourceRevision::from_value`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar document value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl OptionValue {
    /// Name of the value's type as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "bool",
            OptionValue::Integer(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::String(_) => "string",
        }
    }

    /// Integer view of the value: integers, and floats with no fractional part
    pub fn as_integral(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            #[allow(clippy::float_cmp)]
            OptionValue::Float(f) if f.is_finite() && f.trunc() == *f => Some(*f as i64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Null => f.write_str("null"),
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Integer(n) => write!(f, "{n}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// A resource reference: a store revision or a local file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRevision {
    Revision(i64),
    Path(String),
}

impl ResourceRevision {
    /// Normalize a raw resource value.
    ///
    /// Integers are revisions. Floats with no fractional part are coerced to
    /// revisions, since JSON and some YAML emitters do not keep the int/float
    /// distinction. Strings are paths. Everything else is rejected and the
    /// offending type name returned.
    pub fn from_value(value: &OptionValue) -> std::result::Result<Self, &'static str> {
        match value {
            OptionValue::String(path) => Ok(ResourceRevision::Path(path.clone())),
            OptionValue::Integer(_) | OptionValue::Float(_) => value
                .as_integral()
                .map(ResourceRevision::Revision)
                .ok_or(value.type_name()),
            other => Err(other.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_scalars_keep_their_type() {
        let values: Vec<OptionValue> =
            serde_yaml::from_str("[~, true, 3, 3.0, 2.5, hello, '7']").unwrap();
        assert_eq!(
            values,
            vec![
                OptionValue::Null,
                OptionValue::Bool(true),
                OptionValue::Integer(3),
                OptionValue::Float(3.0),
                OptionValue::Float(2.5),
                OptionValue::String("hello".to_string()),
                OptionValue::String("7".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let result: std::result::Result<OptionValue, _> = serde_yaml::from_str("[1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_as_integral() {
        assert_eq!(OptionValue::Integer(4).as_integral(), Some(4));
        assert_eq!(OptionValue::Float(4.0).as_integral(), Some(4));
        assert_eq!(OptionValue::Float(4.5).as_integral(), None);
        assert_eq!(OptionValue::from("4").as_integral(), None);
    }

    #[test]
    fn test_resource_revision_normalization() {
        assert_eq!(
            ResourceRevision::from_value(&OptionValue::Integer(12)),
            Ok(ResourceRevision::Revision(12))
        );
        assert_eq!(
            ResourceRevision::from_value(&OptionValue::Float(12.0)),
            Ok(ResourceRevision::Revision(12))
        );
        assert_eq!(
            ResourceRevision::from_value(&OptionValue::from("./res.tgz")),
            Ok(ResourceRevision::Path("./res.tgz".to_string()))
        );
        assert_eq!(
            ResourceRevision::from_value(&OptionValue::Float(1.5)),
            Err("float")
        );
        assert_eq!(
            ResourceRevision::from_value(&OptionValue::Bool(true)),
            Err("bool")
        );
        assert_eq!(ResourceRevision::from_value(&OptionValue::Null), Err("null"));
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionValue::from("x").to_string(), "\"x\"");
        assert_eq!(OptionValue::Integer(1).to_string(), "1");
        assert_eq!(OptionValue::Null.to_string(), "null");
    }
}
