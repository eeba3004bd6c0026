//! Raw argument values and typed component parameters.
//!
//! Arguments arrive as an untyped bag (`Args`) from configuration files or the
//! command line. Components only ever see `Parameters`, which hold values that
//! already match their declared `ParamKind`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Untyped arguments keyed by parameter name.
pub type Args = BTreeMap<String, RawValue>;

/// A loosely-typed argument value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Explicit null
    Null,
    /// Boolean literal: true
    Bool(bool),
    /// Integer literal: 4
    Integer(i64),
    /// Float literal: 0.5
    Float(f64),
    /// String literal: "false"
    String(String),
}

impl RawValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Integer(n) => write!(f, "{n}"),
            RawValue::Float(x) => write!(f, "{x}"),
            RawValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

/// The declared type of a component parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    /// One of a fixed set of variant names
    Enum(&'static [&'static str]),
    /// Child markup, only ever supplied by a parent component
    Fragment,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => f.write_str("string"),
            ParamKind::Integer => f.write_str("integer"),
            ParamKind::Float => f.write_str("float"),
            ParamKind::Boolean => f.write_str("boolean"),
            ParamKind::Enum(variants) => write!(f, "enum({})", variants.join("|")),
            ParamKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parameter value that matches its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Enum(&'static str),
    Fragment(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&'static str> {
        match self {
            ParamValue::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&str> {
        match self {
            ParamValue::Fragment(markup) => Some(markup),
            _ => None,
        }
    }
}

/// Typed parameters handed to a component factory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, ParamValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_args_from_json() {
        let args: Args =
            serde_json::from_str(r#"{"LazyLoad": "false", "Columns": 3, "Ratio": 0.5, "Wide": true}"#)
                .unwrap();

        assert_eq!(args["LazyLoad"], RawValue::String("false".to_string()));
        assert_eq!(args["Columns"], RawValue::Integer(3));
        assert_eq!(args["Ratio"], RawValue::Float(0.5));
        assert_eq!(args["Wide"], RawValue::Bool(true));
    }

    #[test]
    fn displays_enum_kind_with_variants() {
        let kind = ParamKind::Enum(&["Square", "Portrait"]);
        assert_eq!(kind.to_string(), "enum(Square|Portrait)");
    }

    #[test]
    fn parameters_accessors_are_kind_checked() {
        let params = Parameters::new()
            .with("LazyLoad", ParamValue::Boolean(false))
            .with("Title", ParamValue::String("Home".to_string()));

        assert_eq!(params.get("LazyLoad").and_then(ParamValue::as_bool), Some(false));
        assert_eq!(params.get("Title").and_then(ParamValue::as_bool), None);
        assert_eq!(params.len(), 2);
    }
}
