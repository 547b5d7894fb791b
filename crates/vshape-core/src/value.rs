//! # Dynamic Value Model
//!
//! [`Value`] is the closed representation of decoded, dynamically-typed
//! data that validators operate on. It is produced from `serde_json` and
//! `serde_yaml` values, or built directly through the `From` conversions.
//!
//! ## Optional Indirection
//!
//! [`Value::Optional`] models a pointer/optional wrapper around another
//! value. Validators unwrap exactly one level of it: `Optional(None)` is the
//! absent value, `Optional(Some(v))` stands for `v`. A doubly-wrapped value
//! is not a primitive and classifies as unknown.
//!
//! ## Mapping Keys
//!
//! Mappings are `BTreeMap<String, Value>`. YAML mappings with boolean or
//! numeric keys are converted with stringified keys; any other key shape is
//! rejected with [`DecodeError::UnsupportedKey`].

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::error::DecodeError;

/// A string-keyed mapping of dynamic values.
pub type Mapping = BTreeMap<String, Value>;

/// A numeric value of any width.
///
/// Integers that fit `i64` are stored as [`Number::Int`]; larger unsigned
/// integers as [`Number::UInt`]; everything else as [`Number::Float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point.
    Float(f64),
}

impl Number {
    /// Store an unsigned integer, as [`Number::Int`] when it fits `i64`.
    pub fn from_u64(n: u64) -> Self {
        i64::try_from(n).map_or(Self::UInt(n), Self::Int)
    }

    /// Lossy conversion to `f64`, used by range constraints.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(i) => i as f64,
            Self::UInt(u) => u as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns true if the number has no fractional part.
    pub fn is_integer(&self) -> bool {
        match *self {
            Self::Int(_) | Self::UInt(_) => true,
            Self::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! number_from {
    ($ctor:expr, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    $ctor(n as $target)
                }
            }

            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(Number::Int, i64: i8, i16, i32, i64, isize);
number_from!(Number::from_u64, u64: u8, u16, u32, u64, usize);
number_from!(Number::Float, f64: f32, f64);

/// A dynamically-typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The none/nil value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number of any width.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered sequence.
    Sequence(Vec<Value>),
    /// A string-keyed mapping.
    Mapping(Mapping),
    /// One level of optional/pointer indirection.
    Optional(Option<Box<Value>>),
    /// A runtime representation with no counterpart in this model,
    /// carried by its type name.
    Opaque(String),
}

impl Value {
    /// Wraps a value in one level of optional indirection.
    pub fn some(inner: impl Into<Value>) -> Self {
        Self::Optional(Some(Box::new(inner.into())))
    }

    /// The absent optional (a nil pointer).
    pub fn none() -> Self {
        Self::Optional(None)
    }

    /// Unwraps one level of optional indirection.
    ///
    /// Returns `None` for the absent value: `Null`, `Optional(None)`, and
    /// `Optional(Some(Null))`. Any other value is returned as-is, so a
    /// doubly-wrapped optional yields the inner `Optional`.
    pub fn unwrap_optional(&self) -> Option<&Value> {
        match self {
            Self::Null | Self::Optional(None) => None,
            Self::Optional(Some(inner)) => match &**inner {
                Self::Null => None,
                other => Some(other),
            },
            other => Some(other),
        }
    }

    /// Returns true if the value is absent after one level of unwrapping.
    pub fn is_absent(&self) -> bool {
        self.unwrap_optional().is_none()
    }

    /// Converts the value into a string-keyed mapping, if it is map-shaped.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self.unwrap_optional()? {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the string slice if the (unwrapped) value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self.unwrap_optional()? {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if the (unwrapped) value is numeric.
    pub fn as_number(&self) -> Option<Number> {
        match self.unwrap_optional()? {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if the (unwrapped) value is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self.unwrap_optional()? {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the value's runtime shape, used in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Optional(_) => "optional",
            Self::Opaque(name) => name,
        }
    }

    /// Parse a JSON document into a value.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Json` if the input is not valid JSON.
    pub fn from_json_str(input: &str) -> Result<Self, DecodeError> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from(json))
    }

    /// Parse a YAML document into a value.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Yaml` if the input is not valid YAML, and
    /// `DecodeError::UnsupportedKey` if a mapping key is not a scalar.
    pub fn from_yaml_str(input: &str) -> Result<Self, DecodeError> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(input)?;
        Self::try_from(yaml)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Self::Optional(opt.map(|v| Box::new(v.into())))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else if let Some(u) = n.as_u64() {
            Self::from_u64(u)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Number(Number::from(n)),
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::from(&json)
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = DecodeError;

    /// YAML tags are ignored and the tagged value converted in their place.
    fn try_from(yaml: serde_yaml::Value) -> Result<Self, Self::Error> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => Ok(Self::Number(yaml_number(&n))),
            serde_yaml::Value::String(s) => Ok(Self::String(s)),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<Value>, DecodeError> =
                    seq.into_iter().map(Self::try_from).collect();
                Ok(Self::Sequence(items?))
            }
            serde_yaml::Value::Mapping(map) => {
                let mut mapping = Mapping::new();
                for (k, v) in map {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => return Err(DecodeError::UnsupportedKey(format!("{other:?}"))),
                    };
                    mapping.insert(key, Self::try_from(v)?);
                }
                Ok(Self::Mapping(mapping))
            }
            serde_yaml::Value::Tagged(tagged) => Self::try_from(tagged.value),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Int(i)
    } else if let Some(u) = n.as_u64() {
        Number::from_u64(u)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Self::Number(Number::UInt(u)) => serializer.serialize_u64(*u),
            Self::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Optional(None) => serializer.serialize_none(),
            Self::Optional(Some(inner)) => serializer.serialize_some(&**inner),
            Self::Opaque(name) => serializer.serialize_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let value = Value::from(json!({
            "age": 30,
            "name": "Bob",
            "score": 9.5,
            "tags": ["a", "b"],
            "active": true,
            "spouse": null
        }));
        let map = value.as_mapping().expect("object should convert to a mapping");
        assert_eq!(map["age"], Value::Number(Number::Int(30)));
        assert_eq!(map["name"], Value::from("Bob"));
        assert_eq!(map["score"], Value::Number(Number::Float(9.5)));
        assert_eq!(map["tags"], Value::from(vec!["a", "b"]));
        assert_eq!(map["active"], Value::Bool(true));
        assert_eq!(map["spouse"], Value::Null);
    }

    #[test]
    fn test_large_unsigned_json_number() {
        let value = Value::from(json!(u64::MAX));
        assert_eq!(value, Value::Number(Number::UInt(u64::MAX)));
        assert_eq!(Value::from(u64::MAX), value);
    }

    #[test]
    fn test_unsigned_widths_match_decoded_numbers() {
        assert_eq!(Value::from(5u64), Value::from(json!(5)));
        assert_eq!(Value::from(5u8), Value::from(5i32));
        assert_eq!(Value::from(7usize), Value::from_yaml_str("7").unwrap());
        assert_eq!(Number::from(5u64), Number::Int(5));
        assert_eq!(Number::from_u64(i64::MAX as u64), Number::Int(i64::MAX));
        assert_eq!(Number::from_u64(i64::MAX as u64 + 1), Number::UInt(i64::MAX as u64 + 1));
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let err = Value::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)), "got: {err}");
    }

    #[test]
    fn test_yaml_conversion() {
        let yaml_str = r#"
module_id: org.test
version: "1.0.0"
count: 42
enabled: true
items:
  - one
  - two
1: numeric-key
"#;
        let value = Value::from_yaml_str(yaml_str).unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map["module_id"], Value::from("org.test"));
        assert_eq!(map["version"], Value::from("1.0.0"));
        assert_eq!(map["count"], Value::from(42i64));
        assert_eq!(map["enabled"], Value::Bool(true));
        assert_eq!(map["items"], Value::from(vec!["one", "two"]));
        assert_eq!(map["1"], Value::from("numeric-key"));
    }

    #[test]
    fn test_yaml_tag_ignored() {
        let value = Value::from_yaml_str("when: !date 2024-01-01").unwrap();
        assert_eq!(value.as_mapping().unwrap()["when"], Value::from("2024-01-01"));
    }

    #[test]
    fn test_yaml_sequence_key_rejected() {
        let err = Value::from_yaml_str("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedKey(_)), "got: {err}");
    }

    #[test]
    fn test_unwrap_one_level() {
        assert!(Value::Null.is_absent());
        assert!(Value::none().is_absent());
        assert!(Value::some(Value::Null).is_absent());
        assert_eq!(Value::some(5).unwrap_optional(), Some(&Value::from(5)));

        let nested = Value::some(Value::some(5));
        assert_eq!(nested.unwrap_optional(), Some(&Value::some(5)));
    }

    #[test]
    fn test_as_mapping_through_optional() {
        let mut m = Mapping::new();
        m.insert("x".to_string(), Value::from(1));
        assert!(Value::some(Value::Mapping(m)).as_mapping().is_some());
        assert!(Value::from(42).as_mapping().is_none());
        assert!(Value::none().as_mapping().is_none());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::none());
        assert_eq!(Value::from(Some("x")), Value::some("x"));
    }

    #[test]
    fn test_number_helpers() {
        assert!(Number::from(3u8).is_integer());
        assert!(Number::from(3.0f64).is_integer());
        assert!(!Number::from(3.5f32).is_integer());
        assert!(!Number::Float(f64::INFINITY).is_integer());
        assert_eq!(Number::from(-2i16).as_f64(), -2.0);
        assert_eq!(Number::UInt(7).to_string(), "7");
    }

    #[test]
    fn test_serialize_to_json() {
        let value = Value::from(json!({"a": [1, "two", null], "b": {"c": false}}));
        let back = serde_json::to_value(&value).unwrap();
        assert_eq!(back, json!({"a": [1, "two", null], "b": {"c": false}}));
        assert_eq!(serde_json::to_value(Value::none()).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Value::some(3)).unwrap(), json!(3));
    }
}
