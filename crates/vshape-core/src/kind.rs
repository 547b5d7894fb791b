//! # Kind Classification
//!
//! Maps a [`Value`] onto the closed set of primitive kinds leaf validators
//! check against. Classification unwraps one level of optional indirection
//! and reports absence separately from a real kind.

use std::fmt;

use crate::value::Value;

/// A primitive kind a leaf validator can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Any integer or floating-point width.
    Number,
    /// A string.
    String,
    /// A boolean.
    Bool,
}

/// Outcome of classifying a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The value is none/nil, or an optional wrapping nothing.
    Absent,
    /// The value (after unwrapping) is of this kind.
    Kind(Kind),
    /// The value is present but not a primitive: a mapping, a sequence,
    /// an opaque runtime value, or a doubly-wrapped optional.
    Unknown,
}

impl Kind {
    /// Display name used in type mismatch errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }

    /// Kind of a value without any unwrapping.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) => Some(Self::Number),
            Value::String(_) => Some(Self::String),
            Value::Bool(_) => Some(Self::Bool),
            _ => None,
        }
    }

    /// Classify a value after unwrapping one level of optional indirection.
    pub fn classify(value: &Value) -> Classification {
        match value.unwrap_optional() {
            None => Classification::Absent,
            Some(present) => Self::of(present).map_or(Classification::Unknown, Classification::Kind),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Mapping;

    #[test]
    fn test_names() {
        assert_eq!(Kind::Number.name(), "number");
        assert_eq!(Kind::String.name(), "string");
        assert_eq!(Kind::Bool.to_string(), "bool");
    }

    #[test]
    fn test_every_numeric_width_is_number() {
        let values = [
            Value::from(1i8),
            Value::from(1i16),
            Value::from(1i32),
            Value::from(1i64),
            Value::from(1isize),
            Value::from(1u8),
            Value::from(1u16),
            Value::from(1u32),
            Value::from(1u64),
            Value::from(1usize),
            Value::from(1.5f32),
            Value::from(1.5f64),
        ];
        for v in &values {
            assert_eq!(Kind::classify(v), Classification::Kind(Kind::Number), "{v:?}");
        }
    }

    #[test]
    fn test_absent() {
        assert_eq!(Kind::classify(&Value::Null), Classification::Absent);
        assert_eq!(Kind::classify(&Value::none()), Classification::Absent);
    }

    #[test]
    fn test_single_unwrap() {
        assert_eq!(Kind::classify(&Value::some("x")), Classification::Kind(Kind::String));
        assert_eq!(Kind::classify(&Value::some(true)), Classification::Kind(Kind::Bool));
        assert_eq!(
            Kind::classify(&Value::some(Value::some(1))),
            Classification::Unknown
        );
    }

    #[test]
    fn test_composites_are_unknown() {
        assert_eq!(Kind::classify(&Value::Mapping(Mapping::new())), Classification::Unknown);
        assert_eq!(Kind::classify(&Value::Sequence(vec![])), Classification::Unknown);
        assert_eq!(
            Kind::classify(&Value::Opaque("chan".to_string())),
            Classification::Unknown
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<u64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
            "[a-z]{1,8}".prop_map(Value::Opaque),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
                prop::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..6)
                    .prop_map(Value::Mapping),
                proptest::option::of(inner).prop_map(|o| Value::Optional(o.map(Box::new))),
            ]
        })
    }

    proptest! {
        /// Classification is total and agrees with unwrapping.
        #[test]
        fn classify_agrees_with_unwrap(value in any_value()) {
            let class = Kind::classify(&value);
            match value.unwrap_optional() {
                None => prop_assert_eq!(class, Classification::Absent),
                Some(present) => match Kind::of(present) {
                    Some(kind) => prop_assert_eq!(class, Classification::Kind(kind)),
                    None => prop_assert_eq!(class, Classification::Unknown),
                },
            }
        }

        /// Wrapping a present primitive once never changes its kind.
        #[test]
        fn optional_wrap_preserves_kind(n in any::<i32>(), s in "[a-z]{0,10}", b in any::<bool>()) {
            prop_assert_eq!(Kind::classify(&Value::some(n)), Classification::Kind(Kind::Number));
            prop_assert_eq!(Kind::classify(&Value::some(s)), Classification::Kind(Kind::String));
            prop_assert_eq!(Kind::classify(&Value::some(b)), Classification::Kind(Kind::Bool));
        }
    }
}
