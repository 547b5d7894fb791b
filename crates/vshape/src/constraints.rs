//! Ready-made constraints.
//!
//! Value constraints take the unwrapped value a leaf validator has already
//! kind-checked. String constraints count characters, not bytes. Object
//! constraints are named after themselves so a [`vshape_core::SelfError`]
//! says which one failed.

use regex::Regex;
use vshape_core::{ConstraintError, Mapping, Value};

use crate::leaf::ValueConstraint;
use crate::object::ObjectConstraint;

fn expect_str(value: &Value) -> Result<&str, ConstraintError> {
    value
        .as_str()
        .ok_or_else(|| ConstraintError::new(format!("expected a string, got {}", value.type_name())))
}

/// The value as an `f64` that bound checks can order. NaN is rejected.
fn expect_f64(value: &Value) -> Result<f64, ConstraintError> {
    let n = value
        .as_number()
        .map(|n| n.as_f64())
        .ok_or_else(|| ConstraintError::new(format!("expected a number, got {}", value.type_name())))?;
    if n.is_nan() {
        return Err(ConstraintError::new("must be a comparable number (got NaN)"));
    }
    Ok(n)
}

/// String has at least `min` characters.
pub fn min_len(min: usize) -> ValueConstraint {
    ValueConstraint::named("min_len", move |value| {
        let count = expect_str(value)?.chars().count();
        if count < min {
            return Err(ConstraintError::new(format!(
                "must be at least {min} characters (got {count})"
            )));
        }
        Ok(())
    })
}

/// String has at most `max` characters.
pub fn max_len(max: usize) -> ValueConstraint {
    ValueConstraint::named("max_len", move |value| {
        let count = expect_str(value)?.chars().count();
        if count > max {
            return Err(ConstraintError::new(format!(
                "must be at most {max} characters (got {count})"
            )));
        }
        Ok(())
    })
}

/// String is not empty.
pub fn non_empty() -> ValueConstraint {
    ValueConstraint::named("non_empty", |value| {
        if expect_str(value)?.is_empty() {
            return Err(ConstraintError::new("must not be empty"));
        }
        Ok(())
    })
}

/// String matches a regular expression.
///
/// # Errors
///
/// Returns the regex compile error if `pattern` is invalid.
pub fn pattern(pattern: &str) -> Result<ValueConstraint, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(ValueConstraint::named("pattern", move |value| {
        if re.is_match(expect_str(value)?) {
            Ok(())
        } else {
            Err(ConstraintError::new(format!(
                "does not match pattern {}",
                re.as_str()
            )))
        }
    }))
}

/// String is one of the allowed values.
pub fn one_of<I, S>(allowed: I) -> ValueConstraint
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    ValueConstraint::named("one_of", move |value| {
        let s = expect_str(value)?;
        if allowed.iter().any(|a| a == s) {
            Ok(())
        } else {
            Err(ConstraintError::new(format!(
                "must be one of [{}] (got {s:?})",
                allowed.join(", ")
            )))
        }
    })
}

/// Number is at least `min`.
pub fn min(min: f64) -> ValueConstraint {
    ValueConstraint::named("min", move |value| {
        let n = expect_f64(value)?;
        if n < min {
            return Err(ConstraintError::new(format!("must be >= {min} (got {n})")));
        }
        Ok(())
    })
}

/// Number is at most `max`.
pub fn max(max: f64) -> ValueConstraint {
    ValueConstraint::named("max", move |value| {
        let n = expect_f64(value)?;
        if n > max {
            return Err(ConstraintError::new(format!("must be <= {max} (got {n})")));
        }
        Ok(())
    })
}

/// Number lies in `[lo, hi]`.
pub fn range(lo: f64, hi: f64) -> ValueConstraint {
    ValueConstraint::named("range", move |value| {
        let n = expect_f64(value)?;
        if n < lo || n > hi {
            return Err(ConstraintError::new(format!(
                "must be between {lo} and {hi} (got {n})"
            )));
        }
        Ok(())
    })
}

/// Number has no fractional part.
pub fn integer() -> ValueConstraint {
    ValueConstraint::named("integer", |value| match value.as_number() {
        Some(n) if n.is_integer() => Ok(()),
        Some(n) => Err(ConstraintError::new(format!("must be an integer (got {n})"))),
        None => Err(ConstraintError::new(format!(
            "expected a number, got {}",
            value.type_name()
        ))),
    })
}

fn present(mapping: &Mapping, field: &str) -> bool {
    mapping.get(field).is_some_and(|v| !v.is_absent())
}

/// Every listed field is present and not null.
pub fn required<I, S>(fields: I) -> ObjectConstraint
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    ObjectConstraint::named("required", move |mapping| {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|f| !present(mapping, f))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConstraintError::new(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    })
}

/// At most one of `a` and `b` is present.
pub fn mutually_exclusive(a: impl Into<String>, b: impl Into<String>) -> ObjectConstraint {
    let (a, b) = (a.into(), b.into());
    ObjectConstraint::named("mutually_exclusive", move |mapping| {
        if present(mapping, &a) && present(mapping, &b) {
            return Err(ConstraintError::new(format!(
                "{a} and {b} cannot both be set"
            )));
        }
        Ok(())
    })
}

/// If `field` is present, `dependency` must be present too.
pub fn depends_on(field: impl Into<String>, dependency: impl Into<String>) -> ObjectConstraint {
    let (field, dependency) = (field.into(), dependency.into());
    ObjectConstraint::named("depends_on", move |mapping| {
        if present(mapping, &field) && !present(mapping, &dependency) {
            return Err(ConstraintError::new(format!(
                "{field} requires {dependency}"
            )));
        }
        Ok(())
    })
}
