//! # Error Types — Structured Validation Errors
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations, except the two collection types whose rendering joins
//! their members line by line.
//!
//! ## Design
//!
//! - A leaf failure is either a [`ValidationError::TypeMismatch`] or the
//!   unchanged [`ConstraintError`] of the caller's constraint.
//! - An object failure is exactly one of: a type mismatch for `"object"`,
//!   an [`AggregateError`] holding one [`FieldError`] per failing field, or a
//!   [`SelfError`] holding one [`SelfFailure`] per failing whole-object check.
//! - [`ValidationError::violations`] flattens the nested tree into
//!   path-addressed [`Violation`]s for reporting.

use std::fmt;

use thiserror::Error;

/// Error returned by a validator.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The value's kind does not match what the validator expects.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// Display name of the expected type.
        expected: String,
    },

    /// A caller-supplied value constraint rejected the value.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// One or more schema fields failed.
    #[error(transparent)]
    Fields(#[from] AggregateError),

    /// One or more whole-object constraints failed.
    #[error(transparent)]
    SelfCheck(#[from] SelfError),

    /// Validators nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}

impl ValidationError {
    /// Construct a type mismatch naming the expected type.
    pub fn type_mismatch(expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
        }
    }

    /// Returns the per-field aggregate, if this is a field-level failure.
    pub fn as_fields(&self) -> Option<&AggregateError> {
        match self {
            Self::Fields(agg) => Some(agg),
            _ => None,
        }
    }

    /// Flatten the error tree into path-addressed violations.
    ///
    /// Paths are JSON Pointers built from the field names along the way;
    /// the root is the empty path. Whole-object failures are reported at
    /// the path of the object they were checked against, one per failure.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.collect_violations(String::new(), &mut out);
        out
    }

    fn collect_violations(&self, path: String, out: &mut Vec<Violation>) {
        match self {
            Self::Fields(agg) => {
                for field in agg.errors() {
                    let child = format!("{path}/{}", escape_pointer(&field.name));
                    field.cause.collect_violations(child, out);
                }
            }
            Self::SelfCheck(self_err) => {
                for failure in self_err.failures() {
                    out.push(Violation {
                        path: path.clone(),
                        message: failure.to_string(),
                    });
                }
            }
            other => out.push(Violation {
                path,
                message: other.to_string(),
            }),
        }
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Error produced by a caller-supplied constraint.
#[derive(Error, Debug)]
pub enum ConstraintError {
    /// A plain message.
    #[error("{0}")]
    Message(String),

    /// An underlying error from the constraint's own machinery.
    #[error(transparent)]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

impl ConstraintError {
    /// Construct a message-only constraint error.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap an arbitrary error.
    pub fn from_source(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(source))
    }
}

/// A failure attached to one schema field.
#[derive(Error, Debug)]
#[error("{name} : {cause}")]
pub struct FieldError {
    /// The field name in the schema.
    pub name: String,
    /// Why the field failed.
    #[source]
    pub cause: Box<ValidationError>,
}

impl FieldError {
    /// Attach an error to a field name.
    pub fn new(name: impl Into<String>, cause: ValidationError) -> Self {
        Self {
            name: name.into(),
            cause: Box::new(cause),
        }
    }
}

/// All field failures of one object, in schema order.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<FieldError>,
}

impl AggregateError {
    /// Creates an aggregate from collected field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Look up the error for a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.name == name)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}

/// A failing whole-object constraint.
#[derive(Debug)]
pub struct SelfFailure {
    /// Position of the constraint in the list it was declared in.
    pub index: usize,
    /// The constraint's name, if it was given one.
    pub name: Option<String>,
    /// The constraint's error.
    pub cause: ConstraintError,
}

impl SelfFailure {
    /// The name, or `#<index>` for unnamed constraints.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.index),
        }
    }
}

impl fmt::Display for SelfFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.label(), self.cause)
    }
}

impl std::error::Error for SelfFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// All whole-object constraint failures of one object, in declaration order.
#[derive(Debug, Default)]
pub struct SelfError {
    failures: Vec<SelfFailure>,
}

impl SelfError {
    /// Creates the error from collected failures.
    pub fn new(failures: Vec<SelfFailure>) -> Self {
        Self { failures }
    }

    /// Returns the number of failing constraints.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if no constraint failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the failures.
    pub fn failures(&self) -> &[SelfFailure] {
        &self.failures
    }
}

impl fmt::Display for SelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SelfError {}

/// A single flattened violation with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Error decoding a document into a [`crate::Value`].
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A YAML mapping key has no string form.
    #[error("unsupported YAML map key: {0}")]
    UnsupportedKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(name: &str) -> ValidationError {
        ValidationError::type_mismatch(name)
    }

    #[test]
    fn test_field_error_display() {
        let e = FieldError::new("age", mismatch("number"));
        assert_eq!(e.to_string(), "age : type mismatch: expected number");
    }

    #[test]
    fn test_aggregate_joins_with_newline() {
        let agg = AggregateError::new(vec![
            FieldError::new("age", mismatch("number")),
            FieldError::new("name", ValidationError::from(ConstraintError::new("too short"))),
        ]);
        assert_eq!(
            agg.to_string(),
            "age : type mismatch: expected number\nname : too short"
        );
        assert_eq!(agg.len(), 2);
        assert!(agg.get("name").is_some());
        assert!(agg.get("email").is_none());
    }

    #[test]
    fn test_constraint_error_is_transparent() {
        let e = ValidationError::from(ConstraintError::new("must be positive"));
        assert_eq!(e.to_string(), "must be positive");
    }

    #[test]
    fn test_self_failure_labels() {
        let err = SelfError::new(vec![
            SelfFailure {
                index: 0,
                name: Some("dates_ordered".to_string()),
                cause: ConstraintError::new("start after end"),
            },
            SelfFailure {
                index: 2,
                name: None,
                cause: ConstraintError::new("bad"),
            },
        ]);
        assert_eq!(err.to_string(), "dates_ordered : start after end\n#2 : bad");
    }

    #[test]
    fn test_violations_flatten_nested_paths() {
        let inner = AggregateError::new(vec![FieldError::new("zip/code", mismatch("string"))]);
        let outer = ValidationError::Fields(AggregateError::new(vec![
            FieldError::new("address", ValidationError::Fields(inner)),
            FieldError::new("age", mismatch("number")),
        ]));

        let violations = outer.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "/address/zip~1code");
        assert_eq!(violations[0].message, "type mismatch: expected string");
        assert_eq!(violations[1].path, "/age");
    }

    #[test]
    fn test_violations_for_self_check_at_object_path() {
        let err = ValidationError::SelfCheck(SelfError::new(vec![SelfFailure {
            index: 0,
            name: None,
            cause: ConstraintError::new("inconsistent"),
        }]));
        let violations = err.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "(root): #0 : inconsistent");
    }

    #[test]
    fn test_violation_display() {
        let v = Violation {
            path: "/address/city".to_string(),
            message: "type mismatch: expected string".to_string(),
        };
        assert_eq!(v.to_string(), "/address/city: type mismatch: expected string");
    }
}
