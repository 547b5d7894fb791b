//! The validator capability shared by leaf and object validators.

use std::fmt;
use std::sync::Arc;

use vshape_core::{ValidationContext, ValidationError, Value};

/// A validator checks one value and reports why it is invalid.
///
/// Implementations hold no per-call state; one instance may be used from
/// many threads at once.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Validate a value from the root of a validation call.
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_in(value, ValidationContext::default())
    }

    /// Validate a value nested inside an enclosing validator.
    fn validate_in(&self, value: &Value, ctx: ValidationContext) -> Result<(), ValidationError>;

    /// Convert a JSON value and validate it.
    fn validate_json(&self, value: &serde_json::Value) -> Result<(), ValidationError> {
        self.validate(&Value::from(value))
    }
}

/// A validator shared between schemas.
pub type SharedValidator = Arc<dyn Validator>;

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        (**self).validate(value)
    }

    fn validate_in(&self, value: &Value, ctx: ValidationContext) -> Result<(), ValidationError> {
        (**self).validate_in(value, ctx)
    }
}
