//! # Leaf Validators
//!
//! A [`LeafValidator`] checks that a value is of one primitive [`Kind`] and
//! then runs the caller's [`ValueConstraint`]s against it.
//!
//! ## Contract
//!
//! 1. An absent value (null, or an optional wrapping nothing) passes
//!    immediately. Leaves are optional; constraints never see absence.
//! 2. A present value of another kind fails with a type mismatch naming
//!    the expected kind.
//! 3. Otherwise constraints run in declaration order against the unwrapped
//!    value. The first failing constraint ends the run and its error is
//!    returned unchanged.

use std::fmt;
use std::sync::Arc;

use vshape_core::{Classification, ConstraintError, Kind, ValidationContext, ValidationError, Value};

use crate::validator::Validator;

type ValueCheckFn = dyn Fn(&Value) -> Result<(), ConstraintError> + Send + Sync;

/// A caller-supplied check over a single present primitive value.
#[derive(Clone)]
pub struct ValueConstraint {
    name: Option<String>,
    check: Arc<ValueCheckFn>,
}

impl ValueConstraint {
    /// Wrap a check function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ConstraintError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    /// Wrap a check function under a descriptive name.
    pub fn named<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ConstraintError> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            check: Arc::new(check),
        }
    }

    /// The constraint's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the check.
    pub fn check(&self, value: &Value) -> Result<(), ConstraintError> {
        (self.check)(value)
    }
}

impl fmt::Debug for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueConstraint")
            .field("name", &self.name.as_deref().unwrap_or("<anonymous>"))
            .finish()
    }
}

/// Run constraints in order, stopping at the first failure.
pub fn run_constraints(constraints: &[ValueConstraint], value: &Value) -> Result<(), ConstraintError> {
    for constraint in constraints {
        constraint.check(value)?;
    }
    Ok(())
}

/// Validator for one primitive kind plus value constraints.
#[derive(Debug, Clone)]
pub struct LeafValidator {
    kind: Kind,
    constraints: Arc<[ValueConstraint]>,
}

impl LeafValidator {
    /// Create a leaf validator for `kind`.
    pub fn new(kind: Kind, constraints: Vec<ValueConstraint>) -> Self {
        Self {
            kind,
            constraints: constraints.into(),
        }
    }

    /// The kind this validator requires.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The registered constraints, in run order.
    pub fn constraints(&self) -> &[ValueConstraint] {
        &self.constraints
    }
}

impl Validator for LeafValidator {
    fn validate_in(&self, value: &Value, _ctx: ValidationContext) -> Result<(), ValidationError> {
        match Kind::classify(value) {
            Classification::Absent => {
                tracing::trace!(kind = self.kind.name(), "absent value accepted");
                Ok(())
            }
            Classification::Kind(kind) if kind == self.kind => {
                let present = value.unwrap_optional().unwrap_or(value);
                run_constraints(&self.constraints, present).map_err(ValidationError::Constraint)
            }
            _ => {
                tracing::trace!(
                    expected = self.kind.name(),
                    actual = value.type_name(),
                    "type mismatch"
                );
                Err(ValidationError::type_mismatch(self.kind.name()))
            }
        }
    }
}

/// A validator accepting any number width.
pub fn number(constraints: Vec<ValueConstraint>) -> LeafValidator {
    LeafValidator::new(Kind::Number, constraints)
}

/// A validator accepting strings.
pub fn string(constraints: Vec<ValueConstraint>) -> LeafValidator {
    LeafValidator::new(Kind::String, constraints)
}

/// A validator accepting booleans.
pub fn boolean(constraints: Vec<ValueConstraint>) -> LeafValidator {
    LeafValidator::new(Kind::Bool, constraints)
}
