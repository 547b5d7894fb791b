//! # Object Validators
//!
//! An [`ObjectValidator`] validates a mapping against a [`Schema`] and then
//! against a list of whole-object [`ObjectConstraint`]s.
//!
//! ## Gates
//!
//! Validation passes through three gates in order, and stops at the first
//! one that fails:
//!
//! 1. **Conversion.** The value must be map-shaped (one level of optional
//!    indirection is unwrapped). Otherwise the result is a type mismatch for
//!    `"object"`, with no field errors.
//! 2. **Inner.** Every schema field is validated against the mapping's
//!    entry of the same name, or against the absent value if the entry is
//!    missing. All failing fields are collected into one
//!    [`AggregateError`], in field-name order.
//! 3. **Self.** Only if no field failed, every whole-object constraint runs
//!    against the mapping. All failures are collected into a [`SelfError`].
//!
//! ## Derivation
//!
//! [`ObjectValidator::self_checks`] returns a new validator sharing the
//! schema and carrying a replaced constraint list. The receiver is left
//! untouched, so validators that embed it keep their behavior.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use vshape_core::{
    AggregateError, ConstraintError, FieldError, Mapping, SelfError, SelfFailure,
    ValidationConfig, ValidationContext, ValidationError, Value,
};

use crate::validator::{SharedValidator, Validator};

static ABSENT: Value = Value::Null;

type ObjectCheckFn = dyn Fn(&Mapping) -> Result<(), ConstraintError> + Send + Sync;

/// A caller-supplied check over a whole mapping.
#[derive(Clone)]
pub struct ObjectConstraint {
    name: Option<String>,
    check: Arc<ObjectCheckFn>,
}

impl ObjectConstraint {
    /// Wrap a check function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Mapping) -> Result<(), ConstraintError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    /// Wrap a check function under a name reported on failure.
    pub fn named<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Mapping) -> Result<(), ConstraintError> + Send + Sync + 'static,
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
    pub fn check(&self, mapping: &Mapping) -> Result<(), ConstraintError> {
        (self.check)(mapping)
    }
}

impl fmt::Debug for ObjectConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectConstraint")
            .field("name", &self.name.as_deref().unwrap_or("<anonymous>"))
            .finish()
    }
}

/// Field name to child validator.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, SharedValidator>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::insert`].
    pub fn field(mut self, name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        self.fields.insert(name.into(), Arc::new(validator));
        self
    }

    /// Add or replace a field, returning the validator it replaced.
    pub fn insert(&mut self, name: impl Into<String>, validator: SharedValidator) -> Option<SharedValidator> {
        self.fields.insert(name.into(), validator)
    }

    /// Look up a field's validator.
    pub fn get(&self, name: &str) -> Option<&SharedValidator> {
        self.fields.get(name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedValidator)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, SharedValidator)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, SharedValidator)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Validator for a mapping: a schema plus whole-object constraints.
#[derive(Debug, Clone)]
pub struct ObjectValidator {
    schema: Arc<Schema>,
    self_checks: Arc<[ObjectConstraint]>,
    optional: bool,
    config: ValidationConfig,
}

/// Build an object validator from a schema.
pub fn object(schema: Schema) -> ObjectValidator {
    ObjectValidator {
        schema: Arc::new(schema),
        self_checks: Arc::from(Vec::new()),
        optional: false,
        config: ValidationConfig::default(),
    }
}

impl ObjectValidator {
    /// Derive a validator whose whole-object constraints are `constraints`.
    ///
    /// The list replaces any constraints the receiver carried; chained
    /// calls do not accumulate. The schema is shared, not copied.
    pub fn self_checks(&self, constraints: Vec<ObjectConstraint>) -> Self {
        Self {
            self_checks: constraints.into(),
            ..self.clone()
        }
    }

    /// Derive a validator that also accepts the absent value.
    pub fn optional(&self) -> Self {
        Self {
            optional: true,
            ..self.clone()
        }
    }

    /// Derive a validator using `config` when it is the root of a call.
    pub fn with_config(&self, config: ValidationConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    /// The schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The whole-object constraints, in run order.
    pub fn constraints(&self) -> &[ObjectConstraint] {
        &self.self_checks
    }

    /// Returns true if absence is accepted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    fn check_inner(&self, mapping: &Mapping, ctx: ValidationContext) -> Result<(), AggregateError> {
        let mut errors = Vec::new();
        for (name, validator) in self.schema.iter() {
            let field = mapping.get(name).unwrap_or(&ABSENT);
            if let Err(e) = validator.validate_in(field, ctx) {
                tracing::trace!(field = name, error = %e, "field rejected");
                errors.push(FieldError::new(name, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError::new(errors))
        }
    }

    fn check_self(&self, mapping: &Mapping) -> Result<(), SelfError> {
        let failures: Vec<SelfFailure> = self
            .self_checks
            .iter()
            .enumerate()
            .filter_map(|(index, constraint)| {
                constraint.check(mapping).err().map(|cause| SelfFailure {
                    index,
                    name: constraint.name.clone(),
                    cause,
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SelfError::new(failures))
        }
    }
}

impl Validator for ObjectValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_in(value, ValidationContext::new(self.config))
    }

    fn validate_in(&self, value: &Value, ctx: ValidationContext) -> Result<(), ValidationError> {
        if self.optional && value.is_absent() {
            tracing::trace!(depth = ctx.depth(), "absent object accepted");
            return Ok(());
        }

        let ctx = ctx.descend()?;

        let Some(mapping) = value.as_mapping() else {
            tracing::debug!(actual = value.type_name(), "object expected");
            return Err(ValidationError::type_mismatch("object"));
        };

        if let Err(agg) = self.check_inner(mapping, ctx) {
            tracing::debug!(failures = agg.len(), depth = ctx.depth(), "object fields rejected");
            return Err(ValidationError::Fields(agg));
        }

        if let Err(self_err) = self.check_self(mapping) {
            tracing::debug!(failures = self_err.len(), depth = ctx.depth(), "object self checks rejected");
            return Err(ValidationError::SelfCheck(self_err));
        }

        Ok(())
    }
}
