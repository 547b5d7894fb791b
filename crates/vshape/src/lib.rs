//! # vshape — Composable Validators for Dynamic Data
//!
//! Declares, per field, what shape and constraints a decoded value must
//! satisfy, and reports every failing field instead of a single opaque
//! error.
//!
//! ## Building Blocks
//!
//! - [`number`], [`string`], [`boolean`] build [`LeafValidator`]s: a kind
//!   check followed by caller constraints. Leaves accept absent values.
//! - [`object`] builds an [`ObjectValidator`] from a [`Schema`].
//!   [`ObjectValidator::self_checks`] derives a copy carrying whole-object
//!   constraints that run only once every field has passed.
//! - [`constraints`] holds ready-made value and object constraints.
//!
//! ```
//! use vshape::{constraints, number, object, string, Schema, Validator, Value};
//!
//! let person = object(
//!     Schema::new()
//!         .field("age", number(vec![constraints::min(0.0)]))
//!         .field("name", string(vec![constraints::non_empty()])),
//! )
//! .self_checks(vec![constraints::required(["name"])]);
//!
//! let ok = Value::from_json_str(r#"{"age": 30, "name": "Bob"}"#).unwrap();
//! assert!(person.validate(&ok).is_ok());
//!
//! let bad = Value::from_json_str(r#"{"age": "x", "name": "Bob"}"#).unwrap();
//! let err = person.validate(&bad).unwrap_err();
//! assert_eq!(err.to_string(), "age : type mismatch: expected number");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `vshape-core` internally.
//! - Validators are immutable once built and are `Send + Sync`.
//! - All failures are returned as values; nothing panics on bad input.

pub mod constraints;
pub mod leaf;
pub mod object;
pub mod validator;

pub use leaf::{boolean, number, run_constraints, string, LeafValidator, ValueConstraint};
pub use object::{object, ObjectConstraint, ObjectValidator, Schema};
pub use validator::{SharedValidator, Validator};

pub use vshape_core::{
    AggregateError, Classification, ConstraintError, DecodeError, FieldError, Kind, Mapping,
    Number, SelfError, SelfFailure, ValidationConfig, ValidationContext, ValidationError, Value,
    Violation,
};
