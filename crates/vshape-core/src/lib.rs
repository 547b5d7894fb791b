//! # vshape-core — Foundational Types for vshape
//!
//! This crate holds everything a validator needs to *look at* data and to
//! *report* on it, without knowing how validators compose. The `vshape`
//! crate depends on it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **A closed dynamic value model.** Decoded data is represented by the
//!    [`Value`] enum. Kind classification is a pure `match` over it, so
//!    malformed or unrepresentable input degrades to [`Classification::Unknown`]
//!    instead of panicking.
//!
//! 2. **One abstract number kind.** [`Number`] covers every integer width and
//!    both float widths; validators only ever ask "is this a number".
//!
//! 3. **Structured errors.** [`ValidationError`] keeps per-field failures as
//!    [`FieldError`]s inside an [`AggregateError`], and whole-object failures
//!    as a positioned [`SelfError`]. Nothing is collapsed into a string until
//!    it is rendered.
//!
//! 4. **Opt-in recursion bound.** [`ValidationContext`] tracks nesting
//!    depth against the limit in [`ValidationConfig`], when one is set.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vshape` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod kind;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::{ConfigError, ValidationConfig, ValidationContext, MAX_DEPTH_VAR};
pub use error::{
    AggregateError, ConstraintError, DecodeError, FieldError, SelfError, SelfFailure,
    ValidationError, Violation,
};
pub use kind::{Classification, Kind};
pub use value::{Mapping, Number, Value};
