//! Validation limits.
//!
//! [`ValidationConfig`] optionally bounds how deeply object validators may
//! nest while walking an input. Schemas are immutable trees, so no limit is
//! applied unless one is configured via environment variables or explicit
//! construction.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Environment variable setting [`ValidationConfig::max_depth`].
pub const MAX_DEPTH_VAR: &str = "VSHAPE_MAX_DEPTH";

/// Limits applied while validating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum number of nested object validators entered during one
    /// `validate` call. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl ValidationConfig {
    /// A configuration limiting nesting to `max_depth` objects.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VSHAPE_MAX_DEPTH` (default: unbounded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_depth = match lookup(MAX_DEPTH_VAR) {
            Some(raw) => Some(raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: MAX_DEPTH_VAR.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };
        Ok(Self { max_depth })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

/// Per-call recursion state threaded through nested validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    depth: usize,
    max_depth: Option<usize>,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl ValidationContext {
    /// A fresh context at depth zero.
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one more level of nesting.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DepthExceeded` once a configured limit is
    /// passed.
    pub fn descend(self) -> Result<Self, ValidationError> {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(ValidationError::DepthExceeded { limit });
            }
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}
