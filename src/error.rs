//! Error types for the eviction core.
//!
//! - [`ConfigError`]: a construction parameter is out of range; names the
//!   offending parameter.
//! - [`InvariantError`]: a structural self-audit failed; lists every failed
//!   assertion (see
//!   [`IntegrityReport::into_result`](crate::integrity::IntegrityReport::into_result)).
//!
//! Broken caller contracts (stale entry handles, victim selection on an
//! empty segment) are not errors; they panic.
//!
//! ```
//! use clockpro::builder::ClockProBuilder;
//!
//! let err = ClockProBuilder::new(100).hot_max_percentage(150).try_build().unwrap_err();
//! assert_eq!(err.parameter(), "hot_max_percentage");
//! assert_eq!(err.to_string(), "invalid hot_max_percentage: must be within 0..=100, got 150");
//! ```

use std::fmt;

/// A construction parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    parameter: &'static str,
    reason: String,
}

impl ConfigError {
    pub fn new(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            parameter,
            reason: reason.into(),
        }
    }

    /// Name of the rejected parameter, as spelled on `ClockProConfig`.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.parameter, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// One or more integrity assertions failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    failed: Vec<String>,
}

impl InvariantError {
    /// `failed` holds one rendered assertion per violated invariant.
    pub fn new(failed: Vec<String>) -> Self {
        Self { failed }
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} integrity check(s) failed: ", self.failed.len())?;
        f.write_str(&self.failed.join("; "))
    }
}

impl std::error::Error for InvariantError {}
