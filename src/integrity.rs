//! Named-assertion reporter for structural self-audits.
//!
//! `check_integrity` implementations append one assertion per invariant
//! instead of panicking, so tests and ops tooling can list every violated
//! invariant at once.
//!
//! ```
//! use clockpro::integrity::IntegrityReport;
//!
//! let mut report = IntegrityReport::new();
//! report
//!     .check("hot max within segment capacity", true)
//!     .check_equals("hot clock length matches hot size", 3, 3);
//! assert!(report.is_ok());
//! assert_eq!(report.assertions().len(), 2);
//! ```

use std::fmt;

use crate::error::InvariantError;

/// One recorded assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub name: String,
    pub passed: bool,
    /// Present for failed `check_equals` assertions.
    pub detail: Option<String>,
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "ok" } else { "FAILED" };
        match &self.detail {
            Some(detail) => write!(f, "{}: {verdict} ({detail})", self.name),
            None => write!(f, "{}: {verdict}", self.name),
        }
    }
}

/// Accumulates pass/fail assertions. Never panics.
#[derive(Debug, Default, Clone)]
pub struct IntegrityReport {
    assertions: Vec<Assertion>,
}

impl IntegrityReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a boolean assertion.
    pub fn check(&mut self, name: impl Into<String>, passed: bool) -> &mut Self {
        self.assertions.push(Assertion {
            name: name.into(),
            passed,
            detail: None,
        });
        self
    }

    /// Records that `actual == expected`, keeping both values on failure.
    pub fn check_equals<T>(&mut self, name: impl Into<String>, actual: T, expected: T) -> &mut Self
    where
        T: PartialEq + fmt::Debug,
    {
        let passed = actual == expected;
        self.assertions.push(Assertion {
            name: name.into(),
            passed,
            detail: (!passed).then(|| format!("{actual:?} != {expected:?}")),
        });
        self
    }

    /// Moves every assertion of `other` into this report, prefixing names.
    pub fn absorb(&mut self, prefix: &str, other: IntegrityReport) -> &mut Self {
        self.assertions
            .extend(other.assertions.into_iter().map(|assertion| Assertion {
                name: format!("{prefix}{}", assertion.name),
                ..assertion
            }));
        self
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn failures(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|assertion| !assertion.passed)
    }

    /// `true` when no recorded assertion failed.
    pub fn is_ok(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Folds the report into a `Result`, listing every failed assertion.
    pub fn into_result(self) -> Result<(), InvariantError> {
        let failed: Vec<String> = self.failures().map(ToString::to_string).collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(InvariantError::new(failed))
        }
    }
}
