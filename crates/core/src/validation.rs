//! Input validation
//!
//! Collects every problem with the user's inputs before failing, so a single run
//! reports all bad flags at once.
//!
//! # Example
//!
//! ```rust
//! use office_days_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .range("latitude", 48.1794935, -90.0, 90.0)
//!     .non_negative("tolerance", 1000.0)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// One problem with one input
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Name of the flag or config key
    pub field: String,
    /// What is wrong
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a [`Validator`] run
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ValidationResult {
    /// True when no errors were found; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Problems that make the inputs unusable
    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    /// Problems worth reporting that do not stop the run
    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    /// Fails with a single validation error listing every problem
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let messages: Vec<String> = self.errors.iter().map(Issue::to_string).collect();
        Err(Error::validation(format!("Invalid input: {}", messages.join("; "))))
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    fn error(mut self, field: &str, message: String) -> Self {
        self.result.errors.push(Issue {
            field: field.to_string(),
            message,
        });
        self
    }

    /// `value` must lie in `min..=max`; NaN never does
    pub fn range(self, field: &str, value: f64, min: f64, max: f64) -> Self {
        if (min..=max).contains(&value) {
            self
        } else {
            self.error(field, format!("{} is outside {}..={}", value, min, max))
        }
    }

    /// `value` must be finite and at least zero
    pub fn non_negative(self, field: &str, value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            self
        } else {
            self.error(field, format!("{} is not a finite, non-negative number", value))
        }
    }

    /// Warns (without failing) when `path` is not a directory
    pub fn directory_warning(mut self, field: &str, path: &Path) -> Self {
        if !path.is_dir() {
            let what = if path.exists() { "is not a directory" } else { "does not exist" };
            self.result.warnings.push(Issue {
                field: field.to_string(),
                message: format!("{} {}", path.display(), what),
            });
        }
        self
    }

    /// Fails with `message` when `ok` is false
    pub fn check(self, field: &str, ok: bool, message: impl Into<String>) -> Self {
        if ok { self } else { self.error(field, message.into()) }
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
