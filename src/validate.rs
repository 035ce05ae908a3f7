//! Validation layer - stateless field checks run before any mutation.
//!
//! Each check returns the first violation it finds; record validators chain
//! them with `?` so the first failing field short-circuits the rest.

use std::cmp::Ordering;
use std::fmt::Display;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ValidationRules;

/// A rejected field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is missing, empty, or zero where a positive value is needed.
    #[error("field required: {field}: {reason}")]
    FieldRequired { field: String, reason: String },
    /// The field is present but out of range or malformed.
    #[error("invalid field: {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::FieldRequired {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::FieldRequired { field, .. }
            | ValidationError::InvalidField { field, .. } => field,
        }
    }
}

/// Types that can check their own fields.
pub trait Validate {
    fn validate(&self, rules: &ValidationRules) -> Result<(), ValidationError>;
}

/// Non-empty, not just whitespace.
pub fn required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field, "must not be empty"));
    }
    Ok(())
}

/// Strictly greater than zero. NaN fails.
pub fn positive<T>(field: &str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default + Display,
{
    match value.partial_cmp(&T::default()) {
        Some(Ordering::Greater) => Ok(()),
        _ => Err(ValidationError::required(
            field,
            format!("must be positive, got {}", value),
        )),
    }
}

/// Zero or greater. NaN fails.
pub fn non_negative<T>(field: &str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default + Display,
{
    match value.partial_cmp(&T::default()) {
        Some(Ordering::Greater | Ordering::Equal) => Ok(()),
        _ => Err(ValidationError::invalid(
            field,
            format!("must not be negative, got {}", value),
        )),
    }
}

/// Within `[rules.min_year, rules.max_year()]`.
pub fn year(field: &str, value: i32, rules: &ValidationRules) -> Result<(), ValidationError> {
    let max = rules.max_year();
    if value < rules.min_year || value > max {
        return Err(ValidationError::invalid(
            field,
            format!("must be between {} and {}, got {}", rules.min_year, max, value),
        ));
    }
    Ok(())
}

/// Exactly in `rules.date_format`: the parsed date must format back to
/// `value`, so unpadded fields, short years and signs are rejected.
pub fn date(field: &str, value: &str, rules: &ValidationRules) -> Result<(), ValidationError> {
    required(field, value)?;
    let mismatch = |detail: String| {
        ValidationError::invalid(
            field,
            format!("{:?} does not match {}: {}", value, rules.date_format, detail),
        )
    };
    let parsed = NaiveDate::parse_from_str(value, &rules.date_format)
        .map_err(|e| mismatch(e.to_string()))?;
    if parsed.format(&rules.date_format).to_string() != value {
        return Err(mismatch("not in canonical form".into()));
    }
    Ok(())
}

/// Both bounds non-negative and `min <= max`.
pub fn range<T>(field: &str, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default + Display + Copy,
{
    non_negative(field, min)?;
    non_negative(field, max)?;
    if min > max {
        return Err(ValidationError::invalid(
            field,
            format!("min {} exceeds max {}", min, max),
        ));
    }
    Ok(())
}
