//! Service configuration: validation rules and the unknown-field policy.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Bounds and formats used by the validation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Earliest accepted year (inclusive).
    pub min_year: i32,
    /// Latest accepted year (inclusive). `None` means the current year.
    pub max_year: Option<i32>,
    /// `chrono` format for date fields; day/month/year by default.
    pub date_format: String,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: None,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Pin the upper year bound instead of following the clock.
    pub fn with_max_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Resolved upper year bound.
    pub fn max_year(&self) -> i32 {
        self.max_year.unwrap_or_else(|| Local::now().year())
    }
}

/// What a partial update does with field names the record does not have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Skip them (logged at debug level).
    #[default]
    Ignore,
    /// Fail the update with `InvalidField`.
    Reject,
}

/// Configuration for an `EntityService`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub rules: ValidationRules,
    pub unknown_fields: UnknownFields,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }
}
