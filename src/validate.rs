//! validate.rs
//!
//! Checks a birth date against calendar rules and the reference date.
//!
//! Every rule runs on every evaluation and a field may collect several
//! errors; nothing short-circuits. The result is plain data so the caller can
//! show all of it at once.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::calendar;
use crate::input::{BirthDateInput, Field};

/// What is wrong with a field. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("This field is required")]
    Required,
    #[error("Must be a valid day")]
    InvalidDay,
    #[error("Must be in the past!")]
    InFuture,
    #[error("Too many days for this month!")]
    TooManyDays,
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single field-tagged error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: Field,
    #[serde(rename = "message")]
    pub issue: Issue,
}

/// Ordered list of errors found for one input. Empty means accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[cfg(test)]
    pub fn contains(&self, field: Field, issue: Issue) -> bool {
        self.errors
            .iter()
            .any(|e| e.field == field && e.issue == issue)
    }

    /// Whether `field` has at least one error. Unflagged fields are clear.
    #[cfg(test)]
    pub fn is_flagged(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Messages attached to `field`, in the order they were found.
    pub fn messages_for(&self, field: Field) -> impl Iterator<Item = Issue> + '_ {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.issue)
    }

    fn push(&mut self, field: Field, issue: Issue) {
        self.errors.push(ValidationError { field, issue });
    }
}

/// Validates `input` against the calendar and the reference date `now`.
pub fn validate(input: &BirthDateInput, now: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !input.day.is_some_and(|d| d > 0) {
        result.push(Field::Day, Issue::Required);
    }
    if !input.month.is_some_and(|m| (1..=12).contains(&m)) {
        result.push(Field::Month, Issue::Required);
    }
    if !input.year.is_some_and(|y| y != 0) {
        result.push(Field::Year, Issue::Required);
    }

    let candidate = match (input.year, input.month, input.day) {
        (Some(y), Some(m), Some(d)) => calendar::normalize(y, m, d),
        _ => None,
    };

    let kept_components = candidate.is_some_and(|date| {
        input.month == Some(i64::from(date.month())) && input.day == Some(i64::from(date.day()))
    });
    if !kept_components {
        result.push(Field::Day, Issue::InvalidDay);
    }

    if candidate.is_some_and(|date| date > now) {
        result.push(Field::Year, Issue::InFuture);
    }

    if let (Some(y), Some(m), Some(d)) = (input.year, input.month, input.day) {
        if calendar::days_in_month(y, m).is_some_and(|max| d > i64::from(max)) {
            result.push(Field::Day, Issue::TooManyDays);
        }
    }

    result
}
