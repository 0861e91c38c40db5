//! age.rs
//!
//! Elapsed years, months and days between a birth date and a reference date,
//! rendered as "X years, Y months, Z days".
//!
//! Days are borrowed before months: a day deficit can push months below
//! zero, and only the month fix that follows brings them back into `0..=11`.
//!
//! Adding the result back onto the birth date with `calendar::normalize`
//! lands exactly on the reference date.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar;
use crate::input::BirthDateInput;
use crate::validate::{self, ValidationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgeResult {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl AgeResult {
    /// Adds this age to `birth`, components first, then rolls the sum into a
    /// real date.
    pub fn add_to(&self, birth: NaiveDate) -> Option<NaiveDate> {
        calendar::normalize(
            i64::from(birth.year()).checked_add(self.years)?,
            i64::from(birth.month()).checked_add(self.months)?,
            i64::from(birth.day()).checked_add(self.days)?,
        )
    }
}

impl fmt::Display for AgeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

pub fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Age of `input` on `now`.
///
/// `input` must already have passed [`validate::validate`]; for rejected
/// input the numbers are meaningless but no panic occurs.
pub fn calculate_age(input: &BirthDateInput, now: NaiveDate) -> AgeResult {
    let birth_year = input.year.unwrap_or_default();
    let birth_month = input.month.unwrap_or_default();
    let birth_day = input.day.unwrap_or_default();

    let mut years = i64::from(now.year()).saturating_sub(birth_year);
    let mut months = i64::from(now.month()).saturating_sub(birth_month);
    let mut days = i64::from(now.day()).saturating_sub(birth_day);

    // Fix day underflow
    if days < 0 {
        months -= 1;

        // December before a January `now` keeps `now`'s year. December is
        // 31 days in every year, so this never changes the outcome.
        let (prev_year, prev_month) = if now.month() == 1 {
            (i64::from(now.year()), 12)
        } else {
            (i64::from(now.year()), i64::from(now.month()) - 1)
        };
        days = days.saturating_add(days_in(prev_year, prev_month));

        // A birth day past the end of that month (31 Jan against a 28-day
        // February) still leaves a deficit; borrow the month before it too.
        if days < 0 {
            months -= 1;
            days = days.saturating_add(days_in(prev_year, prev_month - 1));
        }
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    AgeResult {
        years,
        months,
        days,
    }
}

fn days_in(year: i64, month: i64) -> i64 {
    calendar::days_in_month(year, month).map_or(0, i64::from)
}

/// Validates `input` and, if nothing was flagged, calculates the age.
pub fn evaluate(input: &BirthDateInput, now: NaiveDate) -> Result<AgeResult, ValidationResult> {
    let result = validate::validate(input, now);
    if !result.is_empty() {
        return Err(result);
    }

    let age = calculate_age(input, now);
    debug_assert_eq!(
        input
            .year
            .zip(input.month)
            .zip(input.day)
            .and_then(|((y, m), d)| calendar::normalize(y, m, d))
            .and_then(|birth| age.add_to(birth)),
        Some(now)
    );
    Ok(age)
}
