//! calendar.rs
//!
//! Gregorian helpers shared by validation and age calculation.
//!
//! Form input is raw integers, so dates are built the way a browser's date
//! constructor builds them: out-of-range components roll over instead of
//! being rejected. `normalize(2023, 2, 30)` is March 2nd, `normalize(2024, 3, 0)`
//! is the last day of February. Whether a roll happened is for the caller to
//! decide.

use chrono::{Days, NaiveDate};

/// Builds a date from possibly out-of-range components, carrying overflow
/// upward (days into months, months into years).
///
/// Returns `None` if the result is outside the range chrono can represent.
pub fn normalize(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let (year, month) = roll_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Brings `month` into `1..=12`, carrying whole years into `year`.
pub fn roll_month(year: i64, month: i64) -> Option<(i64, u32)> {
    let zero_based = month.checked_sub(1)?;
    let year = year.checked_add(zero_based.div_euclid(12))?;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    Some((year, month))
}

/// Number of days in `month` of `year`. Out-of-range months are rolled first,
/// so month 13 of 2023 reports January 2024.
pub fn days_in_month(year: i64, month: i64) -> Option<u32> {
    let (year, month) = roll_month(year, month)?;
    Some(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    })
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        // Rolled: month 14 of 2023 is February 2024, month 0 is December.
        assert_eq!(days_in_month(2023, 14), Some(29));
        assert_eq!(days_in_month(2024, 0), Some(31));
        assert_eq!(days_in_month(2024, -10), Some(28));
    }

    #[test]
    fn test_normalize_in_range() {
        assert_eq!(normalize(1990, 6, 15), Some(date(1990, 6, 15)));
        assert_eq!(normalize(2000, 2, 29), Some(date(2000, 2, 29)));
    }

    #[test]
    fn test_normalize_rolls_over() {
        assert_eq!(normalize(2023, 2, 30), Some(date(2023, 3, 2)));
        assert_eq!(normalize(2024, 3, 0), Some(date(2024, 2, 29)));
        assert_eq!(normalize(2023, 13, 1), Some(date(2024, 1, 1)));
        assert_eq!(normalize(2023, 0, 1), Some(date(2022, 12, 1)));
        assert_eq!(normalize(2023, 1, -1), Some(date(2022, 12, 30)));
        assert_eq!(normalize(2021, 2, 41), Some(date(2021, 3, 13)));
    }

    #[test]
    fn test_normalize_out_of_range() {
        assert_eq!(normalize(i64::MAX, 1, 1), None);
        assert_eq!(normalize(1_000_000_000, 1, 1), None);
        assert_eq!(normalize(2024, i64::MIN, 1), None);
        assert_eq!(normalize(2024, 1, i64::MAX), None);
    }
}
