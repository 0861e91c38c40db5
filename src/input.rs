//! Raw form input: three text fields read as lenient integers.

use std::fmt;

use serde::Serialize;

/// One of the three form fields an error can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Day, Field::Month, Field::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Birth date as typed by the user. `None` is an empty or non-numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthDateInput {
    pub day: Option<i64>,
    pub month: Option<i64>,
    pub year: Option<i64>,
}

impl BirthDateInput {
    #[cfg(test)]
    pub fn new(day: i64, month: i64, year: i64) -> Self {
        Self {
            day: Some(day),
            month: Some(month),
            year: Some(year),
        }
    }

    /// Builds an input from the raw text of each field.
    pub fn from_fields(day: &str, month: &str, year: &str) -> Self {
        Self {
            day: parse_int(day),
            month: parse_int(month),
            year: parse_int(year),
        }
    }

    /// Parses one submitted line, in day/month/year order.
    ///
    /// `15/6/1990` splits on slashes and keeps empty segments as missing
    /// fields (`15//1990` has no month). Anything else splits on whitespace.
    pub fn from_line(line: &str) -> Self {
        let parts: Vec<&str> = if line.contains('/') {
            line.split('/').collect()
        } else {
            line.split_whitespace().collect()
        };
        let part = |i: usize| parts.get(i).copied().unwrap_or("");

        Self::from_fields(part(0), part(1), part(2))
    }
}

/// Reads an integer the way a form's `parseInt` does.
///
/// Leading whitespace and a sign are accepted, `0x` switches to hexadecimal,
/// and parsing stops at the first character that is not a digit. Returns
/// `None` when no digit was read. Values beyond `i64` saturate.
pub fn parse_int(text: &str) -> Option<i64> {
    let mut rest = text.trim_start();

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = match rest.get(..2) {
        Some("0x") | Some("0X") => {
            rest = &rest[2..];
            16
        }
        _ => 10,
    };

    let mut value: i64 = 0;
    let mut saturated = false;
    let mut digits = 0usize;

    for c in rest.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        digits += 1;
        if saturated {
            continue;
        }
        match value
            .checked_mul(i64::from(radix))
            .and_then(|v| v.checked_add(i64::from(digit)))
        {
            Some(v) => value = v,
            None => saturated = true,
        }
    }

    match (digits, saturated, negative) {
        (0, _, _) => None,
        (_, true, false) => Some(i64::MAX),
        (_, true, true) => Some(i64::MIN),
        (_, false, true) => Some(-value),
        (_, false, false) => Some(value),
    }
}
