use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::age::{AgeResult, plural};
use crate::input::Field;
use crate::validate::ValidationResult;

const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// The three result boxes and the errors shown under the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub days: Option<i64>,
    pub errors: ValidationResult,
}

impl Report {
    pub fn accepted(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn render(&self, format: Format) -> Result<String> {
        match format {
            Format::Text => Ok(self.to_text()),
            Format::Json => serde_json::to_string(self).context("Failed to encode report as JSON"),
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();

        for (value, unit) in [
            (self.years, "year"),
            (self.months, "month"),
            (self.days, "day"),
        ] {
            let line = match value {
                Some(n) => format!("{n} {unit}{}\n", plural(n)),
                None => format!("{PLACEHOLDER} {unit}s\n"),
            };
            out.push_str(&line);
        }

        // Errors grouped under their field, the way the form lays them out.
        for field in Field::ALL {
            for issue in self.errors.messages_for(field) {
                out.push_str(&format!("{field}: {issue}\n"));
            }
        }

        out
    }
}

impl From<Result<AgeResult, ValidationResult>> for Report {
    fn from(outcome: Result<AgeResult, ValidationResult>) -> Self {
        match outcome {
            Ok(age) => Self {
                years: Some(age.years),
                months: Some(age.months),
                days: Some(age.days),
                errors: ValidationResult::default(),
            },
            Err(errors) => Self {
                errors,
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::evaluate;
    use crate::input::BirthDateInput;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    #[test]
    fn test_text_accepted() {
        let report = Report::from(evaluate(&BirthDateInput::new(15, 6, 1990), today()));
        assert!(report.accepted());
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "33 years\n11 months\n30 days\n"
        );
    }

    #[test]
    fn test_text_singular() {
        let report = Report::from(evaluate(&BirthDateInput::new(13, 5, 2023), today()));
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "1 year\n1 month\n1 day\n"
        );
    }

    #[test]
    fn test_text_rejected() {
        let input = BirthDateInput {
            day: Some(31),
            month: None,
            year: Some(2099),
        };
        let report = Report::from(evaluate(&input, today()));
        assert!(!report.accepted());
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "-- years\n-- months\n-- days\n\
             day: Must be a valid day\n\
             month: This field is required\n"
        );
    }

    #[test]
    fn test_text_groups_by_field() {
        let report = Report::from(evaluate(&BirthDateInput::new(31, 4, 2099), today()));
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "-- years\n-- months\n-- days\n\
             day: Must be a valid day\n\
             day: Too many days for this month!\n\
             year: Must be in the past!\n"
        );
    }

    #[test]
    fn test_json() {
        let ok = Report::from(evaluate(&BirthDateInput::new(15, 6, 1990), today()));
        assert_eq!(
            ok.render(Format::Json).unwrap(),
            r#"{"years":33,"months":11,"days":30,"errors":[]}"#
        );

        let rejected = Report::from(evaluate(&BirthDateInput::new(15, 6, 2099), today()));
        assert_eq!(
            rejected.render(Format::Json).unwrap(),
            r#"{"years":null,"months":null,"days":null,"errors":[{"field":"year","message":"Must be in the past!"}]}"#
        );
    }
}
