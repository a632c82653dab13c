//! Field checks for the intake form.
//!
//! Each check is a pure function returning `Ok(())` or the reason the value
//! was rejected. [`apply_report`] is the only place that touches a presenter.

use crate::domain::model::{Field, FormState};
use crate::domain::ports::Presenter;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_AGE: i64 = 10;
pub const MAX_AGE: i64 = 30;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: String },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange { min: i64, max: i64 },

    #[error("Please select at least one career interest")]
    NoInterests,
}

pub type FieldResult = std::result::Result<(), FieldError>;

pub fn validate_required(value: &str, label: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(FieldError::Required {
            label: label.to_string(),
        });
    }
    Ok(())
}

pub fn validate_email(value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required {
            label: Field::Email.label().to_string(),
        });
    }
    if !EMAIL_SHAPE.is_match(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_age(value: &str) -> FieldResult {
    let age = match parse_leading_int(value) {
        Some(age) => age,
        None => {
            return Err(FieldError::Required {
                label: Field::Age.label().to_string(),
            })
        }
    };
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(FieldError::AgeOutOfRange {
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }
    Ok(())
}

pub fn validate_interests<S: AsRef<str>>(selected: &[S]) -> FieldResult {
    if selected.is_empty() {
        return Err(FieldError::NoInterests);
    }
    Ok(())
}

/// Integer-prefix parse: optional leading whitespace and sign, then digits.
/// Anything after the digits is ignored. Overflow saturates so that huge
/// inputs still read as numbers (and fail the range check).
fn parse_leading_int(value: &str) -> Option<i64> {
    let rest = value.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Outcome of checking every required field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    checked: Vec<(Field, FieldResult)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.checked.iter().all(|(_, result)| result.is_ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.checked
            .iter()
            .filter_map(|(field, result)| result.as_ref().err().map(|err| (*field, err)))
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors().find(|(f, _)| *f == field).map(|(_, err)| err)
    }

    pub fn first_invalid(&self) -> Option<Field> {
        self.errors().next().map(|(field, _)| field)
    }

    pub fn checked_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.checked.iter().map(|(field, _)| *field)
    }
}

/// Runs every check, never stopping at the first failure, so the user sees
/// all problems in one pass.
pub fn validate_form(form: &FormState) -> ValidationReport {
    let checked = vec![
        (
            Field::FullName,
            validate_required(&form.full_name, Field::FullName.label()),
        ),
        (Field::Age, validate_age(&form.age)),
        (Field::Email, validate_email(&form.email)),
        (Field::Zone, validate_required(&form.zone, Field::Zone.label())),
        (Field::Interests, validate_interests(&form.interests)),
    ];

    let report = ValidationReport { checked };
    tracing::debug!(
        valid = report.is_valid(),
        errors = report.errors().count(),
        "Form validated"
    );
    report
}

/// Marks failed fields and clears passed ones.
pub fn apply_report<P: Presenter + ?Sized>(presenter: &mut P, report: &ValidationReport) {
    for (field, result) in &report.checked {
        match result {
            Err(err) => presenter.show_field_error(*field, &err.to_string()),
            Ok(()) => presenter.clear_field_error(*field),
        }
    }
}
