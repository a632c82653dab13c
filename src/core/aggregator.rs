use crate::domain::model::{FormState, IntakeRecord};
use chrono::{DateTime, Local, TimeZone};

pub const INTEREST_SEPARATOR: &str = ", ";

/// Client-local timestamp in the en-US locale shape, e.g. `3/7/2025, 4:05:09 PM`.
pub fn locale_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Builds the record to send. Call only after validation passed; nothing is
/// checked here.
pub fn collect(form: &FormState) -> IntakeRecord {
    collect_at(form, &Local::now())
}

pub fn collect_at<Tz: TimeZone>(form: &FormState, now: &DateTime<Tz>) -> IntakeRecord
where
    Tz::Offset: std::fmt::Display,
{
    IntakeRecord {
        full_name: form.full_name.trim().to_string(),
        age: form.age.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        school: form.school.trim().to_string(),
        // select value, copied as-is
        grade: form.grade.clone(),
        zone: form.zone.trim().to_string(),
        interests: form.interests.join(INTEREST_SEPARATOR),
        goals: form.goals.trim().to_string(),
        notes: form.notes.trim().to_string(),
        parent_contact: form.parent_contact.trim().to_string(),
        submitted_at: locale_timestamp(now),
    }
}
