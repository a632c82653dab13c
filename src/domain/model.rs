use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inputs on the intake form, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Age,
    Email,
    Phone,
    School,
    Grade,
    Zone,
    Interests,
    Goals,
    Notes,
    ParentContact,
}

impl Field {
    /// Wire key used in the JSON payload.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Age => "age",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::School => "school",
            Field::Grade => "grade",
            Field::Zone => "zone",
            Field::Interests => "interests",
            Field::Goals => "goals",
            Field::Notes => "notes",
            Field::ParentContact => "parentContact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Age => "Age",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::School => "School",
            Field::Grade => "Grade",
            Field::Zone => "Zone / neighborhood",
            Field::Interests => "Career interests",
            Field::Goals => "Goals",
            Field::Notes => "Additional notes",
            Field::ParentContact => "Parent/guardian contact",
        }
    }
}

/// Raw values as the applicant typed them. `interests` holds the checked
/// boxes in the order they appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub full_name: String,
    pub age: String,
    pub email: String,
    pub phone: String,
    pub school: String,
    pub grade: String,
    pub zone: String,
    pub interests: Vec<String>,
    pub goals: String,
    pub notes: String,
    pub parent_contact: String,
}

impl FormState {
    /// Text value of a single-valued field. `Interests` has no single value.
    pub fn value(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FullName => &self.full_name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::School => &self.school,
            Field::Grade => &self.grade,
            Field::Zone => &self.zone,
            Field::Goals => &self.goals,
            Field::Notes => &self.notes,
            Field::ParentContact => &self.parent_contact,
            Field::Interests => return None,
        };
        Some(value.as_str())
    }

    /// Overwrites a single-valued field. Ignored for `Interests`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Age => &mut self.age,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::School => &mut self.school,
            Field::Grade => &mut self.grade,
            Field::Zone => &mut self.zone,
            Field::Goals => &mut self.goals,
            Field::Notes => &mut self.notes,
            Field::ParentContact => &mut self.parent_contact,
            Field::Interests => return,
        };
        *slot = value.into();
    }

    /// Checks or unchecks one interest box. Checked boxes keep the position
    /// given by `page_order` so the joined string follows the page.
    pub fn toggle_interest(&mut self, value: &str, checked: bool, page_order: &[&str]) {
        self.interests.retain(|selected| selected != value);
        if checked {
            self.interests.push(value.to_string());
            let rank = |v: &String| {
                page_order
                    .iter()
                    .position(|option| *option == v.as_str())
                    .unwrap_or(usize::MAX)
            };
            self.interests.sort_by_key(rank);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FormState::default()
    }
}

/// One applicant submission as sent to the intake endpoint.
///
/// Built once by the aggregator after validation passes and sent once. The
/// endpoint deserializes the same shape; absent keys become empty strings.
///
/// Non-string values are coerced on the way in (see [`lenient_string`]) so a
/// sloppy client still gets its row stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(deserialize_with = "lenient_string")]
    pub grade: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub interests: String,
    #[serde(deserialize_with = "lenient_string")]
    pub goals: String,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: String,
    #[serde(deserialize_with = "lenient_string")]
    pub parent_contact: String,
    #[serde(deserialize_with = "lenient_string")]
    pub submitted_at: String,
}

/// Loose text coercion for incoming records: `null`, `false`, `0` and `""`
/// become empty, other numbers and `true` their text, arrays are joined
/// with `,`, objects keep their JSON text.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
