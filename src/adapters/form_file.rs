//! Applicant files for the command line: the same camelCase keys as the
//! form, in TOML or JSON.

use crate::domain::model::FormState;
use crate::utils::error::{IntakeError, Result};
use std::path::Path;

pub fn load_form<P: AsRef<Path>>(path: P) -> Result<FormState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let form = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => {
            return Err(IntakeError::InvalidConfigValueError {
                field: "form".to_string(),
                value: path.display().to_string(),
                reason: "Applicant file must end in .toml or .json".to_string(),
            })
        }
    };
    tracing::debug!("Loaded applicant form from {}", path.display());
    Ok(form)
}
