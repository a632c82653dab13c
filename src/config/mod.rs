#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{IntakeError, Result};

/// Placeholder shipped in the sample config before the endpoint is deployed.
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_INTAKE_ENDPOINT_URL_HERE";

/// Address of the intake endpoint, fixed at startup and handed to the
/// submission controller. It may still be unset; that is only reported when
/// a valid form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSetting {
    url: Option<String>,
}

impl EndpointSetting {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_ok()
    }

    pub fn resolve(&self) -> Result<&str> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !is_placeholder(url) => Ok(url),
            _ => Err(IntakeError::EndpointNotConfigured),
        }
    }
}

/// Empty, the sample placeholder, or a `${VAR}` reference whose variable was
/// not set at load time.
fn is_placeholder(url: &str) -> bool {
    url.is_empty() || url == PLACEHOLDER_ENDPOINT || (url.starts_with("${") && url.ends_with('}'))
}
