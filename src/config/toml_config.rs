use crate::config::EndpointSetting;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, validate_socket_addr,
    validate_url, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_SHEET_PATH: &str = "./data/high-places-intake.csv";
pub const DEFAULT_OUTBOX_DIR: &str = "./data/outbox";
pub const DEFAULT_SUBJECT_PREFIX: &str = "[High Places] New Student Registration";
pub const DEFAULT_SENDER_NAME: &str = "High Places Youth Ministry";

static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub client: ClientConfig,
    pub endpoint: EndpointConfig,
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub bind_address: String,
    pub sheet_path: PathBuf,
    pub outbox_dir: PathBuf,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            outbox_dir: PathBuf::from(DEFAULT_OUTBOX_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub recipient: Option<String>,
    pub subject_prefix: String,
    pub sender_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Loads the config file, or the defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// untouched so they read as unconfigured later.
    fn substitute_env_vars(content: &str) -> String {
        ENV_REFERENCE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn endpoint_setting(&self) -> EndpointSetting {
        EndpointSetting::new(self.client.endpoint_url.clone())
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        validate_socket_addr("endpoint.bind_address", &self.endpoint.bind_address)
    }

    pub fn validate_config(&self) -> Result<()> {
        // An unset endpoint is allowed here; submit reports it.
        let setting = self.endpoint_setting();
        if let Ok(url) = setting.resolve() {
            validate_url("client.endpoint_url", url)?;
        }

        self.bind_address()?;
        validate_path(
            "endpoint.sheet_path",
            &self.endpoint.sheet_path.to_string_lossy(),
        )?;
        validate_path(
            "endpoint.outbox_dir",
            &self.endpoint.outbox_dir.to_string_lossy(),
        )?;
        validate_non_empty_string("notification.subject_prefix", &self.notification.subject_prefix)?;

        Ok(())
    }

    /// Extra checks for running the endpoint service.
    pub fn validate_for_service(&self) -> Result<()> {
        self.validate_config()?;
        let recipient = validate_required_field("notification.recipient", &self.notification.recipient)?;
        validate_non_empty_string("notification.recipient", recipient)?;
        if !recipient.contains('@') {
            return Err(IntakeError::InvalidConfigValueError {
                field: "notification.recipient".to_string(),
                value: recipient.clone(),
                reason: "Not an email address".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
