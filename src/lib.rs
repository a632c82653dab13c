pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod endpoint;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpTransport, terminal::TerminalPresenter};
pub use config::{toml_config::IntakeConfig, EndpointSetting};
pub use core::controller::{ClickTarget, SubmissionController, SubmitOutcome, SubmitState};
pub use domain::model::{Field, FormState, IntakeRecord};
pub use utils::error::{IntakeError, Result};
