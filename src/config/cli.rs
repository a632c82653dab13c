use crate::config::toml_config::IntakeConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "intake-form")]
#[command(about = "High Places youth ministry intake: validate, submit and receive applications")]
pub struct CliConfig {
    #[arg(long, default_value = "intake.toml", help = "Path to the TOML config file")]
    pub config: PathBuf,

    #[arg(long, env = "INTAKE_ENDPOINT_URL", help = "Overrides client.endpoint_url")]
    pub endpoint_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check an applicant file and print every field error
    Validate {
        #[arg(long)]
        form: PathBuf,
    },
    /// Validate an applicant file and send it to the intake endpoint
    Submit {
        #[arg(long)]
        form: PathBuf,
    },
    /// Run the intake endpoint service
    Serve,
}

impl CliConfig {
    /// Config file merged with command-line overrides.
    pub fn load_intake_config(&self) -> Result<IntakeConfig> {
        let mut config = IntakeConfig::load(&self.config)?;
        if let Some(url) = &self.endpoint_url {
            config.client.endpoint_url = Some(url.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = CliConfig::try_parse_from([
            "intake-form",
            "--config",
            "/nonexistent/intake.toml",
            "--endpoint-url",
            "http://127.0.0.1:8080/",
            "submit",
            "--form",
            "jane.toml",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Submit { .. }));
        let config = cli.load_intake_config().unwrap();
        assert_eq!(
            config.endpoint_setting().resolve().unwrap(),
            "http://127.0.0.1:8080/"
        );
    }

    #[test]
    fn test_serve_needs_no_form() {
        let cli = CliConfig::try_parse_from(["intake-form", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
        assert!(!cli.verbose);
    }
}
