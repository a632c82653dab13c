use clap::Parser;
use intake_form::adapters::form_file::load_form;
use intake_form::config::cli::Command;
use intake_form::core::validator::{apply_report, validate_form};
use intake_form::endpoint;
use intake_form::utils::{logger, validation::Validate};
use intake_form::{
    CliConfig, HttpTransport, IntakeError, SubmissionController, SubmitOutcome, TerminalPresenter,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.command {
        Command::Serve => logger::init_service_logger(),
        _ => logger::init_cli_logger(cli.verbose),
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &CliConfig) -> Result<i32, IntakeError> {
    let config = cli.load_intake_config()?;
    config.validate()?;

    match &cli.command {
        Command::Validate { form } => {
            let state = load_form(form)?;
            let report = validate_form(&state);
            let mut presenter = TerminalPresenter::stdout();
            apply_report(&mut presenter, &report);

            if report.is_valid() {
                println!("✅ {} is ready to submit", form.display());
                Ok(0)
            } else {
                Ok(2)
            }
        }
        Command::Submit { form } => {
            let state = load_form(form)?;
            let mut controller = SubmissionController::new(
                config.endpoint_setting(),
                HttpTransport::new(),
                TerminalPresenter::stdout(),
            )
            .with_form(state);

            let code = match controller.submit().await {
                SubmitOutcome::Delivered => 0,
                SubmitOutcome::Invalid { .. } => 2,
                SubmitOutcome::NotConfigured => 3,
                SubmitOutcome::Failed | SubmitOutcome::Blocked => 1,
            };
            Ok(code)
        }
        Command::Serve => {
            tracing::info!("Starting intake endpoint");
            endpoint::serve(&config).await?;
            Ok(0)
        }
    }
}
