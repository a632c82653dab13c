//! Intake endpoint: receives submitted records, appends them to the sheet
//! and queues a notification.

pub mod handlers;
pub mod notify;
pub mod sheet;
pub mod state;

use crate::config::toml_config::IntakeConfig;
use crate::utils::error::{IntakeError, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use handlers::{health_handler, intake_handler};
use notify::OutboxNotifier;
use sheet::CsvSheet;
use state::EndpointState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: EndpointState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(health_handler).post(intake_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Builds the state from config and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: &IntakeConfig) -> Result<()> {
    config.validate_for_service()?;
    let address = config.bind_address()?;
    let recipient = config
        .notification
        .recipient
        .clone()
        .ok_or_else(|| IntakeError::MissingConfigError {
            field: "notification.recipient".to_string(),
        })?;

    let sheet = CsvSheet::new(&config.endpoint.sheet_path);
    sheet.ensure_created()?;
    let notifier = OutboxNotifier::new(
        &config.endpoint.outbox_dir,
        recipient,
        config.notification.clone(),
    );
    let app = build_router(EndpointState::new(Arc::new(sheet), Arc::new(notifier)));

    tracing::info!("Binding to {}", address);
    let listener = TcpListener::bind(address).await?;
    tracing::info!("Intake endpoint running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Intake endpoint shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
