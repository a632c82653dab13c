use crate::domain::model::IntakeRecord;
use crate::endpoint::sheet::row_for;
use crate::endpoint::state::EndpointState;
use crate::utils::error::Result;
use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const HEALTH_MESSAGE: &str = "High Places Intake endpoint is active.";
pub const SAVED_MESSAGE: &str = "Data saved successfully.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: String,
    pub message: String,
}

impl StatusReply {
    fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
        }
    }
}

pub async fn health_handler() -> Json<StatusReply> {
    Json(StatusReply::new("ok", HEALTH_MESSAGE))
}

/// Always answers 200; failures are reported in the body. Browser clients
/// post in no-cors mode and never see either.
pub async fn intake_handler(State(state): State<EndpointState>, body: Bytes) -> Json<StatusReply> {
    match store_submission(&state, &body).await {
        Ok(()) => Json(StatusReply::new("success", SAVED_MESSAGE)),
        Err(e) => {
            tracing::error!("Error handling intake submission: {}", e);
            Json(StatusReply::new("error", e.to_string()))
        }
    }
}

async fn store_submission(state: &EndpointState, body: &[u8]) -> Result<()> {
    let record: IntakeRecord = serde_json::from_slice(body)?;
    let row = row_for(&record, Utc::now());

    let sheet = state.sheet.clone();
    tokio::task::spawn_blocking(move || sheet.append(&row))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))??;
    tracing::info!("Stored submission for {}", record.full_name);

    state.notifier.notify(&record).await?;
    Ok(())
}
