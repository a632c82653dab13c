use crate::domain::model::IntakeRecord;
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Fire-and-forget POST of the record as JSON.
///
/// The response is dropped unread: any status, including 4xx/5xx, counts as
/// sent. Only connection-level faults (DNS, refused, reset, TLS) are errors.
/// No timeout and no retry.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &str, record: &IntakeRecord) -> Result<()> {
        // `.json` sets Content-Type: application/json
        let response = self.client.post(endpoint).json(record).send().await?;
        drop(response);
        tracing::debug!("Intake request dispatched to {}", endpoint);
        Ok(())
    }
}
