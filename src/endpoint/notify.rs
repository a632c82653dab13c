//! New-registration notices. Rendering is kept apart from delivery; the
//! shipped [`OutboxNotifier`] only writes each notice to a directory.

use crate::config::toml_config::NotificationConfig;
use crate::domain::model::IntakeRecord;
use crate::domain::ports::Notifier;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const EMPTY: &str = "—";
const NO_INTERESTS: &str = "Not specified";
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub sender_name: String,
    pub subject: String,
    pub plain_body: String,
    pub html_body: String,
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        EMPTY
    } else {
        value
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn detail_rows(record: &IntakeRecord) -> Vec<(&'static str, &str)> {
    let name = if record.full_name.is_empty() {
        UNKNOWN_NAME
    } else {
        &record.full_name
    };
    let interests = if record.interests.is_empty() {
        NO_INTERESTS
    } else {
        &record.interests
    };
    vec![
        ("Name", name),
        ("Age", or_dash(&record.age)),
        ("Email", or_dash(&record.email)),
        ("Phone", or_dash(&record.phone)),
        ("School", or_dash(&record.school)),
        ("Grade", or_dash(&record.grade)),
        ("Zone", or_dash(&record.zone)),
        ("Career Interests", interests),
        ("Goals", or_dash(&record.goals)),
        ("Notes", or_dash(&record.notes)),
        ("Parent Contact", or_dash(&record.parent_contact)),
    ]
}

pub fn render(record: &IntakeRecord, recipient: &str, config: &NotificationConfig) -> Notification {
    let rows = detail_rows(record);
    let name = rows[0].1;

    let mut plain_body = String::from("New Student Registration — High Places Youth Ministry\n\n");
    for (label, value) in &rows {
        plain_body.push_str(&format!("{}: {}\n", label, value));
    }

    let mut html_body = String::from(
        "<div style=\"font-family: 'Segoe UI', Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\n\
         <h1 style=\"color: #F07222;\">High Places — New Registration</h1>\n\
         <p>A new student has registered for the High Places Youth Ministry program:</p>\n\
         <table style=\"width: 100%; border-collapse: collapse; font-size: 14px;\">\n",
    );
    for (i, (label, value)) in rows.iter().enumerate() {
        let shade = if i % 2 == 1 { " style=\"background: #fdf6f0;\"" } else { "" };
        html_body.push_str(&format!(
            "<tr{}><td style=\"padding: 10px 12px; font-weight: 600;\">{}</td><td style=\"padding: 10px 12px;\">{}</td></tr>\n",
            shade,
            label,
            escape_html(value)
        ));
    }
    html_body.push_str(
        "</table>\n<p style=\"text-align: center; font-size: 12px;\">\
         BDS — Breaking D Silence Deliverance &amp; Healing Ministry<br/>High Places Youth Ministry</p>\n</div>\n",
    );

    Notification {
        to: recipient.to_string(),
        sender_name: config.sender_name.clone(),
        subject: format!("{}: {}", config.subject_prefix, name),
        plain_body,
        html_body,
    }
}

/// Writes each rendered notification as a JSON file in `dir`.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    dir: PathBuf,
    recipient: String,
    config: NotificationConfig,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>, recipient: impl Into<String>, config: NotificationConfig) -> Self {
        Self {
            dir: dir.into(),
            recipient: recipient.into(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn notify(&self, record: &IntakeRecord) -> Result<()> {
        let notification = render(record, &self.recipient, &self.config);
        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}.json", Utc::now().format("%Y%m%dT%H%M%S%.6fZ"));
        let path = self.dir.join(file_name);
        let payload = serde_json::to_vec_pretty(&notification)?;
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| IntakeError::NotificationError {
                message: format!("Failed to write {}: {}", path.display(), e),
            })?;

        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification queued in outbox"
        );
        Ok(())
    }
}
