use crate::domain::model::{Field, IntakeRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One-way delivery of a record to the intake endpoint.
///
/// `Ok(())` only means the request left without a transport fault. The
/// response is never read, so delivery is at-most-once and unconfirmed: a
/// record the endpoint failed to store still reports success here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: &str, record: &IntakeRecord) -> Result<()>;
}

/// Presentation layer driven by the submission controller.
pub trait Presenter: Send {
    fn show_field_error(&mut self, field: Field, message: &str);
    fn clear_field_error(&mut self, field: Field);
    /// Bring a field into view (first invalid field after a failed submit).
    fn reveal_field(&mut self, field: Field);
    /// Disable the submit control and show the loading state, or undo both.
    fn set_busy(&mut self, busy: bool);
    /// Blocking message the user must acknowledge.
    fn alert(&mut self, message: &str);
    /// Show the confirmation overlay and lock page scroll.
    fn show_confirmation(&mut self);
    /// Hide the overlay, clear the inputs, unlock scroll and go back to the top.
    fn reset(&mut self);
}

/// Tabular storage for accepted submissions.
pub trait SheetStore: Send + Sync {
    fn append(&self, row: &[String]) -> Result<()>;
}

/// Outgoing notification sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &IntakeRecord) -> Result<()>;
}
