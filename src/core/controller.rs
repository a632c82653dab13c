use crate::config::EndpointSetting;
use crate::core::aggregator;
use crate::core::validator::{apply_report, validate_form};
use crate::domain::model::{Field, FormState};
use crate::domain::ports::{Presenter, Transport};

pub const NOT_CONFIGURED_WARNING: &str = "⚠️ Intake endpoint URL not configured!\n\n\
Please deploy the intake endpoint (`intake-form serve`) and set client.endpoint_url in intake.toml \
or the INTAKE_ENDPOINT_URL environment variable.";

pub const TRANSPORT_FAILURE_ALERT: &str =
    "❌ Something went wrong while submitting. Please check your internet connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; nothing was sent.
    Invalid { first: Field },
    /// Endpoint URL missing or still a placeholder; nothing was sent.
    NotConfigured,
    /// The request left without a transport fault. Not a storage receipt.
    Delivered,
    /// Transport fault. The form is left as-is for a manual retry.
    Failed,
    /// Submit arrived while busy or while the confirmation is showing.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

/// Clears the busy state on drop, whichever way the send ends.
struct BusyGuard<'a, P: Presenter> {
    presenter: &'a mut P,
    state: &'a mut SubmitState,
}

impl<'a, P: Presenter> BusyGuard<'a, P> {
    fn engage(presenter: &'a mut P, state: &'a mut SubmitState) -> Self {
        *state = SubmitState::Submitting;
        presenter.set_busy(true);
        Self { presenter, state }
    }
}

impl<P: Presenter> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.set_busy(false);
        *self.state = SubmitState::Idle;
    }
}

/// Drives one form through validate, collect, send and feedback.
pub struct SubmissionController<T: Transport, P: Presenter> {
    endpoint: EndpointSetting,
    transport: T,
    presenter: P,
    form: FormState,
    state: SubmitState,
    confirmation_visible: bool,
}

impl<T: Transport, P: Presenter> SubmissionController<T, P> {
    pub fn new(endpoint: EndpointSetting, transport: T, presenter: P) -> Self {
        Self {
            endpoint,
            transport,
            presenter,
            form: FormState::default(),
            state: SubmitState::Idle,
            confirmation_visible: false,
        }
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.form = form;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn confirmation_visible(&self) -> bool {
        self.confirmation_visible
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Text input changed. The field's error is cleared right away; it is
    /// only checked again on the next submit.
    pub fn on_input(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.presenter.clear_field_error(field);
    }

    pub fn on_interest_change(&mut self, value: &str, checked: bool, page_order: &[&str]) {
        self.form.toggle_interest(value, checked, page_order);
        self.presenter.clear_field_error(Field::Interests);
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != SubmitState::Idle || self.confirmation_visible {
            tracing::debug!(state = ?self.state, "Submit ignored while busy");
            return SubmitOutcome::Blocked;
        }

        self.state = SubmitState::Validating;
        let report = validate_form(&self.form);
        apply_report(&mut self.presenter, &report);
        if let Some(first) = report.first_invalid() {
            self.presenter.reveal_field(first);
            self.state = SubmitState::Idle;
            return SubmitOutcome::Invalid { first };
        }

        let endpoint = match self.endpoint.resolve() {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!("Submit blocked: {}", e);
                self.presenter.alert(NOT_CONFIGURED_WARNING);
                self.state = SubmitState::Idle;
                return SubmitOutcome::NotConfigured;
            }
        };

        let record = aggregator::collect(&self.form);

        let sent = {
            let _busy = BusyGuard::engage(&mut self.presenter, &mut self.state);
            tracing::debug!("Sending intake record to {}", endpoint);
            self.transport.send(&endpoint, &record).await
        };

        match sent {
            Ok(()) => {
                tracing::info!("Intake record sent for {}", record.full_name);
                self.presenter.show_confirmation();
                self.confirmation_visible = true;
                SubmitOutcome::Delivered
            }
            Err(e) => {
                tracing::error!("Submission error: {}", e);
                self.presenter.alert(TRANSPORT_FAILURE_ALERT);
                SubmitOutcome::Failed
            }
        }
    }

    /// Returns true when the click dismissed the confirmation.
    pub fn dismiss_on_click(&mut self, target: ClickTarget) -> bool {
        if !self.confirmation_visible || target != ClickTarget::Backdrop {
            return false;
        }
        self.reset_form();
        true
    }

    /// Returns true when the key dismissed the confirmation.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key != "Escape" || !self.confirmation_visible {
            return false;
        }
        self.reset_form();
        true
    }

    fn reset_form(&mut self) {
        self.form = FormState::default();
        self.confirmation_visible = false;
        self.presenter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::IntakeRecord;
    use crate::utils::error::{IntakeError, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        FieldError(Field, String),
        FieldCleared(Field),
        Revealed(Field),
        Busy(bool),
        Alert(String),
        Confirmation,
        Reset,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        events: Vec<Event>,
    }

    impl RecordingPresenter {
        fn errored(&self) -> Vec<Field> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::FieldError(field, _) => Some(*field),
                    _ => None,
                })
                .collect()
        }

        fn busy_transitions(&self) -> Vec<bool> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Busy(busy) => Some(*busy),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn show_field_error(&mut self, field: Field, message: &str) {
            self.events.push(Event::FieldError(field, message.to_string()));
        }
        fn clear_field_error(&mut self, field: Field) {
            self.events.push(Event::FieldCleared(field));
        }
        fn reveal_field(&mut self, field: Field) {
            self.events.push(Event::Revealed(field));
        }
        fn set_busy(&mut self, busy: bool) {
            self.events.push(Event::Busy(busy));
        }
        fn alert(&mut self, message: &str) {
            self.events.push(Event::Alert(message.to_string()));
        }
        fn show_confirmation(&mut self) {
            self.events.push(Event::Confirmation);
        }
        fn reset(&mut self) {
            self.events.push(Event::Reset);
        }
    }

    #[derive(Clone, Default)]
    struct StubTransport {
        sent: Arc<Mutex<Vec<(String, IntakeRecord)>>>,
        fail: bool,
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, endpoint: &str, record: &IntakeRecord) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((endpoint.to_string(), record.clone()));
            if self.fail {
                return Err(IntakeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "network unreachable",
                )));
            }
            Ok(())
        }
    }

    fn valid_form() -> FormState {
        FormState {
            full_name: "Jane Doe".to_string(),
            age: "16".to_string(),
            email: "jane@example.com".to_string(),
            zone: "North".to_string(),
            interests: vec!["Medicine".to_string()],
            ..Default::default()
        }
    }

    fn configured() -> EndpointSetting {
        EndpointSetting::new(Some("https://intake.example.org/".to_string()))
    }

    #[tokio::test]
    async fn test_valid_form_is_sent_once_and_confirmed() {
        let transport = StubTransport::default();
        let mut controller =
            SubmissionController::new(configured(), transport.clone(), RecordingPresenter::default())
                .with_form(valid_form());

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Delivered);
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://intake.example.org/");
        assert_eq!(sent[0].1.interests, "Medicine");
        assert_eq!(sent[0].1.full_name, "Jane Doe");
        assert!(controller.confirmation_visible());
        assert_eq!(controller.state(), SubmitState::Idle);
        assert_eq!(controller.presenter().busy_transitions(), vec![true, false]);
        assert!(controller.presenter().events.contains(&Event::Confirmation));
    }

    #[tokio::test]
    async fn test_invalid_form_marks_all_failures_and_sends_nothing() {
        let transport = StubTransport::default();
        let form = FormState {
            age: "31".to_string(),
            email: "a@b".to_string(),
            ..Default::default()
        };
        let mut controller =
            SubmissionController::new(configured(), transport.clone(), RecordingPresenter::default())
                .with_form(form);

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid { first: Field::FullName });
        assert!(transport.sent.lock().unwrap().is_empty());
        assert_eq!(
            controller.presenter().errored(),
            vec![
                Field::FullName,
                Field::Age,
                Field::Email,
                Field::Zone,
                Field::Interests
            ]
        );
        assert!(controller
            .presenter()
            .events
            .contains(&Event::Revealed(Field::FullName)));
        assert!(controller.presenter().busy_transitions().is_empty());
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_only_empty_required_fields_are_marked() {
        let mut form = valid_form();
        form.zone = "   ".to_string();
        let mut controller = SubmissionController::new(
            configured(),
            StubTransport::default(),
            RecordingPresenter::default(),
        )
        .with_form(form);

        controller.submit().await;

        assert_eq!(controller.presenter().errored(), vec![Field::Zone]);
        assert!(controller
            .presenter()
            .events
            .contains(&Event::FieldCleared(Field::FullName)));
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_blocks_without_sending() {
        let transport = StubTransport::default();
        let placeholder = EndpointSetting::new(Some("YOUR_INTAKE_ENDPOINT_URL_HERE".to_string()));
        let mut controller =
            SubmissionController::new(placeholder, transport.clone(), RecordingPresenter::default())
                .with_form(valid_form());

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::NotConfigured);
        assert!(transport.sent.lock().unwrap().is_empty());
        assert!(controller
            .presenter()
            .events
            .contains(&Event::Alert(NOT_CONFIGURED_WARNING.to_string())));
        assert!(controller.presenter().busy_transitions().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_form_and_alerts() {
        let transport = StubTransport {
            fail: true,
            ..Default::default()
        };
        let mut controller =
            SubmissionController::new(configured(), transport.clone(), RecordingPresenter::default())
                .with_form(valid_form());

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.form(), &valid_form());
        assert!(!controller.confirmation_visible());
        assert_eq!(controller.presenter().busy_transitions(), vec![true, false]);
        assert!(controller
            .presenter()
            .events
            .contains(&Event::Alert(TRANSPORT_FAILURE_ALERT.to_string())));

        // no automatic retry
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_submit_is_blocked_while_confirmation_shows() {
        let transport = StubTransport::default();
        let mut controller =
            SubmissionController::new(configured(), transport.clone(), RecordingPresenter::default())
                .with_form(valid_form());

        controller.submit().await;
        assert_eq!(controller.submit().await, SubmitOutcome::Blocked);
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_escape_and_backdrop_dismiss_confirmation() {
        let mut controller = SubmissionController::new(
            configured(),
            StubTransport::default(),
            RecordingPresenter::default(),
        )
        .with_form(valid_form());

        assert!(!controller.on_key("Escape"));

        controller.submit().await;
        assert!(!controller.on_key("Enter"));
        assert!(!controller.dismiss_on_click(ClickTarget::Content));
        assert!(controller.confirmation_visible());

        assert!(controller.on_key("Escape"));
        assert!(!controller.confirmation_visible());
        assert!(controller.form().is_empty());
        assert!(controller.presenter().events.contains(&Event::Reset));

        controller = controller.with_form(valid_form());
        controller.submit().await;
        assert!(controller.dismiss_on_click(ClickTarget::Backdrop));
        assert!(controller.form().is_empty());
    }

    #[test]
    fn test_input_clears_only_that_field() {
        let mut controller = SubmissionController::new(
            configured(),
            StubTransport::default(),
            RecordingPresenter::default(),
        );

        controller.on_input(Field::Email, "jane@");
        controller.on_interest_change("Medicine", true, &["Medicine", "Arts"]);

        assert_eq!(controller.form().email, "jane@");
        assert_eq!(controller.form().interests, vec!["Medicine"]);
        assert_eq!(
            controller.presenter().events,
            vec![
                Event::FieldCleared(Field::Email),
                Event::FieldCleared(Field::Interests)
            ]
        );
    }
}
