use crate::domain::model::Field;
use crate::domain::ports::Presenter;
use std::io::Write;

pub const CONFIRMATION_MESSAGE: &str =
    "✅ Registration received! Thank you for signing up for High Places Youth Ministry.";

/// Presenter for the command line. Field errors are kept so the caller can
/// inspect what is currently shown.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    shown_errors: Vec<(Field, String)>,
    busy: bool,
    confirmation_visible: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_errors: Vec::new(),
            busy: false,
            confirmation_visible: false,
        }
    }

    pub fn shown_errors(&self) -> &[(Field, String)] {
        &self.shown_errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn confirmation_visible(&self) -> bool {
        self.confirmation_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show_field_error(&mut self, field: Field, message: &str) {
        self.shown_errors.retain(|(shown, _)| *shown != field);
        self.shown_errors.push((field, message.to_string()));
        self.line(&format!("  ✗ {}: {}", field.label(), message));
    }

    fn clear_field_error(&mut self, field: Field) {
        self.shown_errors.retain(|(shown, _)| *shown != field);
    }

    fn reveal_field(&mut self, field: Field) {
        self.line(&format!("→ Start with: {} ({})", field.label(), field.key()));
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if busy {
            self.line("Submitting…");
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(message);
    }

    fn show_confirmation(&mut self) {
        self.confirmation_visible = true;
        self.line(CONFIRMATION_MESSAGE);
    }

    fn reset(&mut self) {
        self.confirmation_visible = false;
        self.shown_errors.clear();
    }
}
