//! Application state definitions

use super::forms::IntakeForm;
use crate::validation::FieldErrors;
use std::collections::VecDeque;

/// Everything the UI renders from
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The form being filled in
    pub form: IntakeForm,
    /// Inline errors from the last validation pass
    pub field_errors: FieldErrors,
    /// Banner errors waiting to be shown, oldest first
    pub error_queue: VecDeque<String>,
    /// Success banner after a completed submission
    pub notice: Option<String>,
    /// One-line message in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Queue an error banner
    pub fn push_error(&mut self, message: String) {
        tracing::debug!("Queued error banner: {message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Banner currently on screen
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Close the banner on screen, revealing the next one
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// True while a modal banner is covering the form
    pub fn has_modal(&self) -> bool {
        self.has_errors() || self.notice.is_some()
    }
}
