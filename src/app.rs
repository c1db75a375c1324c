//! Application state and core logic

use crate::platform::SUBMIT_MODIFIER;
use crate::state::{AppState, Form, FormAction, IntakeForm};
use crate::submit::{SubmissionController, SubmissionState, SubmitError, SubmitTransport};
use crate::validation::{validate_field, validate_form, FieldErrors, FieldId, Service};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

type SubmissionResult = Result<Value, SubmitError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Drives the submission lifecycle
    pub controller: SubmissionController,
    /// Completed network calls flow back to the event loop through here
    results_tx: mpsc::UnboundedSender<SubmissionResult>,
    results_rx: mpsc::UnboundedReceiver<SubmissionResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(
        endpoint: Option<String>,
        transport: Arc<dyn SubmitTransport>,
        prefill: Option<Service>,
    ) -> Self {
        if endpoint.is_none() {
            tracing::warn!("No submission endpoint configured; submissions will fail");
        }
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState {
                form: IntakeForm::with_service(prefill),
                ..Default::default()
            },
            controller: SubmissionController::new(endpoint, transport),
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.is_submitting()
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.controller.state()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Banners are modal: errors first, then the success notice
        if self.state.has_modal() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                if self.state.has_errors() {
                    self.state.dismiss_error();
                } else {
                    self.state.dismiss_notice();
                }
            }
            return Ok(());
        }

        // Keyboard shortcuts (work from anywhere)
        let is_submit_shortcut = match key.code {
            KeyCode::Char('s') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Enter => key.modifiers.contains(SUBMIT_MODIFIER),
            _ => false,
        };
        if is_submit_shortcut {
            self.submit();
            return Ok(());
        }

        // Inputs are disabled while a submission is in flight
        if self.is_submitting() {
            return Ok(());
        }

        self.handle_form_key(key);
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Esc => self.quit = true,
            _ if self.state.form.is_actions_row_active() => self.handle_actions_key(key),
            _ => self.handle_field_key(key),
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.form.prev_button(),
            KeyCode::Down | KeyCode::Char('j') => self.state.form.next_button(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.state.form.selected_action()),
            _ => {}
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(id) = self.state.form.active_field_id() else {
            return;
        };
        let typing = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

        let form = &mut self.state.form;
        let Some(field) = form.get_active_field_mut() else {
            return;
        };

        let edited = match (id, key.code) {
            (FieldId::Services, KeyCode::Up | KeyCode::Char('k')) => {
                field.cursor_up();
                false
            }
            (FieldId::Services, KeyCode::Down | KeyCode::Char('j')) => {
                field.cursor_down();
                false
            }
            (FieldId::Services | FieldId::AcceptTerms, KeyCode::Char(' ') | KeyCode::Enter) => {
                field.toggle_current();
                true
            }
            (FieldId::Services | FieldId::AcceptTerms, _) => false,
            (_, KeyCode::Char(c)) if typing => {
                field.push_char(c);
                true
            }
            (_, KeyCode::Backspace) => {
                field.pop_char();
                true
            }
            (_, KeyCode::Enter | KeyCode::Down) => {
                form.next_field();
                false
            }
            (_, KeyCode::Up) => {
                form.prev_field();
                false
            }
            _ => false,
        };

        if edited {
            self.revalidate(id);
        }
    }

    fn activate(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => self.submit(),
            FormAction::Reset => {
                self.state.form.reset();
                self.state.field_errors = FieldErrors::default();
                self.state.status_message = Some("Form cleared".to_string());
            }
            FormAction::Quit => self.quit = true,
        }
    }

    /// Re-check a field that is already showing an error, so the message
    /// clears (or changes) as the user types
    fn revalidate(&mut self, id: FieldId) {
        if !self.state.field_errors.contains(id) {
            return;
        }
        match validate_field(id, &self.state.form.to_raw(), Self::today()) {
            Ok(()) => self.state.field_errors.remove(id),
            Err(message) => self.state.field_errors.insert(id, message),
        }
        if self.state.field_errors.is_empty() {
            self.state.status_message = Some("Ready to submit".to_string());
        }
    }

    /// Validate the form and, if it passes, start a submission in the background
    pub fn submit(&mut self) {
        if self.is_submitting() {
            tracing::debug!("Submit pressed while a submission is in flight");
            return;
        }

        let values = match validate_form(&self.state.form.to_raw(), Self::today()) {
            Ok(values) => values,
            Err(errors) => {
                if let Some(first) = errors.fields().next() {
                    self.state.form.focus(first);
                }
                self.state.status_message =
                    Some(format!("Please fix {} field(s) before submitting", errors.len()));
                self.state.field_errors = errors;
                return;
            }
        };
        self.state.field_errors = FieldErrors::default();

        match self.controller.begin(&values) {
            Ok(pending) => {
                self.state.status_message = Some("Submitting…".to_string());
                let transport = self.controller.transport();
                let results_tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = pending.send(transport).await;
                    if results_tx.send(result).is_err() {
                        tracing::debug!("Submission finished after the form closed");
                    }
                });
            }
            Err(SubmitError::AlreadySubmitting) => {}
            Err(err) => {
                self.state.status_message = Some(if err.is_configuration() {
                    "Not submitted: check the endpoint configuration".to_string()
                } else {
                    "Not submitted".to_string()
                });
                self.push_error(err.to_string());
            }
        }
    }

    /// Apply any finished submission. Called once per event-loop tick.
    pub fn poll_submission(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_submission_result(result);
        }
    }

    fn apply_submission_result(&mut self, result: SubmissionResult) {
        let state = self.controller.finish(result).clone();
        if let Some(message) = state.failure_message() {
            self.state.status_message = Some("Submission failed".to_string());
            self.push_error(message);
            return;
        }
        if let SubmissionState::Succeeded(echoed) = state {
            self.state.form.reset();
            self.state.field_errors = FieldErrors::default();
            self.state.notice = Some(success_message(&echoed));
            self.state.status_message = Some("Inquiry submitted".to_string());
        }
    }
}

/// Banner text for a successful submission, built from the echoed body
fn success_message(echoed: &Value) -> String {
    let greeting = match echoed.get("fullName").and_then(Value::as_str) {
        Some(name) => format!("Thanks, {name}! Your inquiry was received."),
        None => "Thanks! Your inquiry was received.".to_string(),
    };
    let services = echoed
        .get("services")
        .and_then(Value::as_array)
        .map(|s| {
            s.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty());

    match services {
        Some(services) => format!("{greeting}\nServices: {services}"),
        None => greeting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::submit::SubmissionPayload;
    use crate::validation::RawFormValues;

    const ENDPOINT: &str = "http://127.0.0.1:9/inquiries";

    /// Counts calls and answers with a canned response; `Ok(Value::Null)`
    /// echoes the payload back
    struct RecordingTransport {
        calls: Arc<AtomicUsize>,
        response: SubmissionResult,
    }

    #[async_trait]
    impl SubmitTransport for RecordingTransport {
        async fn post_json(
            &self,
            _endpoint: &str,
            payload: &SubmissionPayload,
        ) -> Result<Value, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(Value::Null) => Ok(serde_json::to_value(payload).unwrap()),
                other => other.clone(),
            }
        }
    }

    fn app_with(endpoint: Option<&str>, response: SubmissionResult) -> (App, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = RecordingTransport {
            calls: Arc::clone(&calls),
            response,
        };
        let app = App::new(endpoint.map(str::to_string), Arc::new(transport), None);
        (app, calls)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn start_date() -> String {
        (Local::now().date_naive() + Duration::days(7))
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Fill every field through the keyboard; `with_service` controls whether
    /// a service gets ticked
    async fn fill_form(app: &mut App, with_service: bool) {
        type_text(app, "Jane O'Brien").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "jane@example.com").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "Acme Studio").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        if with_service {
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "2500").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, &start_date()).await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
    }

    async fn wait_for_submission(app: &mut App) {
        let result = app.results_rx.recv().await.unwrap();
        app.apply_submission_result(result);
    }

    #[tokio::test]
    async fn test_keyboard_fill_produces_expected_raw_values() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, true).await;

        let raw = app.state.form.to_raw();
        assert_eq!(raw.full_name, "Jane O'Brien");
        assert_eq!(raw.services.into_iter().collect::<Vec<_>>(), vec![Service::Branding]);
        assert_eq!(raw.budget_usd, "2500");
        assert!(raw.accept_terms);
    }

    #[tokio::test]
    async fn test_successful_submission_resets_form() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, true).await;

        app.handle_key(ctrl_s()).await.unwrap();
        assert!(app.is_submitting());

        wait_for_submission(&mut app).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match app.submission_state() {
            SubmissionState::Succeeded(echo) => assert_eq!(echo["budgetUsd"], 2500),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(app.state.form.to_raw(), RawFormValues::default());
        let notice = app.state.notice.as_deref().unwrap();
        assert!(notice.contains("Jane O'Brien"));
        assert!(notice.contains("Branding"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_form_values() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Err(SubmitError::Http { status: 500 }));
        fill_form(&mut app, true).await;
        let before = app.state.form.to_raw();

        app.handle_key(ctrl_s()).await.unwrap();
        wait_for_submission(&mut app).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let message = app.submission_state().failure_message().unwrap();
        assert!(message.contains("500"));
        assert!(app.state.current_error().unwrap().contains("500"));
        assert_eq!(app.state.form.to_raw(), before);
    }

    #[tokio::test]
    async fn test_resubmit_after_failure() {
        let (mut app, calls) = app_with(
            Some(ENDPOINT),
            Err(SubmitError::Network {
                detail: "connection refused".to_string(),
            }),
        );
        fill_form(&mut app, true).await;

        app.handle_key(ctrl_s()).await.unwrap();
        wait_for_submission(&mut app).await;
        assert!(app.state.current_error().unwrap().starts_with("Network error"));

        // Dismiss the banner, then try again
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(ctrl_s()).await.unwrap();
        assert!(app.is_submitting());
        wait_for_submission(&mut app).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_endpoint_reports_configuration_error() {
        let (mut app, calls) = app_with(None, Ok(Value::Null));
        fill_form(&mut app, true).await;

        app.handle_key(ctrl_s()).await.unwrap();

        assert!(!app.is_submitting());
        assert_eq!(
            app.submission_state(),
            &SubmissionState::Failed(SubmitError::MissingEndpoint)
        );
        assert!(app.state.current_error().unwrap().contains("not configured"));
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_services_blocks_submission() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, false).await;

        app.handle_key(ctrl_s()).await.unwrap();

        assert!(!app.is_submitting());
        let message = app.state.field_errors.get(FieldId::Services).unwrap();
        assert!(!message.is_empty());
        assert_eq!(app.state.field_errors.len(), 1);
        assert_eq!(app.state.form.active_field_id(), Some(FieldId::Services));
        assert_eq!(app.submission_state(), &SubmissionState::Idle);
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Ok(json!({ "id": 7 })));
        fill_form(&mut app, true).await;

        app.handle_key(ctrl_s()).await.unwrap();
        app.handle_key(ctrl_s()).await.unwrap();
        app.submit();

        wait_for_submission(&mut app).await;
        tokio::task::yield_now().await;

        assert!(app.results_rx.try_recv().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            app.submission_state(),
            &SubmissionState::Succeeded(json!({ "id": 7 }))
        );
    }

    #[tokio::test]
    async fn test_typing_is_ignored_while_submitting() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, true).await;
        app.state.form.focus(FieldId::FullName);

        app.handle_key(ctrl_s()).await.unwrap();
        type_text(&mut app, "xyz").await;

        assert_eq!(app.state.form.full_name.as_text(), "Jane O'Brien");
        wait_for_submission(&mut app).await;
    }

    #[tokio::test]
    async fn test_field_error_clears_as_user_types() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));

        app.submit();
        assert!(app.state.field_errors.contains(FieldId::FullName));
        assert_eq!(app.state.form.active_field_id(), Some(FieldId::FullName));

        type_text(&mut app, "J").await;
        assert!(app
            .state
            .field_errors
            .get(FieldId::FullName)
            .unwrap()
            .contains("at least 2"));

        type_text(&mut app, "o").await;
        assert!(!app.state.field_errors.contains(FieldId::FullName));
        // Untouched fields keep their errors
        assert!(app.state.field_errors.contains(FieldId::Email));
    }

    #[tokio::test]
    async fn test_fixing_last_error_marks_form_ready() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, false).await;

        app.submit();
        assert_eq!(app.state.form.active_field_id(), Some(FieldId::Services));
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Please fix 1 field(s) before submitting")
        );

        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        assert!(app.state.field_errors.is_empty());
        assert_eq!(app.state.status_message.as_deref(), Some("Ready to submit"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_untouched_field_is_not_validated_early() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        type_text(&mut app, "J").await;
        assert!(app.state.field_errors.is_empty());
    }

    #[tokio::test]
    async fn test_reset_action_clears_form() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, true).await;

        app.handle_key(key(KeyCode::Tab)).await.unwrap(); // actions row
        assert!(app.state.form.is_actions_row_active());
        app.handle_key(key(KeyCode::Down)).await.unwrap(); // Reset
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.form.to_raw(), RawFormValues::default());
    }

    #[tokio::test]
    async fn test_submit_button_submits() {
        let (mut app, calls) = app_with(Some(ENDPOINT), Ok(Value::Null));
        fill_form(&mut app, true).await;

        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        wait_for_submission(&mut app).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_banner_is_modal() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        app.push_error("boom");

        type_text(&mut app, "abc").await;
        assert_eq!(app.state.form.full_name.as_text(), "");

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(!app.state.has_errors());
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_escape_quits() {
        let (mut app, _) = app_with(Some(ENDPOINT), Ok(Value::Null));
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_prefill_selects_service() {
        let transport = RecordingTransport {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Ok(Value::Null),
        };
        let app = App::new(None, Arc::new(transport), Some(Service::MobileApp));
        assert!(app
            .state
            .form
            .to_raw()
            .services
            .contains(&Service::MobileApp));
    }

    #[test]
    fn test_success_message_without_name() {
        assert_eq!(
            success_message(&json!({ "ok": true })),
            "Thanks! Your inquiry was received."
        );
        assert_eq!(
            success_message(&json!({ "fullName": "Ada", "services": ["UI/UX", "Web Dev"] })),
            "Thanks, Ada! Your inquiry was received.\nServices: UI/UX, Web Dev"
        );
    }
}
