//! Submission lifecycle
//!
//! `Idle --submit--> Submitting --ok--> Succeeded`, `Submitting --err--> Failed`,
//! and `Succeeded | Failed --submit--> Submitting` for a fresh attempt.

use super::error::SubmitError;
use super::payload::SubmissionPayload;
use super::traits::SubmitTransport;
use crate::validation::FormValues;
use serde_json::Value;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

/// Where the current (or last) submission attempt stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    /// Holds the body echoed by the endpoint
    Succeeded(Value),
    Failed(SubmitError),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// User-facing failure message, if the last attempt failed
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Submitting => "Submitting…",
            Self::Succeeded(_) => "Submitted",
            Self::Failed(_) => "Failed",
        }
    }
}

/// An accepted attempt, ready to be sent
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub attempt_id: Uuid,
    pub endpoint: String,
    pub payload: SubmissionPayload,
}

impl PendingSubmission {
    /// Perform the network call. Does not touch controller state.
    pub async fn send(self, transport: Arc<dyn SubmitTransport>) -> Result<Value, SubmitError> {
        tracing::info!(attempt = %self.attempt_id, endpoint = %self.endpoint, "Sending submission");
        let result = transport.post_json(&self.endpoint, &self.payload).await;
        match &result {
            Ok(_) => tracing::info!(attempt = %self.attempt_id, "Submission accepted"),
            Err(e) => tracing::warn!(attempt = %self.attempt_id, "Submission failed: {e}"),
        }
        result
    }
}

/// Drives one submission at a time against the configured endpoint
pub struct SubmissionController {
    endpoint: Option<String>,
    transport: Arc<dyn SubmitTransport>,
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new(endpoint: Option<String>, transport: Arc<dyn SubmitTransport>) -> Self {
        Self {
            endpoint,
            transport,
            state: SubmissionState::default(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn transport(&self) -> Arc<dyn SubmitTransport> {
        Arc::clone(&self.transport)
    }

    /// Start an attempt.
    ///
    /// Rejected with [`SubmitError::AlreadySubmitting`] while one is in
    /// flight (state untouched). A missing or malformed endpoint moves the
    /// state straight to `Failed` without any network call.
    pub fn begin(&mut self, values: &FormValues) -> Result<PendingSubmission, SubmitError> {
        if self.is_submitting() {
            tracing::debug!("Ignoring submit while a submission is in flight");
            return Err(SubmitError::AlreadySubmitting);
        }

        let endpoint = match self.checked_endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => {
                tracing::error!("Cannot submit: {err}");
                self.state = SubmissionState::Failed(err.clone());
                return Err(err);
            }
        };

        self.state = SubmissionState::Submitting;
        Ok(PendingSubmission {
            attempt_id: Uuid::new_v4(),
            endpoint,
            payload: SubmissionPayload::from(values),
        })
    }

    /// Apply the outcome of the in-flight attempt
    pub fn finish(&mut self, result: Result<Value, SubmitError>) -> &SubmissionState {
        if !self.is_submitting() {
            tracing::warn!("Discarding submission result with no attempt in flight");
            return &self.state;
        }
        self.state = match result {
            Ok(echoed) => SubmissionState::Succeeded(echoed),
            Err(err) => SubmissionState::Failed(err),
        };
        &self.state
    }

    /// Begin, send and finish in one go
    #[allow(dead_code)]
    pub async fn submit(&mut self, values: &FormValues) -> &SubmissionState {
        match self.begin(values) {
            Ok(pending) => {
                let result = pending.send(self.transport()).await;
                self.finish(result)
            }
            Err(_) => &self.state,
        }
    }

    fn checked_endpoint(&self) -> Result<String, SubmitError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(SubmitError::MissingEndpoint)?;

        match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url.to_string()),
            _ => Err(SubmitError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            }),
        }
    }
}
