//! Trait abstraction for the outbound call to enable mocking in tests

use super::error::SubmitError;
use super::payload::SubmissionPayload;
use async_trait::async_trait;
use serde_json::Value;

/// Sends one submission to an endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// POST `payload` as JSON to `endpoint`.
    ///
    /// Returns the echoed body on a 2xx response, [`SubmitError::Http`] for
    /// any other status and [`SubmitError::Network`] for transport faults.
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Value, SubmitError>;
}
