//! Submission error taxonomy

use thiserror::Error;

/// Why a submission attempt did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No endpoint configured; raised before any network attempt
    #[error("Submission endpoint is not configured (set INTAKE_ENDPOINT or \"endpoint\" in the config file)")]
    MissingEndpoint,

    /// Endpoint configured but not a usable URL; raised before any network attempt
    #[error("Submission endpoint {endpoint:?} is not a valid URL")]
    InvalidEndpoint { endpoint: String },

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// The endpoint answered with a non-2xx status
    #[error("Submission failed with HTTP status {status}")]
    Http { status: u16 },

    /// DNS, timeout, refused connection and similar. `detail` is for logs only.
    #[error("Network error: could not reach the submission service. Please try again.")]
    Network { detail: String },
}

impl SubmitError {
    /// Configuration problems are not worth resubmitting until the config changes
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingEndpoint | Self::InvalidEndpoint { .. })
    }
}
