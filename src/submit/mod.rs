//! Submission of validated form values to the configured endpoint

mod client;
mod controller;
mod error;
mod payload;
mod traits;

pub use client::HttpTransport;
pub use controller::{SubmissionController, SubmissionState};
pub use error::SubmitError;
pub use traits::SubmitTransport;

#[cfg(test)]
pub use payload::SubmissionPayload;
#[cfg(test)]
pub use traits::MockSubmitTransport;
