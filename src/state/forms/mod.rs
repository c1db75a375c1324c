//! Form domain layer
//!
//! This module provides type-safe form handling for the intake form.

mod field;
mod form_state;

pub use field::{FieldValue, FormField};
pub use form_state::{Form, FormAction, IntakeForm};
