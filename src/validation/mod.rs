//! Validation schema for the intake form
//!
//! - `values`: raw and accepted form records, plus the fixed service list
//! - `rules`: one parse-and-validate function per field
//! - `schema`: field identifiers, the field-to-validator mapping and
//!   whole-form validation that collects every error

mod rules;
mod schema;
mod values;

pub use schema::{validate_field, validate_form, FieldErrors, FieldId};
pub use values::{FormValues, RawFormValues, Service};
