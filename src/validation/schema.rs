//! Field identifiers and whole-form validation

use super::rules;
use super::values::{FormValues, RawFormValues};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identifies one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    FullName,
    Email,
    CompanyName,
    Services,
    BudgetUsd,
    ProjectStartDate,
    AcceptTerms,
}

impl FieldId {
    /// Every field, in form order
    pub const ALL: [FieldId; 7] = [
        FieldId::FullName,
        FieldId::Email,
        FieldId::CompanyName,
        FieldId::Services,
        FieldId::BudgetUsd,
        FieldId::ProjectStartDate,
        FieldId::AcceptTerms,
    ];

    /// Name used in the JSON request body
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::CompanyName => "companyName",
            Self::Services => "services",
            Self::BudgetUsd => "budgetUsd",
            Self::ProjectStartDate => "projectStartDate",
            Self::AcceptTerms => "acceptTerms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::CompanyName => "Company",
            Self::Services => "Services",
            Self::BudgetUsd => "Budget (USD, optional)",
            Self::ProjectStartDate => "Start date (YYYY-MM-DD)",
            Self::AcceptTerms => "Terms",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Field-level validation failures, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<FieldId, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldId) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    /// Record the error of `result` against `field` and hand back the value, if any
    fn capture<T>(&mut self, field: FieldId, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.insert(field, message);
                None
            }
        }
    }
}

/// Validator signature shared by every field
pub type FieldValidator = fn(&RawFormValues, NaiveDate) -> Result<(), String>;

fn check_full_name(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::validate_full_name(&raw.full_name).map(drop)
}

fn check_email(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::validate_email(&raw.email).map(drop)
}

fn check_company_name(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::validate_company_name(&raw.company_name).map(drop)
}

fn check_services(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::validate_services(&raw.services).map(drop)
}

fn check_budget(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::parse_budget(&raw.budget_usd).map(drop)
}

fn check_start_date(raw: &RawFormValues, today: NaiveDate) -> Result<(), String> {
    rules::parse_start_date(&raw.project_start_date, today).map(drop)
}

fn check_accept_terms(raw: &RawFormValues, _today: NaiveDate) -> Result<(), String> {
    rules::validate_accept_terms(raw.accept_terms).map(drop)
}

/// The validator attached to `field`
pub fn validator_for(field: FieldId) -> FieldValidator {
    match field {
        FieldId::FullName => check_full_name,
        FieldId::Email => check_email,
        FieldId::CompanyName => check_company_name,
        FieldId::Services => check_services,
        FieldId::BudgetUsd => check_budget,
        FieldId::ProjectStartDate => check_start_date,
        FieldId::AcceptTerms => check_accept_terms,
    }
}

/// Run a single field's rule, e.g. after the user edits that field
pub fn validate_field(field: FieldId, raw: &RawFormValues, today: NaiveDate) -> Result<(), String> {
    validator_for(field)(raw, today)
}

/// Run every rule and collect all failures.
///
/// On success the returned record carries trimmed strings, the parsed
/// budget and start date.
pub fn validate_form(raw: &RawFormValues, today: NaiveDate) -> Result<FormValues, FieldErrors> {
    let mut errors = FieldErrors::default();

    let full_name = errors.capture(FieldId::FullName, rules::validate_full_name(&raw.full_name));
    let email = errors.capture(FieldId::Email, rules::validate_email(&raw.email));
    let company_name = errors.capture(
        FieldId::CompanyName,
        rules::validate_company_name(&raw.company_name),
    );
    let services = errors.capture(FieldId::Services, rules::validate_services(&raw.services));
    let budget_usd = errors.capture(FieldId::BudgetUsd, rules::parse_budget(&raw.budget_usd));
    let project_start_date = errors.capture(
        FieldId::ProjectStartDate,
        rules::parse_start_date(&raw.project_start_date, today),
    );
    let accept_terms = errors.capture(
        FieldId::AcceptTerms,
        rules::validate_accept_terms(raw.accept_terms),
    );

    let (
        Some(full_name),
        Some(email),
        Some(company_name),
        Some(services),
        Some(budget_usd),
        Some(project_start_date),
        Some(accept_terms),
    ) = (
        full_name,
        email,
        company_name,
        services,
        budget_usd,
        project_start_date,
        accept_terms,
    )
    else {
        tracing::debug!(failed = errors.len(), "form validation failed");
        return Err(errors);
    };

    Ok(FormValues {
        full_name,
        email,
        company_name,
        services,
        budget_usd,
        project_start_date,
        accept_terms,
    })
}
