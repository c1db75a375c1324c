//! Per-field parse-and-validate functions
//!
//! Each rule takes the raw input for one field and either returns the
//! accepted, typed value or a message suitable for showing next to the field.

use super::values::Service;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const FULL_NAME_MIN: usize = 2;
const FULL_NAME_MAX: usize = 80;
const COMPANY_NAME_MIN: usize = 2;
const COMPANY_NAME_MAX: usize = 100;

pub const BUDGET_MIN_USD: u32 = 100;
pub const BUDGET_MAX_USD: u32 = 1_000_000;

const DATE_FORMAT: &str = "%Y-%m-%d";

static FULL_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M} '-]+$").expect("full name pattern is valid"));

// Dot-separated local part; domain labels are alphanumeric with inner hyphens
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[^\s@.]+(\.[^\s@.]+)*@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

fn check_length(value: &str, label: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        Err(format!("{label} must be at least {min} characters"))
    } else if len > max {
        Err(format!("{label} must be at most {max} characters"))
    } else {
        Ok(())
    }
}

/// Letters, spaces, hyphens and apostrophes; 2 to 80 characters after trimming
pub fn validate_full_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    check_length(name, "Full name", FULL_NAME_MIN, FULL_NAME_MAX)?;
    if !FULL_NAME_PATTERN.is_match(name) {
        return Err(
            "Full name may only contain letters, spaces, hyphens and apostrophes".to_string(),
        );
    }
    Ok(name.to_string())
}

pub fn validate_email(raw: &str) -> Result<String, String> {
    let email = raw.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err("Enter a valid email address".to_string());
    }
    Ok(email.to_string())
}

pub fn validate_company_name(raw: &str) -> Result<String, String> {
    let company = raw.trim();
    check_length(company, "Company name", COMPANY_NAME_MIN, COMPANY_NAME_MAX)?;
    Ok(company.to_string())
}

/// At least one service must be selected. Returned in display order.
pub fn validate_services(selected: &BTreeSet<Service>) -> Result<Vec<Service>, String> {
    if selected.is_empty() {
        return Err("Select at least one service".to_string());
    }
    Ok(selected.iter().copied().collect())
}

/// Empty input means no budget and skips the range check entirely.
pub fn parse_budget(raw: &str) -> Result<Option<u32>, String> {
    let budget = raw.trim();
    if budget.is_empty() {
        return Ok(None);
    }

    let amount: i64 = budget
        .parse()
        .map_err(|_| "Budget must be a whole number of dollars".to_string())?;

    match u32::try_from(amount) {
        Ok(amount) if (BUDGET_MIN_USD..=BUDGET_MAX_USD).contains(&amount) => Ok(Some(amount)),
        _ => Err("Budget must be between $100 and $1,000,000".to_string()),
    }
}

/// `YYYY-MM-DD`, no earlier than `today`
pub fn parse_start_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("Project start date is required".to_string());
    }

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| "Enter the start date as YYYY-MM-DD".to_string())?;

    if date < today {
        return Err("Project start date cannot be in the past".to_string());
    }
    Ok(date)
}

pub fn validate_accept_terms(accepted: bool) -> Result<bool, String> {
    if accepted {
        Ok(true)
    } else {
        Err("You must accept the terms to continue".to_string())
    }
}
