//! JSON request body

use crate::validation::{FormValues, Service};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body posted to the endpoint. The start date serializes as `YYYY-MM-DD`
/// and an absent budget is left out entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_usd: Option<u32>,
    pub project_start_date: NaiveDate,
    pub accept_terms: bool,
}

impl From<&FormValues> for SubmissionPayload {
    fn from(values: &FormValues) -> Self {
        Self {
            full_name: values.full_name.clone(),
            email: values.email.clone(),
            company_name: values.company_name.clone(),
            services: values.services.clone(),
            budget_usd: values.budget_usd,
            project_start_date: values.project_start_date,
            accept_terms: values.accept_terms,
        }
    }
}
