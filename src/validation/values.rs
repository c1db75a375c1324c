//! Form records and the fixed service option list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Services a client can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Branding")]
    Branding,
    #[serde(rename = "Web Dev")]
    WebDev,
    #[serde(rename = "Mobile App")]
    MobileApp,
}

impl Service {
    /// Every option, in display order
    pub const ALL: [Service; 4] = [
        Service::UiUx,
        Service::Branding,
        Service::WebDev,
        Service::MobileApp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UiUx => "UI/UX",
            Self::Branding => "Branding",
            Self::WebDev => "Web Dev",
            Self::MobileApp => "Mobile App",
        }
    }

    /// Look up a service by its exact label (surrounding whitespace ignored)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form input exactly as entered, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFormValues {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: BTreeSet<Service>,
    /// Empty means "no budget given"
    pub budget_usd: String,
    /// Expected as `YYYY-MM-DD`
    pub project_start_date: String,
    pub accept_terms: bool,
}

/// A form record that passed every field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<Service>,
    pub budget_usd: Option<u32>,
    pub project_start_date: NaiveDate,
    pub accept_terms: bool,
}
