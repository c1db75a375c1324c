//! Configuration handling for the intake form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "INTAKE_ENDPOINT";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User configuration for the intake form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// URL the form is posted to
    pub endpoint: Option<String>,
    /// Seconds before a submission gives up
    pub request_timeout_secs: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "intake", "project-intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Apply `INTAKE_ENDPOINT` on top of the file value
    pub fn with_env(self) -> Self {
        self.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok())
    }

    /// Replace the endpoint when `endpoint` holds a non-blank value
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = non_blank(endpoint) {
            self.endpoint = Some(endpoint);
        }
        self
    }

    /// The endpoint to submit to; blank values count as unset
    pub fn endpoint(&self) -> Option<String> {
        non_blank(self.endpoint.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
