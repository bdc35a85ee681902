//! Configuration handling for the TUI

use crate::sink::{LocalSink, DEFAULT_RESERVED_USER_NAMES};
use crate::state::ValidationPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment override for the terms checkbox policy
const REQUIRE_TERMS_ENV: &str = "SIGNUP_TUI_REQUIRE_TERMS";

/// Default tracing filter when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "signup_tui=info";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignupConfig {
    /// Gate submission on the terms checkbox
    pub require_terms_agreement: Option<bool>,
    /// User names the sink refuses
    pub reserved_user_names: Option<Vec<String>>,
    /// Whether the sink accepts registrations at all
    pub registrations_open: Option<bool>,
    /// Tracing filter directive
    pub log_filter: Option<String>,
    /// Start with both password fields revealed
    pub show_passwords: Option<bool>,
}

impl SignupConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "codetikki", "signup-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        let mut config = match path {
            Some(path) if path.exists() => Self::read_file(&path)?,
            _ => Self::default(),
        };

        if let Ok(value) = std::env::var(REQUIRE_TERMS_ENV) {
            config.require_terms_agreement = Some(parse_flag(&value));
        }

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            require_terms_agreement: self.require_terms_agreement.unwrap_or(false),
        }
    }

    pub fn sink(&self) -> LocalSink {
        let reserved = self.reserved_user_names.clone().unwrap_or_else(|| {
            DEFAULT_RESERVED_USER_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        LocalSink::new(reserved, self.registrations_open.unwrap_or(true))
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
