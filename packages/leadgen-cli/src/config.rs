use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::SecretString;
use std::env;

use leadgen_client::DEFAULT_APP_ID;

/// Token sent when no API token is configured.
pub const ANONYMOUS_TOKEN: &str = "anonymous";

/// CLI configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    /// Base URL of the lead-generation service; only needed to submit
    pub api_url: Option<String>,
    pub app_id: String,
    pub api_token: SecretString,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("LEADGEN_API_URL"),
            app_id: non_empty("LEADGEN_APP_ID").unwrap_or_else(|| DEFAULT_APP_ID.to_string()),
            api_token: SecretString::from(
                non_empty("LEADGEN_API_TOKEN").unwrap_or_else(|| ANONYMOUS_TOKEN.to_string()),
            ),
        }
    }

    /// API base URL, with a command-line override taking precedence.
    pub fn api_url(&self, cli_override: Option<&str>) -> Result<String> {
        cli_override
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .context("LEADGEN_API_URL must be set (or pass --api-url)")
    }
}
