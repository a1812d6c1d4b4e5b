//! Runtime configuration for the provider client.
//!
//! Values come from built-in defaults, then environment overrides, then
//! whatever the embedding application (the CLI) sets explicitly.

use crate::ConfigError;

/// Key embedded for the provider's public demo tier.
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

pub const API_KEY_ENV: &str = "STOCKWIDGETS_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_ENV: &str = "STOCKWIDGETS_ALPHAVANTAGE_BASE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "STOCKWIDGETS_REQUEST_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub api_key: String,
    pub base_url: String,
    /// Upper bound for one lookup; a hung request ends in an error state after this.
    pub request_timeout_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_key: String::from(DEFAULT_API_KEY),
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_key) = lookup(API_KEY_ENV) {
            config.api_key = non_empty(API_KEY_ENV, api_key)?;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.base_url = non_empty(BASE_URL_ENV, base_url)?;
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            config.request_timeout_ms = parse_timeout(REQUEST_TIMEOUT_ENV, &raw)?;
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyValue { name });
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidTimeout {
            name,
            value: raw.to_owned(),
        }),
    }
}
