//! Server and AI provider settings read from environment variables.
//!
//! Every setting has a default except the provider API key. Without a key the
//! server still starts; the AI endpoints then answer with a provider error so
//! clients fall back to manual entry.

use crate::config::database;
use crate::errors::{Error, Result};
use std::net::SocketAddr;
use tracing::info;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
/// Default OpenAI-compatible endpoint.
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default vision-capable model.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";
/// Default request body limit, sized for base64-encoded phone photos.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Settings for the external vision-language model.
#[derive(Debug, Clone)]
pub struct AiSettings {
    /// Base URL of the OpenAI-compatible API, without a trailing slash
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token; None disables estimation
    pub api_key: Option<String>,
}

/// Top-level application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,
    /// Socket address the HTTP server binds to
    pub bind_address: SocketAddr,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
    /// AI provider settings
    pub ai: AiSettings,
}

impl AppConfig {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `BIND_ADDRESS` or `MAX_BODY_BYTES` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| database::DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_raw.parse().map_err(|e| Error::Config {
            message: format!("Invalid BIND_ADDRESS '{bind_raw}': {e}"),
        })?;

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw.parse().map_err(|e| Error::Config {
                message: format!("Invalid MAX_BODY_BYTES '{raw}': {e}"),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            info!("OPENAI_API_KEY not set, AI nutrition estimates are disabled");
        }

        let ai = AiSettings {
            base_url: lookup("AI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: lookup("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            api_key,
        };

        Ok(Self {
            database_url,
            bind_address,
            max_body_bytes,
            ai,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, database::DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.ai.base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.ai.model, DEFAULT_AI_MODEL);
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDRESS", "0.0.0.0:8080"),
            ("MAX_BODY_BYTES", "1024"),
            ("AI_BASE_URL", "http://localhost:11434/v1/"),
            ("AI_MODEL", "llava"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.max_body_bytes, 1024);
        assert_eq!(config.ai.base_url, "http://localhost:11434/v1");
        assert_eq!(config.ai.model, "llava");
        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_blank_api_key_disables_ai() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_invalid_bind_address() {
        let result = AppConfig::from_lookup(lookup_from(&[("BIND_ADDRESS", "not-an-address")]));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_invalid_body_limit() {
        let result = AppConfig::from_lookup(lookup_from(&[("MAX_BODY_BYTES", "lots")]));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
