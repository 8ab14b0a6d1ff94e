//! Process configuration
//!
//! Read once at startup and handed to the components explicitly.

use crate::error::AgentError;
use crate::Result;
use std::collections::HashMap;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_QURAN_API_BASE_URL: &str = "http://api.alquran.cloud/v1";
pub const DEFAULT_QURAN_EDITION: &str = "en.sahih";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub quran_api_base_url: String,
    pub quran_edition: String,
    pub port: u16,
}

impl AgentConfig {
    /// Build the config from the process environment.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build the config from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let gemini_api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            AgentError::Config(
                "GEMINI_API_KEY environment variable not set. Set it in your .env file or environment."
                    .to_string(),
            )
        })?;

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AgentError::Config(format!("Invalid port '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            quran_api_base_url: get("QURAN_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_QURAN_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            quran_edition: get("QURAN_EDITION").unwrap_or_else(|| DEFAULT_QURAN_EDITION.to_string()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_api_key() {
        let result = AgentConfig::from_vars(&vars(&[("PORT", "8080")]));
        assert!(matches!(result, Err(AgentError::Config(_))));

        let result = AgentConfig::from_vars(&vars(&[("GEMINI_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_vars(&vars(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(config.gemini_api_key, "abc");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.quran_api_base_url, DEFAULT_QURAN_API_BASE_URL);
        assert_eq!(config.quran_edition, "en.sahih");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::from_vars(&vars(&[
            ("GEMINI_API_KEY", "abc"),
            ("API_PORT", "9000"),
            ("QURAN_API_BASE_URL", "http://localhost:1234/v1/"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.quran_api_base_url, "http://localhost:1234/v1");

        let bad = AgentConfig::from_vars(&vars(&[("GEMINI_API_KEY", "abc"), ("PORT", "eighty")]));
        assert!(bad.is_err());
    }
}
