use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result};
use nonzero_ext::nonzero;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";
const DEFAULT_RATE_PER_MINUTE: NonZeroU32 = nonzero!(10u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Missing key is allowed: the consultant then answers with its offline reply.
    pub gemini_api_key: Option<String>,
    pub llm_endpoint: String,
    pub llm_model: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub consultant_rate_per_minute: NonZeroU32,
    pub development: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let consultant_rate_per_minute = match get("CONSULTANT_RATE_PER_MINUTE") {
            Some(raw) => raw
                .parse::<NonZeroU32>()
                .with_context(|| format!("CONSULTANT_RATE_PER_MINUTE must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_RATE_PER_MINUTE,
        };

        Ok(Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            llm_endpoint: get("LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_LLM_ENDPOINT.to_string()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            port,
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
            consultant_rate_per_minute,
            // for dev its 'development' and for prod anything else
            development: get("ENVIRONMENT").as_deref() == Some("development"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.gemini_api_key, None);
        assert_eq!(s.llm_endpoint, DEFAULT_LLM_ENDPOINT);
        assert_eq!(s.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(s.port, 3001);
        assert_eq!(s.static_dir, PathBuf::from("../frontend/dist"));
        assert_eq!(s.consultant_rate_per_minute.get(), 10);
        assert!(!s.development);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let s = settings(&[("GEMINI_API_KEY", "   "), ("ENVIRONMENT", "development")]).unwrap();
        assert_eq!(s.gemini_api_key, None);
        assert!(s.development);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(settings(&[("PORT", "eighty")]).is_err());
        assert!(settings(&[("CONSULTANT_RATE_PER_MINUTE", "0")]).is_err());
        let s = settings(&[("PORT", "8080"), ("CONSULTANT_RATE_PER_MINUTE", "3")]).unwrap();
        assert_eq!(s.port, 8080);
        assert_eq!(s.consultant_rate_per_minute.get(), 3);
    }
}
