// src/core/config.rs

use crate::core::error::AnalysisError;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked, in order, for the service credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "VERITAS_MODEL";

/// Settings for the Gemini analysis client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl AnalyzerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (var, api_key) = API_KEY_VARS
            .iter()
            .find_map(|name| non_blank(*name).map(|v| (*name, v)))
            .ok_or_else(|| {
                AnalysisError::Config(format!(
                    "no API key found, set {} in the environment",
                    API_KEY_VARS[0]
                ))
            })?;
        debug!(source = var, "API key loaded.");

        let mut config = Self::new(api_key);
        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model;
        }
        info!(model = %config.model, "Analyzer configured.");
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = AnalyzerConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = AnalyzerConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn gemini_key_takes_precedence_over_generic_key() {
        let config = AnalyzerConfig::from_lookup(lookup_from(&[
            ("API_KEY", "generic"),
            ("GEMINI_API_KEY", "specific"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "specific");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn generic_key_and_model_override() {
        let config = AnalyzerConfig::from_lookup(lookup_from(&[
            ("API_KEY", "generic"),
            ("VERITAS_MODEL", "gemini-2.5-flash"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "generic");
        assert_eq!(config.model, "gemini-2.5-flash");
    }
}
