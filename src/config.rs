//! Runtime configuration from the environment.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the hosted completion service.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// No key means recommendations are disabled
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Area named in prompts and page headings
    pub region_name: String,
    pub map_center: (f64, f64),
    pub ai: AiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            region_name: "Pimpri-Chinchwad, India".to_string(),
            map_center: (18.6298, 73.7997),
            ai: AiConfig {
                api_key: None,
                model: "gemini-2.0-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout: Duration::from_secs(30),
                cache_ttl: Duration::from_secs(3600),
            },
        }
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, expected, value })
}

impl Config {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(region) = lookup("REGION_NAME") {
            config.region_name = region;
        }
        if let Some(lat) = lookup("MAP_CENTER_LAT") {
            config.map_center.0 = parse("MAP_CENTER_LAT", "latitude", lat)?;
        }
        if let Some(lng) = lookup("MAP_CENTER_LNG") {
            config.map_center.1 = parse("MAP_CENTER_LNG", "longitude", lng)?;
        }

        config.ai.api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.ai.model = model;
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            config.ai.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("AI_TIMEOUT_SECS") {
            config.ai.timeout = Duration::from_secs(parse("AI_TIMEOUT_SECS", "number of seconds", secs)?);
        }
        if let Some(secs) = lookup("RECOMMENDATION_CACHE_TTL_SECS") {
            config.ai.cache_ttl = Duration::from_secs(parse(
                "RECOMMENDATION_CACHE_TTL_SECS",
                "number of seconds",
                secs,
            )?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_BASE_URL", "http://localhost:9000/"),
            ("AI_TIMEOUT_SECS", "5"),
            ("MAP_CENTER_LAT", "19.0"),
        ]))
        .unwrap();

        assert_eq!(config.ai.api_key.as_deref(), Some("secret"));
        assert_eq!(config.ai.base_url, "http://localhost:9000");
        assert_eq!(config.ai.timeout, Duration::from_secs(5));
        assert_eq!(config.map_center, (19.0, 73.7997));
    }

    #[test]
    fn test_blank_api_key_disables_ai() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup(&[("AI_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("AI_TIMEOUT_SECS"));
    }
}
