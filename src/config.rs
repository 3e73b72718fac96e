use chrono::{Offset, Utc};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_URL: &str = "VEHICLE_CLASSIFIER_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "VEHICLE_CLASSIFIER_TIMEOUT_SECS";
pub const ENV_PREVIEW_DIR: &str = "VEHICLE_CLASSIFIER_PREVIEW_DIR";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: String },
    #[error("{name} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { name: String, value: String },
    #[error("{name} must start with http:// or https://, got {value:?}")]
    InvalidUrl { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    pub preview_dir: PathBuf,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:7860".to_string(),
            // The classifier can take a while to wake up from a cold start.
            request_timeout: Duration::from_secs(60),
            preview_dir: std::env::temp_dir().join("vehicle-classifier-previews"),
            logger_timezone: Utc.fix(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(ENV_API_URL) {
            config = config.with_api_url(&value)?;
        }

        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = parse_timeout(ENV_TIMEOUT_SECS, &value)?;
        }

        if let Some(value) = lookup(ENV_PREVIEW_DIR) {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty {
                    name: ENV_PREVIEW_DIR.to_string(),
                });
            }
            config.preview_dir = PathBuf::from(value);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Empty {
                name: ENV_API_URL.to_string(),
            });
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name: ENV_API_URL.to_string(),
                value: value.to_string(),
            });
        }
        self.api_url = trimmed.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn predict_endpoint(&self) -> String {
        format!("{}/predict", self.api_url.trim_end_matches('/'))
    }
}

pub fn parse_timeout(name: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            name: name.to_string(),
            value: value.to_string(),
        }),
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:7860");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.predict_endpoint(), "http://127.0.0.1:7860/predict");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_API_URL, "https://classifier.example.com/"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_PREVIEW_DIR, "/tmp/previews"),
        ]))
        .unwrap();

        assert_eq!(
            config.predict_endpoint(),
            "https://classifier.example.com/predict"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.preview_dir, PathBuf::from("/tmp/previews"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_API_URL, "classifier.local")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_API_URL, "  ")])),
            Err(ConfigError::Empty { .. })
        ));
    }
}
