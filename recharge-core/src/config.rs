//! Client configuration: API base URL and operator choices.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_OPERATOR, OPERATORS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the remote API, without a trailing slash.
    pub api_base_url: String,
    pub operators: Vec<String>,
    pub default_operator: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            operators: OPERATORS.iter().map(ToString::to_string).collect(),
            default_operator: DEFAULT_OPERATOR.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build the default config, honouring a `RECHARGE_API_URL` set at compile time.
    #[must_use]
    pub fn default_config() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("RECHARGE_API_URL") {
            config = config.with_base_url(url);
        }
        config
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        let base = config.api_base_url.clone();
        Ok(config.with_base_url(&base))
    }

    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Absolute URL for an API path such as `/api/plans`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig::default().with_base_url("https://api.example.com/");
        assert_eq!(
            config.endpoint("/api/plans"),
            "https://api.example.com/api/plans"
        );
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = ClientConfig::from_json(r#"{"api_base_url":"http://10.0.0.2:5000/"}"#)
            .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000");
        assert_eq!(config.default_operator, "Airtel");
        assert_eq!(config.operators.len(), 4);
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let config = ClientConfig::from_json(r#"{"api_base_url":"  "}"#).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert!(ClientConfig::from_json("{oops").is_err());
    }
}
