use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, MAX_REQUEST_TIMEOUT_SECS, MIN_REQUEST_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Where the remote TailoRent API lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. "https://tailorent.example/api". Endpoint paths are appended.
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or_else(|| {
                ConfigError::api(format!(
                    "api.base_url must start with http:// or https://, got '{}'",
                    self.base_url
                ))
            })?;

        if rest.trim_matches('/').is_empty() {
            return Err(ConfigError::api("api.base_url has no host"));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::api(format!(
                "api.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::api("api.user_agent cannot be empty"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
