use crate::{ConfigError, ConfigErrorResult, DEFAULT_REVOKE_ON_LOGOUT, DEFAULT_TOKEN_FILE};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token file name, relative to the config directory
    pub token_file: String,
    /// Blacklist the refresh token server-side on logout (best effort)
    pub revoke_on_logout: bool,
    /// Token refresh endpoint, relative to api.base_url. Unset disables refresh.
    pub refresh_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: String::from(DEFAULT_TOKEN_FILE),
            revoke_on_logout: DEFAULT_REVOKE_ON_LOGOUT,
            refresh_path: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.token_file.trim().is_empty() {
            return Err(ConfigError::session("session.token_file cannot be empty"));
        }

        if Path::new(&self.token_file).is_absolute() || self.token_file.contains("..") {
            return Err(ConfigError::session(
                "session.token_file must be relative and cannot contain '..'",
            ));
        }

        if let Some(ref path) = self.refresh_path
            && !path.starts_with('/')
        {
            return Err(ConfigError::session(format!(
                "session.refresh_path must start with '/', got '{path}'"
            )));
        }

        Ok(())
    }
}
