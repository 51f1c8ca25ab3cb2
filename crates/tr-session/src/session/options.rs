use tr_config::SessionConfig;

/// Optional session behaviours, all off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Blacklist the refresh token server-side on logout (best effort)
    pub revoke_on_logout: bool,
    /// Token refresh endpoint; `None` disables refresh
    pub refresh_path: Option<String>,
}

impl From<&SessionConfig> for SessionOptions {
    fn from(config: &SessionConfig) -> Self {
        Self {
            revoke_on_logout: config.revoke_on_logout,
            refresh_path: config.refresh_path.clone(),
        }
    }
}
