use crate::{credentials::CredentialPair, identity::Identity};

use serde::Deserialize;

/// Body returned by login and OTP verification.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: Identity,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn credentials(&self) -> CredentialPair {
        CredentialPair::new(self.access.clone(), self.refresh.clone())
    }
}

/// Body returned by the token refresh endpoint. The refresh token is only
/// present when the server rotates it.
#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
