use crate::{
    api::{
        ApiClient, ClientResult,
        requests::{ChangePasswordRequest, ProfileUpdate, RegisterRequest},
        responses::AuthResponse,
    },
    credentials::{ACCESS_TOKEN_KEY, CredentialPair, REFRESH_TOKEN_KEY, bearer},
    identity::Identity,
    notification::{Notification, Notifier},
    session::{
        error::{Result as SessionResult, SessionError},
        options::SessionOptions,
        state::SessionState,
    },
    store::{FileTokenStore, TokenStore},
};

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use tokio::sync::{Mutex, watch};
use tr_config::Config;

const MSG_LOGIN_OK: &str = "Login successful!";
const MSG_LOGIN_FAILED: &str = "Login failed";
const MSG_OTP_SENT: &str = "OTP sent to your phone number";
const MSG_OTP_SEND_FAILED: &str = "Failed to send OTP";
const MSG_OTP_VERIFIED: &str = "OTP verified successfully!";
const MSG_OTP_INVALID: &str = "Invalid OTP";
const MSG_REGISTERED: &str = "Registration successful! Please check your email for verification.";
const MSG_REGISTER_FAILED: &str = "Registration failed";
const MSG_LOGGED_OUT: &str = "Logged out successfully";
const MSG_PROFILE_UPDATED: &str = "Profile updated successfully";
const MSG_PROFILE_UPDATE_FAILED: &str = "Failed to update profile";
const MSG_PASSWORD_CHANGED: &str = "Password updated successfully";
const MSG_PASSWORD_CHANGE_FAILED: &str = "Failed to change password";
const MSG_REFRESHED: &str = "Session refreshed";
const MSG_REFRESH_FAILED: &str = "Session expired, please log in again";

/// Single authority for who is logged in and which token authorizes requests.
///
/// Operations that touch credentials (initialize, login, OTP verify,
/// logout, profile update, refresh) run one at a time in call order.
pub struct SessionManager {
    pub(crate) api: ApiClient,
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    options: SessionOptions,
    state: watch::Sender<SessionState>,
    /// Access token attached to outgoing requests
    attached: RwLock<Option<String>>,
    gate: Mutex<()>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            api,
            store,
            notifier,
            options: SessionOptions::default(),
            state,
            attached: RwLock::new(None),
            gate: Mutex::new(()),
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a manager from loaded config, persisting tokens to the configured file.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> SessionResult<Self> {
        let api = ApiClient::from_config(&config.api)
            .map_err(|e| SessionError::config(format!("cannot build HTTP client: {e}")))?;
        let token_path = config
            .token_path()
            .map_err(|e| SessionError::config(e.to_string()))?;

        debug!("Token file: {token_path:?}");

        Ok(Self::new(api, Arc::new(FileTokenStore::new(token_path)), notifier)
            .with_options(SessionOptions::from(&config.session)))
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// `Authorization` header value currently attached to outgoing requests.
    pub fn authorization(&self) -> Option<String> {
        self.access_token().map(|token| bearer(&token))
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.attached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn attach(&self, access: &str) {
        *self.attached.write().unwrap_or_else(PoisonError::into_inner) = Some(access.to_string());
    }

    fn detach(&self) {
        *self.attached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set_state(&self, next: SessionState) {
        debug!("Session state -> {}", next.name());
        self.state.send_replace(next);
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Resolve persisted credentials into an identity.
    ///
    /// Never fails: any problem clears the stored tokens and leaves the
    /// session anonymous. Returns the resulting state.
    pub async fn initialize(&self) -> SessionState {
        let _guard = self.gate.lock().await;
        self.set_state(SessionState::Loading);

        let access = match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(Some(access)) => access,
            Ok(None) => {
                info!("No stored session");
                self.detach();
                self.set_state(SessionState::Anonymous);
                return self.state();
            }
            Err(e) => {
                warn!("Cannot read stored session: {e}");
                self.drop_credentials();
                self.set_state(SessionState::Anonymous);
                return self.state();
            }
        };

        self.attach(&access);

        match self.resolve(&access).await {
            Ok(identity) => {
                info!("Session restored for user {}", identity.id);
                self.set_state(SessionState::Authenticated(identity));
            }
            Err(e) => {
                warn!("Stored session rejected, clearing tokens: {e}");
                self.drop_credentials();
                self.set_state(SessionState::Anonymous);
            }
        }

        self.state()
    }

    /// Fetch the identity, trying one token refresh on 401 when refresh is configured.
    async fn resolve(&self, access: &str) -> SessionResult<Identity> {
        match self.api.fetch_identity(access).await {
            Ok(identity) => Ok(identity),
            Err(e) if e.is_unauthorized() && self.options.refresh_path.is_some() => {
                info!("Access token rejected, trying refresh");
                let access = self.refresh_locked().await?;
                self.api
                    .fetch_identity(&access)
                    .await
                    .map_err(|e| SessionError::from_client(e, MSG_REFRESH_FAILED))
            }
            Err(e) => Err(SessionError::from_client(e, MSG_REFRESH_FAILED)),
        }
    }

    /// Log in with an email or phone number and a password.
    pub async fn login(&self, identifier: &str, password: &str) -> SessionResult<Identity> {
        let _guard = self.gate.lock().await;
        let result = self.api.login(identifier, password).await;
        self.establish(result, MSG_LOGIN_OK, MSG_LOGIN_FAILED)
    }

    /// Ask the server to send a one-time code. Session state is not touched.
    pub async fn request_otp(&self, phone_number: &str) -> SessionResult<()> {
        match self.api.request_otp(phone_number).await {
            Ok(_) => {
                self.notify_success(MSG_OTP_SENT);
                Ok(())
            }
            Err(e) => Err(self.fail(SessionError::from_client(e, MSG_OTP_SEND_FAILED))),
        }
    }

    /// Log in with a phone number and the one-time code sent to it.
    pub async fn verify_otp(&self, phone_number: &str, otp_code: &str) -> SessionResult<Identity> {
        let _guard = self.gate.lock().await;
        let result = self.api.verify_otp(phone_number, otp_code).await;
        self.establish(result, MSG_OTP_VERIFIED, MSG_OTP_INVALID)
    }

    /// Create an account. Does not log in: no tokens are written and the
    /// current identity, if any, is kept.
    pub async fn register(&self, data: &RegisterRequest) -> SessionResult<()> {
        match self.api.register(data).await {
            Ok(_) => {
                self.notify_success(MSG_REGISTERED);
                Ok(())
            }
            Err(e) => Err(self.fail(SessionError::from_client(e, MSG_REGISTER_FAILED))),
        }
    }

    /// End the session. Safe to call when already logged out.
    pub async fn logout(&self) {
        let _guard = self.gate.lock().await;

        if self.options.revoke_on_logout {
            self.revoke_best_effort().await;
        }

        self.drop_credentials();
        self.set_state(SessionState::Anonymous);
        self.notify_success(MSG_LOGGED_OUT);
    }

    async fn revoke_best_effort(&self) {
        let Some(access) = self.access_token() else {
            return;
        };

        match self.store.get(REFRESH_TOKEN_KEY) {
            Ok(Some(refresh)) => {
                if let Err(e) = self.api.revoke(&access, &refresh).await {
                    warn!("Server-side logout failed, continuing: {e}");
                }
            }
            Ok(None) => debug!("No refresh token to revoke"),
            Err(e) => warn!("Cannot read refresh token for revocation: {e}"),
        }
    }

    /// Send a partial profile update. On success the identity is replaced by
    /// the server's answer as-is.
    pub async fn update_profile(&self, fields: &ProfileUpdate) -> SessionResult<Identity> {
        let _guard = self.gate.lock().await;

        let Some(access) = self.access_token() else {
            return Err(self.fail(SessionError::not_authenticated()));
        };

        match self.api.update_profile(&access, fields).await {
            Ok(identity) => {
                self.set_state(SessionState::Authenticated(identity.clone()));
                self.notify_success(MSG_PROFILE_UPDATED);
                Ok(identity)
            }
            Err(e) => Err(self.fail(SessionError::from_client(e, MSG_PROFILE_UPDATE_FAILED))),
        }
    }

    pub async fn change_password(&self, data: &ChangePasswordRequest) -> SessionResult<()> {
        let Some(access) = self.access_token() else {
            return Err(self.fail(SessionError::not_authenticated()));
        };

        match self.api.change_password(&access, data).await {
            Ok(_) => {
                self.notify_success(MSG_PASSWORD_CHANGED);
                Ok(())
            }
            Err(e) => Err(self.fail(SessionError::from_client(e, MSG_PASSWORD_CHANGE_FAILED))),
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Only an authenticated session can refresh; a token is never attached
    /// without an identity. Fails with a config error unless a refresh
    /// endpoint is configured. A failed refresh leaves the session as it was.
    pub async fn refresh(&self) -> SessionResult<()> {
        let _guard = self.gate.lock().await;

        if !self.state.borrow().is_authenticated() {
            return Err(self.fail(SessionError::not_authenticated()));
        }

        match self.refresh_locked().await {
            Ok(_) => {
                self.notify_success(MSG_REFRESHED);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Caller must hold the gate.
    async fn refresh_locked(&self) -> SessionResult<String> {
        let path = self
            .options
            .refresh_path
            .as_deref()
            .ok_or_else(|| SessionError::config("token refresh is not configured"))?;

        let refresh = self
            .store
            .get(REFRESH_TOKEN_KEY)?
            .ok_or_else(SessionError::not_authenticated)?;

        let response = self
            .api
            .refresh(path, &refresh)
            .await
            .map_err(|e| SessionError::from_client(e, MSG_REFRESH_FAILED))?;

        let pair = CredentialPair::new(response.access, response.refresh.unwrap_or(refresh));
        self.store.set_pair(&pair)?;
        self.attach(&pair.access);

        info!("Access token refreshed");
        Ok(pair.access)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Shared tail of login and OTP verification.
    fn establish(
        &self,
        result: ClientResult<AuthResponse>,
        success: &str,
        fallback: &str,
    ) -> SessionResult<Identity> {
        let response = result.map_err(|e| self.fail(SessionError::from_client(e, fallback)))?;

        self.store
            .set_pair(&response.credentials())
            .map_err(|e| self.fail(SessionError::from(e)))?;
        self.attach(&response.access);

        let identity = response.user;
        info!("Logged in as user {}", identity.id);
        self.set_state(SessionState::Authenticated(identity.clone()));
        self.notify_success(success);

        Ok(identity)
    }

    /// Forget credentials everywhere. Storage failures are logged, not returned.
    fn drop_credentials(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored tokens: {e} ({})", e.recovery_hint());
        }
        self.detach();
    }

    fn notify_success(&self, message: &str) {
        self.notifier.notify(Notification::success(message));
    }

    fn fail(&self, err: SessionError) -> SessionError {
        warn!("{err}");
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }
}
