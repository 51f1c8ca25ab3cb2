use crate::{
    api::{
        error::{ClientError, Result as ClientResult},
        requests::{ChangePasswordRequest, ProfileUpdate, RegisterRequest},
        responses::{AuthResponse, RefreshResponse},
    },
    credentials::bearer,
    identity::Identity,
};

use log::debug;
use reqwest::{Client as ReqwestClient, Method, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tr_config::ApiConfig;

pub(crate) const DASHBOARD_PATH: &str = "/profiles/dashboard/";
pub(crate) const LOGIN_PATH: &str = "/profiles/login/";
pub(crate) const OTP_LOGIN_PATH: &str = "/profiles/otp-login/";
pub(crate) const OTP_VERIFY_PATH: &str = "/profiles/otp-verify/";
pub(crate) const REGISTER_PATH: &str = "/profiles/register/";
pub(crate) const LOGOUT_PATH: &str = "/profiles/logout/";
pub(crate) const PROFILE_UPDATE_PATH: &str = "/profiles/profile-update/";
pub(crate) const CHANGE_PASSWORD_PATH: &str = "/profiles/change-password/";

/// HTTP client for the TailoRent REST API.
///
/// Stateless: the bearer token is passed per call, the client never keeps one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub base_url: String,
    client: ReqwestClient,
}

impl ApiClient {
    /// Create a client with transport defaults
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "http://127.0.0.1:8000/api")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    /// Create a client with the configured timeout and user agent
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a request, attaching the bearer token when one is given
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        access: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(token) = access {
            req = req.header(AUTHORIZATION, bearer(token));
        }

        req
    }

    /// Execute request and handle errors
    ///
    /// Empty 2xx bodies (e.g. 204) come back as `Value::Null`.
    pub(crate) async fn execute(&self, req: reqwest::RequestBuilder) -> ClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = extract_message(&bytes);
            debug!(
                "API returned {}: {}",
                status.as_u16(),
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn execute_as<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.execute(req).await?;
        Ok(serde_json::from_value(body)?)
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Fetch the identity the access token belongs to
    pub async fn fetch_identity(&self, access: &str) -> ClientResult<Identity> {
        let req = self.request(Method::GET, DASHBOARD_PATH, Some(access));
        self.execute_as(req).await
    }

    /// Password login. `identifier` is an email or a phone number.
    pub async fn login(&self, identifier: &str, password: &str) -> ClientResult<AuthResponse> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email_or_phone: &'a str,
            password: &'a str,
        }

        let body = LoginRequest {
            email_or_phone: identifier,
            password,
        };
        let req = self.request(Method::POST, LOGIN_PATH, None).json(&body);
        self.execute_as(req).await
    }

    /// Ask the server to text a one-time code to `phone_number`
    pub async fn request_otp(&self, phone_number: &str) -> ClientResult<Value> {
        #[derive(Serialize)]
        struct OtpLoginRequest<'a> {
            phone_number: &'a str,
        }

        let req = self
            .request(Method::POST, OTP_LOGIN_PATH, None)
            .json(&OtpLoginRequest { phone_number });
        self.execute(req).await
    }

    /// Exchange a one-time code for tokens
    pub async fn verify_otp(&self, phone_number: &str, otp_code: &str) -> ClientResult<AuthResponse> {
        #[derive(Serialize)]
        struct OtpVerifyRequest<'a> {
            phone_number: &'a str,
            otp_code: &'a str,
        }

        let body = OtpVerifyRequest {
            phone_number,
            otp_code,
        };
        let req = self.request(Method::POST, OTP_VERIFY_PATH, None).json(&body);
        self.execute_as(req).await
    }

    /// Create an account
    pub async fn register(&self, data: &RegisterRequest) -> ClientResult<Value> {
        let req = self.request(Method::POST, REGISTER_PATH, None).json(data);
        self.execute(req).await
    }

    /// Partially update the profile; the server answers with the full identity
    pub async fn update_profile(
        &self,
        access: &str,
        fields: &ProfileUpdate,
    ) -> ClientResult<Identity> {
        let req = self
            .request(Method::PATCH, PROFILE_UPDATE_PATH, Some(access))
            .json(fields);
        self.execute_as(req).await
    }

    /// Blacklist a refresh token server-side
    pub async fn revoke(&self, access: &str, refresh: &str) -> ClientResult<Value> {
        #[derive(Serialize)]
        struct LogoutRequest<'a> {
            refresh: &'a str,
        }

        let req = self
            .request(Method::POST, LOGOUT_PATH, Some(access))
            .json(&LogoutRequest { refresh });
        self.execute(req).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, path: &str, refresh: &str) -> ClientResult<RefreshResponse> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh: &'a str,
        }

        let req = self
            .request(Method::POST, path, None)
            .json(&RefreshRequest { refresh });
        self.execute_as(req).await
    }

    pub async fn change_password(
        &self,
        access: &str,
        data: &ChangePasswordRequest,
    ) -> ClientResult<Value> {
        let req = self
            .request(Method::PUT, CHANGE_PASSWORD_PATH, Some(access))
            .json(data);
        self.execute(req).await
    }

    // =========================================================================
    // Generic Operations
    // =========================================================================

    pub async fn get(&self, path: &str, access: Option<&str>) -> ClientResult<Value> {
        let req = self.request(Method::GET, path, access);
        self.execute(req).await
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        access: Option<&str>,
        body: &B,
    ) -> ClientResult<Value> {
        let req = self.request(method, path, access).json(body);
        self.execute(req).await
    }

    pub async fn delete(&self, path: &str, access: Option<&str>) -> ClientResult<Value> {
        let req = self.request(Method::DELETE, path, access);
        self.execute(req).await
    }
}

/// Pull a human-readable message out of an error body.
///
/// Checked in order: `message`, `detail`, `error.message`, first
/// `non_field_errors` entry.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let candidates = [
        value.get("message"),
        value.get("detail"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("non_field_errors").and_then(|e| e.get(0)),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(String::from)
}
