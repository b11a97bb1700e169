/// HTTP access to the care home monitoring API
use log::{debug, info};
use reqwest::StatusCode;
use url::Url;

use crate::api::error::ApiError;
use crate::config::Credentials;
use crate::models::{LoginRequest, LoginResponse, Reading};

const LOGIN_PATH: &str = "auth/login";
const SENSOR_DATA_PATH: &str = "sensordata";

/// Bearer token returned by a successful login
#[derive(Debug, Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` must end with '/' for endpoint paths to be appended to it
    pub fn new(base_url: Url) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: Url) -> Self {
        ApiClient { http, base_url }
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Log in and obtain a bearer token
    ///
    /// Anything other than HTTP 200 with a token in the body is a failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let request = LoginRequest {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        };

        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH)?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::AuthFailed { status, body });
        }

        let login: LoginResponse = response.json().await?;
        match &login.user {
            Some(user) => info!(
                "Logged in successfully as {} ({})",
                user.full_name.as_deref().unwrap_or(&user.username),
                user.role.as_deref().unwrap_or("unknown role")
            ),
            None => info!("Logged in successfully"),
        }

        Ok(AuthToken(login.token))
    }

    /// POST one reading; only HTTP 201 counts as delivered
    pub async fn send_reading(&self, token: &AuthToken, reading: &Reading) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint(SENSOR_DATA_PATH)?)
            .bearer_auth(token.as_str())
            .json(reading)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            debug!("Reading for room {} accepted", reading.room_id);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected { status, body })
    }
}
