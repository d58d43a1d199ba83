//! Google Analytics API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use super::credentials::{AssertionSigner, ServiceAccountCredentials};
use super::models::{AccessToken, AccountList};
use super::{AnalyticsApi, AuthApi, ClientFactory, ManagementApi};
use crate::error::{ApiError, Result};

/// Management API v3 base URL
const API_BASE_URL: &str = "https://www.googleapis.com/analytics/v3";

/// OAuth2 token revocation endpoint
const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JWT-bearer grant type for service accounts
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Where the client sends its requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub revoke_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: API_BASE_URL.to_string(),
            revoke_url: REVOKE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints rooted at a custom host, or Google's when `host` is `None`
    pub fn with_host(host: Option<&str>) -> Self {
        match host {
            Some(host) => {
                let host = host.trim_end_matches('/');
                Self {
                    api_base: format!("{}/analytics/v3", host),
                    revoke_url: format!("{}/revoke", host),
                }
            }
            None => Self::default(),
        }
    }
}

/// Map the short feed names used by vocabularies onto Management API v3 paths
fn resolve_resource(resource_path: &str) -> String {
    let path = resource_path.trim_matches('/');
    match path {
        "management/webproperties" => "management/accounts/~all/webproperties".to_string(),
        "management/profiles" => "management/accounts/~all/webproperties/~all/profiles".to_string(),
        other => other.to_string(),
    }
}

/// Pull the human-readable message out of a Google error body
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.to_string())
}

/// Google Analytics API client authenticated as a service account
pub struct GoogleAnalyticsClient {
    http: HttpClient,
    endpoints: Endpoints,
    signer: AssertionSigner,
    auth_state: Arc<RwLock<Option<AccessToken>>>,
}

impl GoogleAnalyticsClient {
    /// Create a client for `credentials`.
    ///
    /// Fails with a credential error if the private key is unusable and with
    /// `ApiError::NotReady` if the HTTP transport cannot be set up.
    pub fn new(
        credentials: &ServiceAccountCredentials,
        scopes: &[&str],
        endpoints: Endpoints,
    ) -> Result<Self> {
        let signer = credentials.signer(scopes)?;

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::NotReady(e.to_string()))?;

        Ok(Self {
            http,
            endpoints,
            signer,
            auth_state: Arc::new(RwLock::new(None)),
        })
    }

    /// Exchange a signed assertion for a bearer token
    async fn fetch_token(&self) -> Result<AccessToken> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }

        let now = Utc::now();
        let assertion = self.signer.assertion(now)?;

        let response = self
            .http
            .post(self.signer.audience())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        match status {
            StatusCode::OK => {
                let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
                })?;
                Ok(AccessToken {
                    token: token.access_token,
                    expires_at: now + chrono::Duration::seconds(token.expires_in),
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                log::debug!("Token request rejected: {}", body);
                Err(ApiError::Unauthorized.into())
            }
            status => Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            }
            .into()),
        }
    }

    /// GET a Management API path and decode the JSON body
    async fn request_json<T: DeserializeOwned>(&self, resource_path: &str) -> Result<T> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/{}",
            self.endpoints.api_base,
            resolve_resource(resource_path)
        );

        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token.token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == StatusCode::OK {
            return response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
            });
        }

        let body = response.text().await.unwrap_or_default();
        let err = match status {
            StatusCode::UNAUTHORIZED => {
                // Google rejected the token; mint a fresh one next time
                *self.auth_state.write().await = None;
                ApiError::Unauthorized
            }
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(error_message(&body)),
            StatusCode::BAD_REQUEST | StatusCode::METHOD_NOT_ALLOWED => {
                ApiError::InvalidRequest(error_message(&body))
            }
            status if status.is_server_error() => ApiError::ServerError(error_message(&body)),
            status => ApiError::Remote {
                status: status.as_u16(),
                body,
            },
        };
        Err(err.into())
    }
}

impl std::fmt::Debug for GoogleAnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAnalyticsClient")
            .field("endpoints", &self.endpoints)
            .field("token_uri", &self.signer.audience())
            .finish()
    }
}

#[async_trait]
impl AuthApi for GoogleAnalyticsClient {
    async fn access_token(&self) -> Result<AccessToken> {
        {
            let state = self.auth_state.read().await;
            if let Some(token) = state.as_ref()
                && !token.expires_within(Utc::now(), chrono::Duration::minutes(5))
            {
                return Ok(token.clone());
            }
        }

        let token = self.fetch_token().await?;
        *self.auth_state.write().await = Some(token.clone());
        Ok(token)
    }

    async fn current_token(&self) -> Option<AccessToken> {
        self.auth_state.read().await.clone()
    }

    async fn revoke_token(&self, token: &str) -> Result<()> {
        #[derive(Deserialize)]
        struct RevokeError {
            error: String,
        }

        let response = self
            .http
            .post(&self.endpoints.revoke_url)
            .form(&[("token", token)])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            let mut state = self.auth_state.write().await;
            if state.as_ref().is_some_and(|t| t.token == token) {
                *state = None;
            }
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let already_revoked = status == StatusCode::BAD_REQUEST
            && serde_json::from_str::<RevokeError>(&body)
                .map(|e| e.error == "invalid_token")
                .unwrap_or(false);

        if already_revoked {
            Err(ApiError::TokenAlreadyRevoked.into())
        } else {
            Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            }
            .into())
        }
    }
}

#[async_trait]
impl ManagementApi for GoogleAnalyticsClient {
    async fn list_accounts(&self) -> Result<AccountList> {
        self.request_json("management/accounts").await
    }

    async fn get_resource(&self, resource_path: &str) -> Result<Value> {
        self.request_json(resource_path).await
    }
}

/// Builds [`GoogleAnalyticsClient`]s against a fixed set of endpoints
#[derive(Debug, Clone, Default)]
pub struct GoogleClientFactory {
    endpoints: Endpoints,
}

impl GoogleClientFactory {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl ClientFactory for GoogleClientFactory {
    fn build(
        &self,
        credentials: &ServiceAccountCredentials,
        scopes: &[&str],
    ) -> Result<Arc<dyn AnalyticsApi>> {
        let client = GoogleAnalyticsClient::new(credentials, scopes, self.endpoints.clone())?;
        Ok(Arc::new(client))
    }
}
