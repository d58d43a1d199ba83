//! Mock Google Analytics client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::api::{AuthApi, ManagementApi};
use super::credentials::ServiceAccountCredentials;
use super::models::{AccessToken, AccountList};
use super::{AnalyticsApi, ClientFactory};
use crate::error::{ApiError, Result};

/// Token the mock hands out once it has "authenticated"
pub const MOCK_TOKEN: &str = "ya29.mock-token";

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAnalyticsClient::new()
///     .with_resource("management/profiles", json!({"items": []}))
///     .await;
/// ```
#[derive(Default)]
pub struct MockAnalyticsClient {
    /// Accounts to return from list_accounts
    accounts: Mutex<AccountList>,
    /// Raw payloads by resource path
    resources: Mutex<HashMap<String, Value>>,
    /// Error to return from the next read - consumed on first use
    error: Mutex<Option<ApiError>>,
    /// Error to return from the next revoke - consumed on first use
    revoke_error: Mutex<Option<ApiError>>,
    /// Token obtained so far
    token: Mutex<Option<AccessToken>>,
    /// Tokens passed to revoke_token
    revoked: Mutex<Vec<String>>,
    /// Track number of calls for verification
    call_count: Mutex<CallCounts>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub access_token: usize,
    pub list_accounts: usize,
    pub get_resource: usize,
    pub revoke_token: usize,
}

impl MockAnalyticsClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure accounts to return from list_accounts.
    pub async fn with_accounts(self, accounts: AccountList) -> Self {
        *self.accounts.lock().await = accounts;
        self
    }

    /// Configure the payload returned for `path`.
    pub async fn with_resource(self, path: &str, payload: Value) -> Self {
        self.resources
            .lock()
            .await
            .insert(path.to_string(), payload);
        self
    }

    /// Configure an error for the next read call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next revoke call.
    pub async fn with_revoke_error(self, error: ApiError) -> Self {
        *self.revoke_error.lock().await = Some(error);
        self
    }

    /// Get current call counts.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Tokens revoked so far.
    pub async fn revoked(&self) -> Vec<String> {
        self.revoked.lock().await.clone()
    }

    async fn take_error(&self) -> Option<ApiError> {
        self.error.lock().await.take()
    }

    async fn authenticate(&self) -> AccessToken {
        let mut token = self.token.lock().await;
        token
            .get_or_insert_with(|| AccessToken {
                token: MOCK_TOKEN.to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .clone()
    }
}

#[async_trait]
impl AuthApi for MockAnalyticsClient {
    async fn access_token(&self) -> Result<AccessToken> {
        self.call_count.lock().await.access_token += 1;
        Ok(self.authenticate().await)
    }

    async fn current_token(&self) -> Option<AccessToken> {
        self.token.lock().await.clone()
    }

    async fn revoke_token(&self, token: &str) -> Result<()> {
        self.call_count.lock().await.revoke_token += 1;
        if let Some(err) = self.revoke_error.lock().await.take() {
            return Err(err.into());
        }
        self.revoked.lock().await.push(token.to_string());
        *self.token.lock().await = None;
        Ok(())
    }
}

#[async_trait]
impl ManagementApi for MockAnalyticsClient {
    async fn list_accounts(&self) -> Result<AccountList> {
        self.call_count.lock().await.list_accounts += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        self.authenticate().await;
        Ok(self.accounts.lock().await.clone())
    }

    async fn get_resource(&self, resource_path: &str) -> Result<Value> {
        self.call_count.lock().await.get_resource += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        self.authenticate().await;
        self.resources
            .lock()
            .await
            .get(resource_path)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(resource_path.to_string()).into())
    }
}

/// Factory handing out one shared mock client
pub struct MockClientFactory {
    client: Arc<MockAnalyticsClient>,
    not_ready: bool,
    builds: AtomicUsize,
}

impl MockClientFactory {
    pub fn new(client: Arc<MockAnalyticsClient>) -> Self {
        Self {
            client,
            not_ready: false,
            builds: AtomicUsize::new(0),
        }
    }

    /// A factory whose transport never becomes ready.
    pub fn not_ready() -> Self {
        Self {
            not_ready: true,
            ..Self::new(Arc::new(MockAnalyticsClient::new()))
        }
    }

    /// Number of clients built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl ClientFactory for MockClientFactory {
    fn build(
        &self,
        _credentials: &ServiceAccountCredentials,
        _scopes: &[&str],
    ) -> Result<Arc<dyn AnalyticsApi>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.not_ready {
            return Err(ApiError::NotReady("response not ready".to_string()).into());
        }
        Ok(self.client.clone())
    }
}
