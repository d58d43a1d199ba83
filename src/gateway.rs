//! Analytics service gateway
//!
//! Owns the credential handling for the site: builds an authenticated client
//! on demand, serves management feeds through the time-bucketed response
//! cache and remembers the last access token so it can be revoked.

use std::sync::{Arc, Mutex};

use crate::cache::{CacheKey, Clock, ResponseCache};
use crate::client::models::{AccessToken, AccountList};
use crate::client::{AnalyticsApi, ClientFactory, SCOPES, ServiceAccountCredentials};
use crate::error::{ApiError, Error, Result};
use crate::site::{ReportDefinition, SiteContext};

/// Message used when revocation cannot reach Google
const NO_INTERNET: &str = "You may not have internet access. Please try again later.";

/// Entry point for everything the site asks of Google Analytics
pub struct AnalyticsGateway {
    site: Arc<dyn SiteContext>,
    factory: Arc<dyn ClientFactory>,
    cache: Arc<dyn ResponseCache>,
    clock: Arc<dyn Clock>,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

impl AnalyticsGateway {
    pub fn new(
        site: Arc<dyn SiteContext>,
        factory: Arc<dyn ClientFactory>,
        cache: Arc<dyn ResponseCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            site,
            factory,
            cache,
            clock,
            api_base: String::new(),
            token: Mutex::new(None),
        }
    }

    /// Record the API base the factory's clients talk to, so cached
    /// responses from different hosts stay apart
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Seed the gateway with a token remembered from an earlier run
    pub fn with_token(self, token: Option<AccessToken>) -> Self {
        if let Ok(mut state) = self.token.lock() {
            *state = token;
        }
        self
    }

    /// Last access token the gateway has seen, if not revoked since
    pub fn token(&self) -> Option<AccessToken> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    pub fn site(&self) -> &dyn SiteContext {
        self.site.as_ref()
    }

    /// Whether a client can be built from the current settings.
    ///
    /// Only validates the credentials locally; nothing is sent to Google.
    pub fn is_authenticated(&self) -> bool {
        self.build_client().is_some()
    }

    /// Build a client from the configured service account.
    ///
    /// Returns `None` (with a warning) when the credentials are missing or
    /// unusable, or when the transport is not ready.
    pub fn build_client(&self) -> Option<Arc<dyn AnalyticsApi>> {
        let settings = self.site.read_settings();

        let credentials =
            match ServiceAccountCredentials::from_json(settings.service_account.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Could not load service account credentials: {}", e);
                    return None;
                }
            };

        match self.factory.build(&credentials, SCOPES) {
            Ok(client) => Some(client),
            Err(Error::Api(ApiError::NotReady(reason))) => {
                log::warn!("Analytics client not ready: {}", reason);
                None
            }
            Err(e) => {
                log::warn!("Could not build analytics client: {}", e);
                None
            }
        }
    }

    /// List the accounts visible to the service account.
    ///
    /// HTTP errors from Google are logged and reported as `Ok(None)`, the same
    /// as having no client at all. Transport failures still propagate.
    pub async fn list_accounts(&self) -> Result<Option<AccountList>> {
        let Some(client) = self.build_client() else {
            return Ok(None);
        };

        let result = client.list_accounts().await;
        self.remember_token(client.as_ref()).await;

        match result {
            Ok(accounts) => Ok(Some(accounts)),
            Err(Error::Api(e)) if e.is_http_status() => {
                log::warn!("Could not authenticate! {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch `resource_path`, reusing the response cached for the current bucket
    pub async fn fetch_cached(&self, resource_path: &str) -> Result<serde_json::Value> {
        let settings = self.site.read_settings();
        let key = CacheKey::new(
            &self.cache_scope(settings.service_account.as_deref()),
            self.clock.now(),
            settings.cache_bucket_seconds(),
            resource_path,
        );

        if let Some(value) = self.cache.get(&key) {
            log::debug!("Cache hit: {} (bucket {})", resource_path, key.bucket);
            return Ok(value);
        }
        log::debug!("Cache miss: {} (bucket {})", resource_path, key.bucket);

        let client = self.build_client().ok_or(ApiError::Unauthorized)?;
        let result = client.get_resource(resource_path).await;
        self.remember_token(client.as_ref()).await;

        let value = result?;
        self.cache.put(&key, &value);
        Ok(value)
    }

    /// Cached management feed, e.g. `profiles` or `webproperties`
    pub async fn accounts_feed(&self, feed_path: &str) -> Result<serde_json::Value> {
        self.fetch_cached(&format!("management/{}", feed_path)).await
    }

    /// Revoke the remembered access token.
    ///
    /// The local token is forgotten whatever Google answers. A token Google
    /// already considers revoked is not an error; being unable to reach
    /// Google is reported as a timeout.
    pub async fn revoke_token(&self) -> Result<()> {
        let Some(token) = self.take_token() else {
            log::debug!("No access token to revoke");
            return Ok(());
        };

        let Some(client) = self.build_client() else {
            log::debug!("No client available, forgetting token without revoking");
            return Ok(());
        };

        match client.revoke_token(&token.token).await {
            Ok(()) => {
                log::debug!("Access token revoked");
                Ok(())
            }
            Err(Error::Api(ApiError::TokenAlreadyRevoked)) => {
                log::debug!("Access token was already revoked");
                Ok(())
            }
            Err(Error::Api(ApiError::Network(_) | ApiError::RequestTimedOut(_))) => {
                Err(ApiError::RequestTimedOut(NO_INTERNET.to_string()).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Reports registered on the site, limited to `category` when given
    pub fn get_reports(&self, category: Option<&str>) -> Vec<ReportDefinition> {
        self.site.list_report_definitions(category)
    }

    /// Categories reports can be filed under
    pub fn categories_choices(&self) -> Vec<String> {
        self.site.read_settings().report_categories
    }

    /// `client_email|api_base` of the configured service account
    fn cache_scope(&self, service_account: Option<&str>) -> String {
        let email = ServiceAccountCredentials::from_json(service_account)
            .map(|c| c.client_email)
            .unwrap_or_default();
        format!("{}|{}", email, self.api_base)
    }

    async fn remember_token(&self, client: &dyn AnalyticsApi) {
        if let Some(token) = client.current_token().await
            && let Ok(mut state) = self.token.lock()
        {
            *state = Some(token);
        }
    }

    fn take_token(&self) -> Option<AccessToken> {
        self.token.lock().ok().and_then(|mut t| t.take())
    }
}
