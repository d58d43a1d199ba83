//! Google Analytics API client

use std::sync::Arc;

pub mod api;
pub mod credentials;
pub mod google;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, ManagementApi};
pub use credentials::{SCOPES, ServiceAccountCredentials};
pub use google::{Endpoints, GoogleClientFactory};
#[cfg(test)]
pub use mock::{MOCK_TOKEN, MockAnalyticsClient, MockClientFactory};

use crate::error::Result;

/// Combined Google Analytics API trait
///
/// Anything implementing both sub-traits gets this for free.
pub trait AnalyticsApi: AuthApi + ManagementApi {}

impl<T: AuthApi + ManagementApi> AnalyticsApi for T {}

/// Builds an authenticated client from parsed credentials
pub trait ClientFactory: Send + Sync {
    /// Build a client scoped to `scopes`.
    ///
    /// `ApiError::NotReady` signals a transient transport problem; credential
    /// errors mean the key itself is unusable.
    fn build(
        &self,
        credentials: &ServiceAccountCredentials,
        scopes: &[&str],
    ) -> Result<Arc<dyn AnalyticsApi>>;
}
