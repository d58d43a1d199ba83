//! Management API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::AccountList;
use crate::error::Result;

/// Read operations against the Google Analytics Management API
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// List the accounts the service account can see
    async fn list_accounts(&self) -> Result<AccountList>;

    /// Fetch a management resource (e.g. `management/profiles`) as raw JSON
    async fn get_resource(&self, resource_path: &str) -> Result<Value>;
}
