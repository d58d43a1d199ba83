//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::AccessToken;
use crate::error::Result;

/// OAuth2 operations for the service account
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Get a valid bearer token, minting a new one if needed
    async fn access_token(&self) -> Result<AccessToken>;

    /// The token this client last obtained, if any
    async fn current_token(&self) -> Option<AccessToken>;

    /// Revoke a previously issued token
    ///
    /// Fails with `ApiError::TokenAlreadyRevoked` when Google no longer
    /// recognises the token.
    async fn revoke_token(&self, token: &str) -> Result<()>;
}
