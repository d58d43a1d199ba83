//! Service-account credentials and JWT-bearer assertions

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// OAuth scopes requested for every client
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/analytics.readonly"];

/// Google's token endpoint, used when the key file does not name one
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Lifetime requested for each assertion (Google's maximum)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Parsed service-account key file
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    /// Key type; Google writes `service_account`
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Key ID, sent as the `kid` header of assertions
    #[serde(default)]
    pub private_key_id: Option<String>,

    /// PEM-encoded RSA private key
    pub private_key: String,

    /// Service account email, the assertion issuer
    pub client_email: String,

    /// Token endpoint assertions are exchanged at
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    /// Parse the JSON blob stored in the settings
    pub fn from_json(blob: Option<&str>) -> Result<Self, CredentialError> {
        let blob = match blob.map(str::trim) {
            Some(b) if !b.is_empty() => b,
            _ => return Err(CredentialError::Missing),
        };

        let credentials: Self = serde_json::from_str(blob)
            .map_err(|e| CredentialError::Malformed(e.to_string()))?;

        match credentials.account_type.as_deref() {
            None | Some("service_account") => Ok(credentials),
            Some(other) => Err(CredentialError::UnsupportedType(other.to_string())),
        }
    }

    /// Build a signer for JWT-bearer assertions.
    ///
    /// Parsing the key happens here, so an unusable key is caught before any
    /// request is made.
    pub fn signer(&self, scopes: &[&str]) -> Result<AssertionSigner, CredentialError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| CredentialError::InvalidKey(e.to_string()))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        Ok(AssertionSigner {
            key,
            header,
            issuer: self.client_email.clone(),
            audience: self.token_uri.clone(),
            scope: scopes.join(" "),
        })
    }
}

/// Claims of a JWT-bearer grant assertion
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs assertions for one service account and scope set
pub struct AssertionSigner {
    key: EncodingKey,
    header: Header,
    issuer: String,
    audience: String,
    scope: String,
}

impl AssertionSigner {
    /// Token endpoint the assertions are addressed to
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Sign an assertion valid from `now`
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, CredentialError> {
        let claims = AssertionClaims {
            iss: self.issuer.clone(),
            scope: self.scope.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        jsonwebtoken::encode(&self.header, &claims, &self.key)
            .map_err(|e| CredentialError::InvalidKey(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) const TEST_SERVICE_ACCOUNT: &str =
    include_str!("../../tests/fixtures/service_account.json");
