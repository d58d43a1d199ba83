//! Management API models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Google Analytics account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: String,

    /// Account name
    pub name: String,

    /// Creation time as reported by Google (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Last update time as reported by Google (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// Response of the account-listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountList {
    /// Resource kind (analytics#accounts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Email of the authenticated service account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Total number of accounts visible to the service account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,

    /// The accounts
    #[serde(default)]
    pub items: Vec<Account>,
}

/// The two fields vocabularies need from a profile or web property entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManagementEntry {
    /// Profile ID or web property ID (e.g. UA-30481-22)
    pub id: String,

    /// Profile or property name
    #[serde(default)]
    pub name: String,
}

impl ManagementEntry {
    /// Extract entries from a raw management feed.
    ///
    /// Accepts either the API's `{"items": [...]}` envelope or a bare array.
    /// Entries without an `id` are skipped.
    pub fn from_feed(feed: &Value) -> Vec<ManagementEntry> {
        let items = match feed {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        };

        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }
}
