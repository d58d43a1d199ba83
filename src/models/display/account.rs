//! Account display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{date_only, or_empty};
use crate::client::models::Account;

/// Account display model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AccountDisplay {
    #[tabled(rename = "ACCOUNT ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            name: account.name.clone(),
            created: account
                .created
                .as_deref()
                .map(date_only)
                .unwrap_or_else(|| or_empty(None)),
        }
    }
}
