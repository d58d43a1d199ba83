//! Google Analytics API data models

mod account;
mod auth;

pub use account::{Account, AccountList, ManagementEntry};
pub use auth::AccessToken;
