//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Token minting and revocation
//! - [`ManagementApi`] - Management API reads
//!
//! The [`AnalyticsApi`](super::AnalyticsApi) super-trait combines both.

mod auth;
mod management;

pub use auth::AuthApi;
pub use management::ManagementApi;
