//! Analytics settings owned by the site

use serde::{Deserialize, Serialize};

/// Google Analytics settings as the site administrator configured them.
///
/// The core only ever reads these; they are edited through `gavocab init`
/// or by hand in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Service account key, as the JSON document downloaded from Google
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,

    /// Web property tracked on the site (e.g. UA-30481-22)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_web_property: Option<String>,

    /// Tracking plugins enabled for the site
    #[serde(default)]
    pub tracking_plugin_names: Vec<String>,

    /// Roles whose visits are not tracked
    #[serde(default)]
    pub tracking_excluded_roles: Vec<String>,

    /// Profile used for reports (e.g. ga:30481)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_profile: Option<String>,

    /// Reports enabled for display
    #[serde(default)]
    pub reports: Vec<String>,

    /// Minutes a fetched account feed stays cached
    #[serde(default = "default_cache_interval")]
    pub cache_interval: i64,

    /// Categories report definitions can be filed under
    #[serde(default = "default_report_categories")]
    pub report_categories: Vec<String>,
}

fn default_cache_interval() -> i64 {
    60
}

fn default_report_categories() -> Vec<String> {
    vec!["Site Wide".to_string(), "Portlet".to_string()]
}

impl Settings {
    /// Width of one cache bucket in seconds.
    ///
    /// Non-positive intervals fall back to one-second buckets, which
    /// effectively disables caching across requests.
    pub fn cache_bucket_seconds(&self) -> i64 {
        if self.cache_interval > 0 {
            self.cache_interval.saturating_mul(60)
        } else {
            1
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_account: None,
            tracking_web_property: None,
            tracking_plugin_names: Vec::new(),
            tracking_excluded_roles: Vec::new(),
            reports_profile: None,
            reports: Vec::new(),
            cache_interval: default_cache_interval(),
            report_categories: default_report_categories(),
        }
    }
}
