//! Site context: everything the analytics core needs from its host
//!
//! The core never reaches into the host directly. It asks a [`SiteContext`]
//! for settings, locally registered report definitions, portal roles and
//! tracking plugin registrations. [`StaticSite`] serves all of that from the
//! config file.

use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// A report registered on the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Report identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Categories the report is filed under (e.g. "Site Wide", "Portlet")
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ReportDefinition {
    /// Whether the report is filed under `category`
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Capabilities the embedding application provides to the analytics core
pub trait SiteContext: Send + Sync {
    /// Current analytics settings
    fn read_settings(&self) -> Settings;

    /// Registered reports, limited to `category` when one is given
    fn list_report_definitions(&self, category: Option<&str>) -> Vec<ReportDefinition>;

    /// All roles defined on the portal
    fn portal_roles(&self) -> Vec<String>;

    /// Tracking plugins registered globally
    fn global_plugin_names(&self) -> Vec<String>;

    /// Tracking plugins registered on this site only
    fn local_plugin_names(&self) -> Vec<String>;
}

/// Tracking plugin registrations by scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRegistry {
    #[serde(default)]
    pub global: Vec<String>,

    #[serde(default)]
    pub local: Vec<String>,
}

/// Site data section of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub reports: Vec<ReportDefinition>,

    #[serde(default)]
    pub plugins: PluginRegistry,
}

/// A [`SiteContext`] backed by fixed settings and site data
#[derive(Debug, Clone, Default)]
pub struct StaticSite {
    settings: Settings,
    site: SiteConfig,
}

impl StaticSite {
    pub fn new(settings: Settings, site: SiteConfig) -> Self {
        Self { settings, site }
    }
}

impl SiteContext for StaticSite {
    fn read_settings(&self) -> Settings {
        self.settings.clone()
    }

    fn list_report_definitions(&self, category: Option<&str>) -> Vec<ReportDefinition> {
        self.site
            .reports
            .iter()
            .filter(|report| match category {
                Some(c) if !c.is_empty() => report.in_category(c),
                _ => true,
            })
            .cloned()
            .collect()
    }

    fn portal_roles(&self) -> Vec<String> {
        self.site.roles.clone()
    }

    fn global_plugin_names(&self) -> Vec<String> {
        self.site.plugins.global.clone()
    }

    fn local_plugin_names(&self) -> Vec<String> {
        self.site.plugins.local.clone()
    }
}
