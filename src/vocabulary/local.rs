//! Vocabularies built from site data, without calling Google

use std::collections::BTreeSet;

use super::Vocabulary;
use crate::gateway::AnalyticsGateway;

/// Role never offered for tracking exclusion
const OWNER_ROLE: &str = "Owner";

const SITE_WIDE: &str = "Site Wide";
const PORTLET: &str = "Portlet";

/// Reports registered on the site, labelled by title
pub fn reports(gateway: &AnalyticsGateway, category: Option<&str>) -> Vocabulary {
    Vocabulary::from_pairs(
        gateway
            .get_reports(category)
            .into_iter()
            .map(|report| (report.title, report.id)),
    )
}

pub fn site_wide_reports(gateway: &AnalyticsGateway) -> Vocabulary {
    reports(gateway, Some(SITE_WIDE))
}

pub fn portlet_reports(gateway: &AnalyticsGateway) -> Vocabulary {
    reports(gateway, Some(PORTLET))
}

/// Portal roles other than Owner, sorted
pub fn roles(gateway: &AnalyticsGateway) -> Vocabulary {
    let roles: BTreeSet<String> = gateway
        .site()
        .portal_roles()
        .into_iter()
        .filter(|role| role != OWNER_ROLE)
        .collect();
    Vocabulary::from_values(roles)
}

/// Tracking plugins registered globally or on this site, sorted
pub fn tracking_plugin_names(gateway: &AnalyticsGateway) -> Vocabulary {
    let site = gateway.site();
    let names: BTreeSet<String> = site
        .global_plugin_names()
        .into_iter()
        .chain(site.local_plugin_names())
        .collect();
    Vocabulary::from_values(names)
}

pub fn report_categories(gateway: &AnalyticsGateway) -> Vocabulary {
    Vocabulary::from_values(gateway.categories_choices())
}
