//! Vocabularies built from Google Analytics management feeds

use std::collections::BTreeMap;

use super::{LABEL_LENGTH, Vocabulary, VocabularyChoice, crop};
use crate::client::models::ManagementEntry;
use crate::error::Error;
use crate::gateway::AnalyticsGateway;

/// Outcome of loading one management feed
enum Feed {
    /// No usable credentials; show nothing
    Unauthenticated,
    Failed(Error),
    /// Joined names keyed by entry id, in id order
    Collapsed(BTreeMap<String, String>),
}

async fn load(gateway: &AnalyticsGateway, feed_path: &str) -> Feed {
    if !gateway.is_authenticated() {
        return Feed::Unauthenticated;
    }

    let feed = match gateway.accounts_feed(feed_path).await {
        Ok(feed) => feed,
        Err(e) => {
            log::debug!("Fetching {} failed: {}", feed_path, e);
            return Feed::Failed(e);
        }
    };

    let mut collapsed: BTreeMap<String, String> = BTreeMap::new();
    for entry in ManagementEntry::from_feed(&feed) {
        collapsed
            .entry(entry.id)
            .and_modify(|names| {
                names.push_str(", ");
                names.push_str(&entry.name);
            })
            .or_insert(entry.name);
    }
    Feed::Collapsed(collapsed)
}

fn sorted(mut choices: Vec<VocabularyChoice>) -> Vocabulary {
    choices.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
    Vocabulary(choices)
}

/// Report profiles (e.g. ga:30481) labelled by profile name
pub async fn profiles(gateway: &AnalyticsGateway) -> Vocabulary {
    let collapsed = match load(gateway, "profiles").await {
        Feed::Unauthenticated => return Vocabulary::empty(),
        Feed::Failed(e) => return Vocabulary::guidance(&e),
        Feed::Collapsed(c) if c.is_empty() => return Vocabulary::no_profiles(),
        Feed::Collapsed(c) => c,
    };

    sorted(
        collapsed
            .into_iter()
            .map(|(id, names)| VocabularyChoice::new(crop(&names, LABEL_LENGTH), id))
            .collect(),
    )
}

/// Web properties (e.g. UA-30481-22) labelled by the names of their profiles.
///
/// Labels are unique as well as values: when two properties crop to the
/// same label, the one with the greater id is kept.
pub async fn web_properties(gateway: &AnalyticsGateway) -> Vocabulary {
    let collapsed = match load(gateway, "webproperties").await {
        Feed::Unauthenticated => return Vocabulary::empty(),
        Feed::Failed(e) => return Vocabulary::guidance(&e),
        Feed::Collapsed(c) if c.is_empty() => return Vocabulary::no_profiles(),
        Feed::Collapsed(c) => c,
    };

    let by_label: BTreeMap<String, String> = collapsed
        .into_iter()
        .map(|(id, names)| (crop(&names, LABEL_LENGTH), id))
        .collect();

    sorted(
        by_label
            .into_iter()
            .map(|(label, id)| VocabularyChoice::new(label, id))
            .collect(),
    )
}
