//! Option lists for the site's analytics settings
//!
//! Every function here turns gateway data into a [`Vocabulary`]: a list of
//! label/value choices with unique values, ready for a select widget. Remote
//! failures never escape; they become a single guidance choice with no value.

mod crop;
mod local;
mod remote;

use serde::Serialize;

use crate::error::{ApiError, Error};

pub use crop::crop;
pub use local::{
    portlet_reports, report_categories, reports, roles, site_wide_reports, tracking_plugin_names,
};
pub use remote::{profiles, web_properties};

/// Maximum label length before cropping
pub const LABEL_LENGTH: usize = 40;

/// Label of the entry shown when Google returned nothing
pub const NO_PROFILES: &str = "No profiles available";

const AUTHORIZE_GUIDANCE: &str =
    "Please authorize with Google in the Google Analytics control panel.";
const TIMEOUT_GUIDANCE: &str =
    "The request to Google Analytics timed out. Please try again later.";

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyChoice {
    pub label: String,

    /// Submitted value; `None` for informational entries
    pub value: Option<String>,
}

impl VocabularyChoice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// An entry that shows text but cannot be submitted
    pub fn message(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

/// An ordered list of choices with unique values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary(Vec<VocabularyChoice>);

impl Vocabulary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single guidance entry explaining `err`
    pub fn guidance(err: &Error) -> Self {
        Self(vec![VocabularyChoice::message(guidance_message(err))])
    }

    /// The "nothing available" sentinel
    pub fn no_profiles() -> Self {
        Self(vec![VocabularyChoice::message(NO_PROFILES)])
    }

    /// Choices whose label is their value, in first-seen order
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut choices: Vec<VocabularyChoice> = Vec::new();
        for value in values {
            let value = value.into();
            if !choices.iter().any(|c| c.value.as_ref() == Some(&value)) {
                choices.push(VocabularyChoice::new(value.clone(), value));
            }
        }
        Self(choices)
    }

    /// Build from `(label, value)` pairs in order.
    ///
    /// A value seen again does not add a choice; its label is appended to the
    /// existing one with `", "`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut choices: Vec<VocabularyChoice> = Vec::new();
        for (label, value) in pairs {
            match choices
                .iter_mut()
                .find(|c| c.value.as_deref() == Some(value.as_str()))
            {
                Some(existing) => {
                    existing.label.push_str(", ");
                    existing.label.push_str(&label);
                }
                None => choices.push(VocabularyChoice::new(label, value)),
            }
        }
        Self(choices)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyChoice> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Submittable values in order
    pub fn values(&self) -> Vec<&str> {
        self.0.iter().filter_map(|c| c.value.as_deref()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.label.as_str()).collect()
    }
}

impl IntoIterator for Vocabulary {
    type Item = VocabularyChoice;
    type IntoIter = std::vec::IntoIter<VocabularyChoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a VocabularyChoice;
    type IntoIter = std::slice::Iter<'a, VocabularyChoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Text shown in place of choices when fetching them failed
pub fn guidance_message(err: &Error) -> String {
    match err {
        Error::Api(ApiError::Unauthorized | ApiError::Forbidden) => AUTHORIZE_GUIDANCE.to_string(),
        Error::Api(ApiError::RequestTimedOut(_) | ApiError::Network(_)) => {
            TIMEOUT_GUIDANCE.to_string()
        }
        other => format!("The request to Google Analytics had an error. {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidance_for_auth_errors() {
        for err in [ApiError::Unauthorized, ApiError::Forbidden] {
            let vocab = Vocabulary::guidance(&err.into());
            assert_eq!(vocab.len(), 1);
            assert_eq!(vocab.labels(), vec![AUTHORIZE_GUIDANCE]);
            assert!(vocab.values().is_empty());
        }
    }

    #[test]
    fn test_guidance_for_timeouts() {
        let err: Error = ApiError::RequestTimedOut("deadline".into()).into();
        assert_eq!(guidance_message(&err), TIMEOUT_GUIDANCE);

        let err: Error = ApiError::Network("Failed to connect to Google".into()).into();
        assert_eq!(guidance_message(&err), TIMEOUT_GUIDANCE);
    }

    #[test]
    fn test_guidance_for_invalid_request_appends_message() {
        let err: Error = ApiError::InvalidRequest("Invalid request method".into()).into();
        assert_eq!(
            guidance_message(&err),
            "The request to Google Analytics had an error. Invalid request method"
        );
    }

    #[test]
    fn test_guidance_for_other_errors() {
        let err: Error = ApiError::ServerError("Backend Error".into()).into();
        let msg = guidance_message(&err);
        assert!(msg.starts_with("The request to Google Analytics had an error."));
        assert!(msg.contains("Backend Error"));
    }

    #[test]
    fn test_from_pairs_joins_labels_of_same_value() {
        let vocab = Vocabulary::from_pairs(vec![
            ("Site A".to_string(), "UA-1".to_string()),
            ("Other".to_string(), "UA-2".to_string()),
            ("Site B".to_string(), "UA-1".to_string()),
        ]);
        assert_eq!(vocab.values(), vec!["UA-1", "UA-2"]);
        assert_eq!(vocab.labels(), vec!["Site A, Site B", "Other"]);
    }

    #[test]
    fn test_from_values_dedups() {
        let vocab = Vocabulary::from_values(["b", "a", "b"]);
        assert_eq!(vocab.values(), vec!["b", "a"]);
        assert_eq!(vocab.labels(), vec!["b", "a"]);
    }

    #[test]
    fn test_serializes_as_list() {
        let vocab = Vocabulary(vec![
            VocabularyChoice::new("Main", "ga:1"),
            VocabularyChoice::message(NO_PROFILES),
        ]);
        let json = serde_json::to_value(&vocab).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"label": "Main", "value": "ga:1"},
                {"label": "No profiles available", "value": null}
            ])
        );
    }
}
