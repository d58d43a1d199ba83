//! Vocabulary choice display model

use tabled::Tabled;

use super::common::or_empty;
use crate::vocabulary::VocabularyChoice;

/// One vocabulary choice as a table row
#[derive(Debug, Clone, Tabled)]
pub struct ChoiceDisplay {
    #[tabled(rename = "LABEL")]
    pub label: String,

    /// Submitted value, or a dash for guidance entries
    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl From<&VocabularyChoice> for ChoiceDisplay {
    fn from(choice: &VocabularyChoice) -> Self {
        Self {
            label: choice.label.clone(),
            value: or_empty(choice.value.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::display::common::EMPTY;

    #[test]
    fn test_choice_with_value() {
        let display = ChoiceDisplay::from(&VocabularyChoice::new("Main", "ga:1"));
        assert_eq!(display.label, "Main");
        assert_eq!(display.value, "ga:1");
    }

    #[test]
    fn test_guidance_choice_shows_placeholder() {
        let display = ChoiceDisplay::from(&VocabularyChoice::message("No profiles available"));
        assert_eq!(display.value, EMPTY);
    }
}
