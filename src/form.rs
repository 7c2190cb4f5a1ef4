use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::Slot;

pub const SLOT_REQUIRED: &str = "Time slot is required";
pub const FIELD_REQUIRED: &str = "Field is required";
pub const LEVEL_REQUIRED: &str = "Level is required";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const SCHEDULE_FAILED: &str = "Failed to schedule interview. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Frontend,
    Backend,
    Fullstack,
    Data,
    Devops,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Frontend,
        Field::Backend,
        Field::Fullstack,
        Field::Data,
        Field::Devops,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Frontend => "frontend",
            Field::Backend => "backend",
            Field::Fullstack => "fullstack",
            Field::Data => "data",
            Field::Devops => "devops",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Frontend => "Frontend Development",
            Field::Backend => "Backend Engineering",
            Field::Fullstack => "Full Stack Development",
            Field::Data => "Data Science",
            Field::Devops => "DevOps",
        }
    }

    /// Unknown or empty input means "not selected".
    pub fn parse(s: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Entry,
    Junior,
    Mid,
    Senior,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Entry, Level::Junior, Level::Mid, Level::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Entry => "entry",
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Entry => "Entry",
            Level::Junior => "Junior",
            Level::Mid => "Mid",
            Level::Senior => "Senior",
        }
    }

    pub fn parse(s: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// What the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub field: Option<Field>,
    pub level: Option<Level>,
    pub title: String,
    pub notes: String,
    pub selected_slot: Option<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Slot,
    Field,
    Level,
    Title,
    Form,
}

impl ErrorKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKey::Slot => "slot",
            ErrorKey::Field => "field",
            ErrorKey::Level => "level",
            ErrorKey::Title => "title",
            ErrorKey::Form => "form",
        }
    }
}

/// Messages keyed by the input they belong to. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<ErrorKey, String>);

impl ValidationErrors {
    pub fn form_failure() -> Self {
        let mut errors = Self::default();
        errors.0.insert(ErrorKey::Form, SCHEDULE_FAILED.to_string());
        errors
    }

    pub fn get(&self, key: ErrorKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn insert(&mut self, key: ErrorKey, message: &str) {
        self.0.insert(key, message.to_string());
    }
}

/// Required-field check run before any booking request. Notes are optional.
pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    if form.selected_slot.is_none() {
        errors.insert(ErrorKey::Slot, SLOT_REQUIRED);
    }
    if form.field.is_none() {
        errors.insert(ErrorKey::Field, FIELD_REQUIRED);
    }
    if form.level.is_none() {
        errors.insert(ErrorKey::Level, LEVEL_REQUIRED);
    }
    if form.title.is_empty() {
        errors.insert(ErrorKey::Title, TITLE_REQUIRED);
    }
    errors
}

/// Whether the submit button is enabled. Kept separate from [`validate`].
pub fn can_submit(form: &FormState, submitting: bool) -> bool {
    !submitting
        && form.selected_slot.is_some()
        && form.field.is_some()
        && form.level.is_some()
        && !form.title.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> Slot {
        Slot {
            id: "s1".into(),
            date: Some("2024-05-01".into()),
            start_time: "10:00".into(),
            end_time: "10:30".into(),
            interviewer: None,
        }
    }

    fn complete() -> FormState {
        FormState {
            field: Some(Field::Backend),
            level: Some(Level::Mid),
            title: "Backend interview".into(),
            notes: String::new(),
            selected_slot: Some(slot()),
        }
    }

    #[test]
    fn test_empty_form_reports_every_required_input() {
        let errors = validate(&FormState::default());
        let keys: Vec<ErrorKey> = errors.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![ErrorKey::Slot, ErrorKey::Field, ErrorKey::Level, ErrorKey::Title]
        );
        assert_eq!(errors.get(ErrorKey::Slot), Some(SLOT_REQUIRED));
        assert_eq!(errors.get(ErrorKey::Title), Some(TITLE_REQUIRED));
    }

    #[test]
    fn test_missing_slot_only() {
        let mut form = complete();
        form.selected_slot = None;
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ErrorKey::Slot), Some("Time slot is required"));
    }

    #[test]
    fn test_notes_never_validated() {
        let errors = validate(&complete());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_submit_gate() {
        assert!(can_submit(&complete(), false));
        assert!(!can_submit(&complete(), true));

        let mut form = complete();
        form.title.clear();
        assert!(!can_submit(&form, false));

        let mut form = complete();
        form.level = None;
        assert!(!can_submit(&form, false));

        let mut form = complete();
        form.field = None;
        assert!(!can_submit(&form, false));

        let mut form = complete();
        form.selected_slot = None;
        assert!(!can_submit(&form, false));
    }

    #[test]
    fn test_parse_unknown_is_unset() {
        assert_eq!(Field::parse("devops"), Some(Field::Devops));
        assert_eq!(Field::parse(""), None);
        assert_eq!(Field::parse("marketing"), None);
        assert_eq!(Level::parse("mid"), Some(Level::Mid));
        assert_eq!(Level::parse("principal"), None);
    }

    #[test]
    fn test_form_failure_is_single_entry() {
        let errors = ValidationErrors::form_failure();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ErrorKey::Form), Some(SCHEDULE_FAILED));
    }
}
