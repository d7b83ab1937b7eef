use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to entries saved without one.
pub const UNTITLED: &str = "Untitled Thought";

/// A saved journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Creation time in milliseconds since the epoch, as a string
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soothing reply generated for this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_advice: Option<String>,
}

impl JournalEntry {
    /// The generated reply, if there is a non-blank one.
    pub fn note(&self) -> Option<&str> {
        self.ai_advice
            .as_deref()
            .filter(|note| !note.trim().is_empty())
    }
}

/// What the editor hands to [`Journal::save`](super::Journal::save).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Entry being edited, or `None` for a new one
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub ai_advice: Option<String>,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Edits the existing entry `id` instead of creating one.
    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.ai_advice = Some(advice.into());
        self
    }

    /// Both title and body are blank.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    pub(crate) fn title_or_default(&self) -> String {
        if self.title.is_empty() {
            UNTITLED.to_string()
        } else {
            self.title.clone()
        }
    }
}
