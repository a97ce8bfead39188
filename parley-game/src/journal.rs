//! Append-only narrative event log for one negotiation session.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum tag capacity stored inline without additional allocations.
pub type EventTagSet = SmallVec<[EventTag; 4]>;

/// Tag describing why a particular event ended up in the log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTag(pub String);

impl EventTag {
    /// Construct a tag from a string slice, trimming whitespace.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns true when the tag has no visible characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// One narrative event, keyed for the host's rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Stable `log.*` key identifying the event kind.
    pub key: String,
    /// Optional subject (item or trader name) the event refers to.
    #[serde(default)]
    pub subject: Option<String>,
    /// Descriptive tags (penalty, theft, etc.).
    #[serde(default)]
    pub tags: EventTagSet,
}

impl LogEntry {
    /// Create a new entry with no subject or tags.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            subject: None,
            tags: EventTagSet::new(),
        }
    }

    /// Create a new entry about a named subject.
    #[must_use]
    pub fn with_subject(key: &str, subject: &str) -> Self {
        Self {
            key: key.to_string(),
            subject: Some(subject.to_string()),
            tags: EventTagSet::new(),
        }
    }

    /// Adds a tag if it is not already present.
    pub fn push_tag(&mut self, tag: EventTag) {
        if tag.is_empty() || self.tags.iter().any(|existing| existing == &tag) {
            return;
        }
        self.tags.push(tag);
    }
}

/// Ordered sequence of narrative events for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
