//! Journal record types.

use crate::{RecordId, RemoteRepresentation, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the author felt when writing an entry.
///
/// Unknown moods coming from other clients are kept verbatim in
/// [`Mood::Other`] so they survive a pull/push cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Happy,
    Content,
    #[default]
    Neutral,
    Sad,
    Anxious,
    Angry,
    Other(String),
}

impl Mood {
    /// Wire name of the mood.
    pub fn as_str(&self) -> &str {
        match self {
            Mood::Happy => "happy",
            Mood::Content => "content",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Other(other) => other,
        }
    }
}

impl From<String> for Mood {
    fn from(value: String) -> Self {
        match value.as_str() {
            "happy" => Mood::Happy,
            "content" => Mood::Content,
            "neutral" => Mood::Neutral,
            "sad" => Mood::Sad,
            "anxious" => Mood::Anxious,
            "angry" => Mood::Angry,
            _ => Mood::Other(value),
        }
    }
}

impl From<&str> for Mood {
    fn from(value: &str) -> Self {
        Mood::from(value.to_string())
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A journal entry as persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable key shared with the remote store. Required for any network operation.
    pub identifier: Option<RecordId>,
    pub title: Option<String>,
    #[serde(default)]
    pub body_text: String,
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub mood: Mood,
}

impl Record {
    /// Create a new entry with a fresh identifier, stamped with the current time.
    pub fn new(title: impl Into<String>, body_text: impl Into<String>, mood: Mood) -> Self {
        Self {
            identifier: Some(uuid::Uuid::new_v4().to_string()),
            title: Some(title.into()),
            body_text: body_text.into(),
            timestamp: Some(chrono::Utc::now()),
            mood,
        }
    }

    /// Build a local record from a remote representation.
    pub fn from_representation(representation: &RemoteRepresentation) -> Self {
        Self {
            identifier: representation.identifier.clone(),
            title: Some(representation.title.clone()),
            body_text: representation.body_text.clone(),
            timestamp: Some(representation.timestamp),
            mood: representation.mood.clone(),
        }
    }

    /// The identifier, treating an empty string as absent.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }

    /// Overwrite the content fields from a remote representation.
    ///
    /// The identifier is left untouched. Returns `true` if any field changed.
    pub fn apply_representation(&mut self, representation: &RemoteRepresentation) -> bool {
        let before = (
            self.title.clone(),
            self.body_text.clone(),
            self.timestamp,
            self.mood.clone(),
        );

        self.title = Some(representation.title.clone());
        self.body_text = representation.body_text.clone();
        self.timestamp = Some(representation.timestamp);
        self.mood = representation.mood.clone();

        before != (
            self.title.clone(),
            self.body_text.clone(),
            self.timestamp,
            self.mood.clone(),
        )
    }

    /// Whether the content fields equal the given representation.
    pub fn matches(&self, representation: &RemoteRepresentation) -> bool {
        self.identifier == representation.identifier
            && self.title.as_deref() == Some(representation.title.as_str())
            && self.body_text == representation.body_text
            && self.timestamp == Some(representation.timestamp)
            && self.mood == representation.mood
    }
}
