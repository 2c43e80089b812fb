//! Records shared by the mention extractor and the notification renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::NotifyError;

/// Identifier of a user account.
pub type ActorId = u64;

/// A user that can write content and be mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Display name, also used as the `@handle`.
    pub nick_name: String,
}

/// Kind of content a mention originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    CourseComment,
    VideoComment,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseComment => "CourseComment",
            Self::VideoComment => "VideoComment",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CourseComment" => Ok(Self::CourseComment),
            "VideoComment" => Ok(Self::VideoComment),
            other => Err(NotifyError::UnknownSourceType {
                from_type: other.to_string(),
            }),
        }
    }
}

/// Raw `@handle` occurrence found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionCandidate {
    pub handle: String,
    /// Byte offset of the handle (after `@`) in the scanned text.
    pub offset: usize,
}

/// Candidate that matched an existing actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMention {
    pub handle: String,
    pub target: ActorId,
}

/// Where a piece of text was written and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionContext {
    pub from_user: ActorId,
    pub from_id: u64,
    pub from_type: SourceType,
}

/// Event published once per mentioned actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionEvent {
    pub from_user: ActorId,
    pub target: ActorId,
    pub from_id: u64,
    pub from_type: SourceType,
    pub created_at: DateTime<Utc>,
}

impl MentionEvent {
    pub fn new(context: &MentionContext, target: ActorId) -> Self {
        Self {
            from_user: context.from_user,
            target,
            from_id: context.from_id,
            from_type: context.from_type,
            created_at: Utc::now(),
        }
    }

    /// Notification payload a consumer stores for the mentioned actor.
    pub fn payload(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("from_user_id".to_string(), Value::from(self.from_user));
        data.insert("from_id".to_string(), Value::from(self.from_id));
        data.insert(
            "from_type".to_string(),
            Value::from(self.from_type.as_str()),
        );
        data
    }
}

/// Stored notification as read back from the notification store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub id: String,
    /// Recipient of the notification.
    pub notifiable_id: ActorId,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl NotificationRecord {
    pub fn from_event(id: impl Into<String>, event: &MentionEvent) -> Self {
        Self {
            id: id.into(),
            notifiable_id: event.target,
            data: event.payload(),
        }
    }

    /// Actor who wrote the mention.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::MalformedPayload`] if the field is missing or not an id.
    pub fn from_user_id(&self) -> Result<ActorId, NotifyError> {
        self.id_field("from_user_id")
    }

    /// Identifier of the source entity.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::MalformedPayload`] if the field is missing or not an id.
    pub fn from_id(&self) -> Result<u64, NotifyError> {
        self.id_field("from_id")
    }

    /// Raw source type tag, recognized or not.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::MalformedPayload`] if the field is missing or not a string.
    pub fn from_type(&self) -> Result<&str, NotifyError> {
        self.data
            .get("from_type")
            .and_then(Value::as_str)
            .ok_or(NotifyError::MalformedPayload { field: "from_type" })
    }

    // Ids written by older producers may be numeric strings.
    fn id_field(&self, field: &'static str) -> Result<u64, NotifyError> {
        let value = self.data.get(field);
        value
            .and_then(Value::as_u64)
            .or_else(|| value.and_then(Value::as_str)?.trim().parse().ok())
            .ok_or(NotifyError::MalformedPayload { field })
    }
}
