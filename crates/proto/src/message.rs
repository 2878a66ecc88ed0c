use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Creates a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the raw session identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Typed or selected by the end user.
    User,
    /// Produced by a backend exchange (answer, notice, or failure text).
    Bot,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::User => write!(f, "user"),
            Origin::Bot => write!(f, "bot"),
        }
    }
}

impl std::str::FromStr for Origin {
    type Err = crate::error::ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Origin::User),
            "bot" => Ok(Origin::Bot),
            other => Err(crate::error::ProtoError::InvalidOrigin(other.to_string())),
        }
    }
}

/// Message payload. A message carries text or an image, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// Non-empty text.
    Text(String),
    /// URL of a generated image.
    Image(String),
}

impl Content {
    /// Text content, or `None` when the value is missing or empty.
    pub fn text(value: Option<String>) -> Option<Self> {
        value.filter(|s| !s.is_empty()).map(Content::Text)
    }

    /// Image content, or `None` when the URL is missing or empty.
    pub fn image(url: Option<String>) -> Option<Self> {
        url.filter(|s| !s.is_empty()).map(Content::Image)
    }

    /// Returns the text if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Image(_) => None,
        }
    }

    /// Returns the image URL if this is image content.
    pub fn as_image(&self) -> Option<&str> {
        match self {
            Content::Image(url) => Some(url),
            Content::Text(_) => None,
        }
    }
}

/// A single entry in a session's conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message id.
    pub id: String,
    /// Session that owns this message.
    pub session_id: SessionId,
    /// Author of the message.
    pub origin: Origin,
    /// Payload; `None` when a backend answered without the expected field.
    pub content: Option<Content>,
    /// Message creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message with arbitrary content.
    pub fn new(session_id: SessionId, origin: Origin, content: Option<Content>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            origin,
            content,
            created_at: Utc::now(),
        }
    }

    /// Creates a user text message.
    pub fn user(session_id: SessionId, text: impl Into<String>) -> Self {
        Self::new(session_id, Origin::User, Content::text(Some(text.into())))
    }

    /// Creates a bot text message.
    pub fn bot(session_id: SessionId, text: impl Into<String>) -> Self {
        Self::new(session_id, Origin::Bot, Content::text(Some(text.into())))
    }

    /// Text payload, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::as_text)
    }

    /// Image URL payload, if any.
    pub fn image(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::as_image)
    }
}

/// Append-only, chronologically ordered message log.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end of the log.
    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Messages in insertion order.
    pub fn as_slice(&self) -> &[Message] {
        &self.entries
    }

    /// Iterates messages in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.entries.iter()
    }
}
