//! Raw message records and the normalizer.
//!
//! The retrieval collaborator (the Telegram API client) hands the core an
//! ordered sequence of [`RawMessage`] records, newest first, the way the API
//! delivers history. [`normalize_all`] converts them into
//! [`NormalizedMessage`] records in conversational reading order (oldest
//! first).
//!
//! Sender references are resolved through the [`SenderResolver`] trait. The
//! lookup is fallible by design: an unresolvable sender degrades to the
//! literal `"Unknown"` instead of failing the export.
//!
//! # Kind precedence
//!
//! The normalizer determines [`MessageKind`] by a fixed precedence:
//! deletion flag, then service action, then media attachment (sub-typed by
//! media class), then plain text. A deleted record keeps `kind = Text` and
//! drops its attachment metadata; the deletion flag is what the renderer
//! checks first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{MediaDescriptor, MessageKind, NormalizedMessage, UNKNOWN_SENDER};

/// Media class of a raw attachment, as reported by the retrieval collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawMediaKind {
    Photo,
    Video,
    Document,
    Audio,
    Voice,
    Sticker,
    Location,
    Contact,
    Poll,
    /// Web page preview attached to a link message
    Webpage,
}

impl RawMediaKind {
    /// Maps the raw media class to the normalized message kind.
    pub fn message_kind(self) -> MessageKind {
        match self {
            RawMediaKind::Photo => MessageKind::Photo,
            RawMediaKind::Video => MessageKind::Video,
            RawMediaKind::Document => MessageKind::Document,
            RawMediaKind::Audio => MessageKind::Audio,
            RawMediaKind::Voice => MessageKind::Voice,
            RawMediaKind::Sticker => MessageKind::Sticker,
            RawMediaKind::Location => MessageKind::Location,
            RawMediaKind::Contact => MessageKind::Contact,
            RawMediaKind::Poll => MessageKind::Poll,
            RawMediaKind::Webpage => MessageKind::Link,
        }
    }
}

/// Attachment metadata on a raw message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMedia {
    /// Media class of the attachment
    pub kind: RawMediaKind,

    /// Original file name, if the attachment has one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub file_name: Option<String>,

    /// Payload size in bytes, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub size: Option<u64>,
}

/// A system-generated chat event.
///
/// Closed variant set so the phrasing table below is exhaustive; actions the
/// collaborator reports outside this set arrive as [`Other`](ServiceAction::Other).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    ChatCreate,
    AddUser,
    DeleteUser,
    JoinedByLink,
    EditTitle { title: String },
    EditPhoto,
    DeletePhoto,
    PinMessage,
    Other(String),
}

impl ServiceAction {
    /// Returns the human-readable phrase rendered into the export.
    pub fn describe(&self) -> String {
        match self {
            ServiceAction::ChatCreate => "created this group".to_string(),
            ServiceAction::AddUser => "added a participant to the group".to_string(),
            ServiceAction::DeleteUser => "removed a participant from the group".to_string(),
            ServiceAction::JoinedByLink => "joined the group by link".to_string(),
            ServiceAction::EditTitle { title } => {
                format!("changed the group name to {title}")
            }
            ServiceAction::EditPhoto => "changed the group photo".to_string(),
            ServiceAction::DeletePhoto => "removed the group photo".to_string(),
            ServiceAction::PinMessage => "pinned a message".to_string(),
            ServiceAction::Other(name) => format!("performed action: {name}"),
        }
    }
}

/// One raw message as exposed by the retrieval collaborator.
///
/// Deserializable so a dump of already-retrieved messages can drive the CLI
/// and the test suites without touching the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message identifier within the chat
    pub id: i64,

    /// When the message was sent
    pub date: DateTime<Utc>,

    /// Reference to the sender entity, if any (service messages and channel
    /// posts may have none)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender_id: Option<i64>,

    /// Display name, when the dump already carries it inline
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender_name: Option<String>,

    /// Text payload or media caption
    #[serde(default)]
    pub text: String,

    /// Attachment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media: Option<RawMedia>,

    /// ID of the replied-to message
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub reply_to: Option<i64>,

    /// Set when the message has an edit date
    #[serde(default)]
    pub edited: bool,

    /// Set when the source marked the message deleted
    #[serde(default)]
    pub deleted: bool,

    /// Service event, if this is a system-generated record
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub action: Option<ServiceAction>,
}

/// A retrieved chat: title plus its raw messages, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChat {
    /// Chat display name
    pub name: String,

    /// Raw messages in API delivery order (newest first)
    pub messages: Vec<RawMessage>,
}

#[cfg(feature = "json-input")]
impl RawChat {
    /// Reads a retrieved-message dump from a JSON file.
    ///
    /// The dump is what the retrieval collaborator persisted: a chat name
    /// and its messages in API delivery order.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Resolves a sender reference to a display name.
///
/// The lookup is fallible; [`normalize`] substitutes [`UNKNOWN_SENDER`] on
/// failure rather than failing the export.
pub trait SenderResolver {
    /// Looks up the display name for a sender reference.
    fn resolve(&self, sender_id: i64) -> Option<String>;
}

/// Resolver that never resolves anything.
///
/// Useful when the dump carries display names inline, or in tests that
/// exercise the `"Unknown"` fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl SenderResolver for NullResolver {
    fn resolve(&self, _sender_id: i64) -> Option<String> {
        None
    }
}

impl SenderResolver for std::collections::HashMap<i64, String> {
    fn resolve(&self, sender_id: i64) -> Option<String> {
        self.get(&sender_id).cloned()
    }
}

/// Converts one raw message into a normalized record.
///
/// Total over any well-formed raw message and free of side effects. Sender
/// resolution order: inline display name, then the resolver, then
/// [`UNKNOWN_SENDER`].
pub fn normalize<R: SenderResolver>(raw: &RawMessage, resolver: &R) -> NormalizedMessage {
    let sender = raw
        .sender_name
        .clone()
        .or_else(|| raw.sender_id.and_then(|id| resolver.resolve(id)))
        .unwrap_or_else(|| UNKNOWN_SENDER.to_string());

    // Fixed kind precedence: deleted, service, media, text.
    let mut msg = if raw.deleted {
        NormalizedMessage::new(raw.id, raw.date, sender, MessageKind::Text).deleted()
    } else if let Some(action) = &raw.action {
        NormalizedMessage::new(raw.id, raw.date, sender, MessageKind::Service)
            .with_service_action(action.describe())
    } else if let Some(media) = &raw.media {
        let kind = media.kind.message_kind();
        let mut descriptor = MediaDescriptor::new(kind);
        descriptor.file_name = media.file_name.clone();
        descriptor.size = media.size;
        NormalizedMessage::new(raw.id, raw.date, sender, kind)
            .with_text(raw.text.clone())
            .with_media(descriptor)
    } else {
        NormalizedMessage::new(raw.id, raw.date, sender, MessageKind::Text)
            .with_text(raw.text.clone())
    };

    msg.reply_to = raw.reply_to;
    if raw.edited {
        msg.is_edited = true;
    }
    msg
}

/// Normalizes a retrieved sequence into conversational reading order.
///
/// The retrieval collaborator delivers history newest first; the export
/// preserves source chronological order, oldest first. Any prefix of a valid
/// retrieval (e.g. after an interrupted download) is a valid input.
pub fn normalize_all<R: SenderResolver>(raw: &[RawMessage], resolver: &R) -> Vec<NormalizedMessage> {
    raw.iter().rev().map(|m| normalize(m, resolver)).collect()
}
