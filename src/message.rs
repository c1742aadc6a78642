//! Normalized message types for the export pipeline.
//!
//! This module provides [`NormalizedMessage`], the uniform representation of a
//! retrieved Telegram message. The normalizer converts raw API records into
//! this structure, and every later stage (filtering, rendering, statistics)
//! works on it exclusively.
//!
//! # Overview
//!
//! A normalized message consists of:
//! - **Identity**: `id` and `timestamp` (source of truth for ordering)
//! - **Content**: `kind`, `text`, optional `media` descriptor
//! - **Flags**: `is_edited`, `is_deleted`, optional `service_action`
//!
//! # Examples
//!
//! ```
//! use chatshift::{MessageKind, NormalizedMessage};
//! use chrono::{TimeZone, Utc};
//!
//! let msg = NormalizedMessage::new(
//!     1,
//!     Utc.with_ymd_and_hms(2023, 6, 1, 21, 10, 0).unwrap(),
//!     "John Doe",
//!     MessageKind::Text,
//! )
//! .with_text("Hello, world!");
//!
//! assert_eq!(msg.sender, "John Doe");
//! assert!(!msg.kind.is_media());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChatshiftError, Result};

/// Sender name substituted when the sender entity cannot be resolved.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Classification of a normalized message.
///
/// This is a closed tagged-variant type: the renderer handles every variant
/// exhaustively, so adding a new kind is a compile-time-checked change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text message
    #[default]
    Text,
    /// Photo attachment
    Photo,
    /// Video attachment
    Video,
    /// Generic file attachment
    Document,
    /// Music / audio file
    Audio,
    /// Recorded voice message
    Voice,
    /// Sticker
    Sticker,
    /// Geo location or venue
    Location,
    /// Shared contact card
    Contact,
    /// Poll
    Poll,
    /// System-generated event (membership change, pin, title edit)
    Service,
    /// Link with a web page preview
    Link,
}

impl MessageKind {
    /// Returns `true` if this kind denotes an attached payload.
    ///
    /// Media kinds are subject to the export filter's media predicate;
    /// [`Text`](MessageKind::Text) and [`Service`](MessageKind::Service)
    /// always pass it.
    pub fn is_media(&self) -> bool {
        !matches!(self, MessageKind::Text | MessageKind::Service)
    }

    /// Returns all message kinds.
    pub fn all() -> &'static [MessageKind] {
        &[
            MessageKind::Text,
            MessageKind::Photo,
            MessageKind::Video,
            MessageKind::Document,
            MessageKind::Audio,
            MessageKind::Voice,
            MessageKind::Sticker,
            MessageKind::Location,
            MessageKind::Contact,
            MessageKind::Poll,
            MessageKind::Service,
            MessageKind::Link,
        ]
    }

    /// Returns all media kinds (the subset for which [`is_media`](Self::is_media) holds).
    pub fn all_media() -> impl Iterator<Item = MessageKind> {
        Self::all().iter().copied().filter(MessageKind::is_media)
    }

    /// Returns all supported kind names.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "text", "photo", "video", "document", "audio", "voice", "sticker", "location",
            "contact", "poll", "service", "link",
        ]
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageKind::Text => "text",
            MessageKind::Photo => "photo",
            MessageKind::Video => "video",
            MessageKind::Document => "document",
            MessageKind::Audio => "audio",
            MessageKind::Voice => "voice",
            MessageKind::Sticker => "sticker",
            MessageKind::Location => "location",
            MessageKind::Contact => "contact",
            MessageKind::Poll => "poll",
            MessageKind::Service => "service",
            MessageKind::Link => "link",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageKind::Text),
            "photo" => Ok(MessageKind::Photo),
            "video" => Ok(MessageKind::Video),
            "document" | "file" => Ok(MessageKind::Document),
            "audio" => Ok(MessageKind::Audio),
            "voice" => Ok(MessageKind::Voice),
            "sticker" => Ok(MessageKind::Sticker),
            "location" | "geo" => Ok(MessageKind::Location),
            "contact" => Ok(MessageKind::Contact),
            "poll" => Ok(MessageKind::Poll),
            "service" => Ok(MessageKind::Service),
            "link" | "webpage" => Ok(MessageKind::Link),
            _ => Err(format!(
                "Unknown message kind: '{}'. Expected one of: {}",
                s,
                MessageKind::all_names().join(", ")
            )),
        }
    }
}

/// Metadata about an attached non-text payload, without the payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// The media class of the attachment.
    pub kind: MessageKind,

    /// Original file name, when the attachment carries one (documents mostly).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub file_name: Option<String>,

    /// Payload size in bytes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub size: Option<u64>,
}

impl MediaDescriptor {
    /// Creates a descriptor with only the media kind.
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            file_name: None,
            size: None,
        }
    }

    /// Builder method to set the file name.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Builder method to set the payload size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// A normalized Telegram message, immutable once constructed.
///
/// Filtering and formatting never mutate a normalized record; each pipeline
/// stage consumes a sequence and produces a new one or an aggregate.
///
/// # Invariants
///
/// - `id` is unique within a chat and increases with history order.
/// - `timestamp` is non-decreasing across a normalized sequence (oldest
///   first, conversational reading order).
/// - `media` is present only when `kind` denotes media; [`validate`](Self::validate)
///   rejects records that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Message identifier, unique within the chat.
    pub id: i64,

    /// When the message was sent. Source of truth for ordering and
    /// date-range filtering.
    pub timestamp: DateTime<Utc>,

    /// Display name of the author, or [`UNKNOWN_SENDER`] when the sender
    /// entity could not be resolved.
    pub sender: String,

    /// Message classification.
    pub kind: MessageKind,

    /// Text payload for text messages, caption for media, empty otherwise.
    #[serde(default)]
    pub text: String,

    /// Attachment metadata, present only for media kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media: Option<MediaDescriptor>,

    /// ID of the message this replies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub reply_to: Option<i64>,

    /// Whether the source system marked this message as edited.
    #[serde(default)]
    pub is_edited: bool,

    /// Whether the source system marked this message as deleted.
    ///
    /// Compatible with `is_edited`: a message may be edited and later
    /// deleted.
    #[serde(default)]
    pub is_deleted: bool,

    /// Human-readable description of a service event, present only when
    /// `kind` is [`Service`](MessageKind::Service).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub service_action: Option<String>,
}

impl NormalizedMessage {
    /// Creates a message with identity and kind; everything else defaulted.
    pub fn new(
        id: i64,
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            id,
            timestamp,
            sender: sender.into(),
            kind,
            text: String::new(),
            media: None,
            reply_to: None,
            is_edited: false,
            is_deleted: false,
            service_action: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the text payload or caption.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method to attach a media descriptor.
    #[must_use]
    pub fn with_media(mut self, media: MediaDescriptor) -> Self {
        self.media = Some(media);
        self
    }

    /// Builder method to set the reply reference.
    #[must_use]
    pub fn with_reply_to(mut self, reply_id: i64) -> Self {
        self.reply_to = Some(reply_id);
        self
    }

    /// Builder method to mark the message as edited.
    #[must_use]
    pub fn edited(mut self) -> Self {
        self.is_edited = true;
        self
    }

    /// Builder method to mark the message as deleted.
    #[must_use]
    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Builder method to set the service action description.
    #[must_use]
    pub fn with_service_action(mut self, action: impl Into<String>) -> Self {
        self.service_action = Some(action.into());
        self
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if this message carries an attached payload.
    pub fn is_media(&self) -> bool {
        self.kind.is_media()
    }

    /// Checks structural invariants and fails loudly on violation.
    ///
    /// # Errors
    ///
    /// Returns [`ChatshiftError::InvalidRecord`] if:
    /// - a non-media kind carries a media descriptor,
    /// - the media descriptor's kind disagrees with the record's kind,
    /// - a service record has no `service_action`,
    /// - a non-service record has a `service_action`.
    pub fn validate(&self) -> Result<()> {
        match &self.media {
            Some(media) if !self.kind.is_media() => {
                return Err(ChatshiftError::invalid_record(
                    self.id,
                    format!(
                        "kind '{}' cannot carry a media descriptor (found '{}')",
                        self.kind, media.kind
                    ),
                ));
            }
            Some(media) if media.kind != self.kind => {
                return Err(ChatshiftError::invalid_record(
                    self.id,
                    format!(
                        "media descriptor kind '{}' disagrees with record kind '{}'",
                        media.kind, self.kind
                    ),
                ));
            }
            _ => {}
        }

        if self.kind == MessageKind::Service && self.service_action.is_none() {
            return Err(ChatshiftError::invalid_record(
                self.id,
                "service record without a service action",
            ));
        }
        if self.kind != MessageKind::Service && self.service_action.is_some() {
            return Err(ChatshiftError::invalid_record(
                self.id,
                format!("kind '{}' cannot carry a service action", self.kind),
            ));
        }

        Ok(())
    }
}
