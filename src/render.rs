//! Render normalized messages into text per a format template.
//!
//! Every message kind renders to *something*: media becomes a literal
//! placeholder marker, deleted messages become a literal deletion marker,
//! service messages render their action text verbatim, and edited messages
//! get an edited-suffix appended. Rendering is pure and per-message
//! order-independent, except for sender grouping (Discord style) which is
//! an explicit single-pass fold carrying the last sender.
//!
//! # Marker precedence
//!
//! Deletion wins over everything: a message that is both edited and deleted
//! renders the deletion marker alone, with no edited suffix. This precedence
//! is deterministic and covered by tests.
//!
//! # Example
//!
//! ```
//! use chatshift::render::render;
//! use chatshift::template::FormatTemplate;
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
//! let out = render(&[msg], &FormatTemplate::no_header());
//! assert_eq!(out, "01/06/23, 21:10 - John Doe: Hello, world!\n");
//! ```

use std::io::Write;

use regex::Regex;

use crate::error::Result;
use crate::message::{MessageKind, NormalizedMessage};
use crate::template::FormatTemplate;

/// Marker rendered in place of a deleted message's content.
pub const DELETED_MARKER: &str = "This message was deleted";

/// Suffix appended to edited, non-deleted messages.
pub const EDITED_SUFFIX: &str = " <This message was edited>";

/// Marker rendered for records with no representable content.
pub const EMPTY_MARKER: &str = "<Message>";

/// Returns the content portion of a rendered message: the text itself, a
/// media marker, the service action, or the deletion marker.
///
/// Never returns an empty string.
fn message_content(msg: &NormalizedMessage) -> String {
    if msg.is_deleted {
        return DELETED_MARKER.to_string();
    }

    let content = match msg.kind {
        MessageKind::Text => {
            if msg.text.is_empty() {
                EMPTY_MARKER.to_string()
            } else {
                msg.text.clone()
            }
        }
        MessageKind::Service => msg
            .service_action
            .clone()
            .unwrap_or_else(|| EMPTY_MARKER.to_string()),
        MessageKind::Photo | MessageKind::Video => "<Media omitted>".to_string(),
        MessageKind::Document => match msg.media.as_ref().and_then(|m| m.file_name.as_deref()) {
            Some(name) => format!("<File: {name} omitted>"),
            None => "<Media omitted>".to_string(),
        },
        MessageKind::Audio => "<Audio omitted>".to_string(),
        MessageKind::Voice => "<Voice message omitted>".to_string(),
        MessageKind::Sticker => "<Sticker omitted>".to_string(),
        MessageKind::Location => "<Location omitted>".to_string(),
        MessageKind::Contact => "<Contact omitted>".to_string(),
        MessageKind::Poll => "<Poll omitted>".to_string(),
        // Links keep their text when present, like WhatsApp link previews
        MessageKind::Link => {
            if msg.text.is_empty() {
                "<Link omitted>".to_string()
            } else {
                msg.text.clone()
            }
        }
    };

    if msg.is_edited {
        format!("{content}{EDITED_SUFFIX}")
    } else {
        content
    }
}

/// Substitutes the four placeholders into a line pattern.
///
/// Handles reordering, repetition, and omission; anything outside a known
/// placeholder is copied through verbatim.
fn substitute(pattern: &str, date: &str, time: &str, sender: &str, message: &str) -> String {
    pattern
        .replace("{date}", date)
        .replace("{time}", time)
        .replace("{sender}", sender)
        .replace("{message}", message)
}

/// Streaming renderer: an explicit fold carrying the last sender, for
/// templates that group consecutive messages.
///
/// Sender grouping requires sequential single-pass processing, so the
/// renderer is constructed once and fed messages in order.
///
/// # Example
///
/// ```
/// use chatshift::render::Renderer;
/// use chatshift::template::FormatTemplate;
/// # use chatshift::{MessageKind, NormalizedMessage};
/// # use chrono::{TimeZone, Utc};
///
/// let template = FormatTemplate::discord();
/// let mut renderer = Renderer::new(&template);
/// # let ts = Utc.with_ymd_and_hms(2023, 6, 1, 21, 10, 0).unwrap();
/// # let first = NormalizedMessage::new(1, ts, "Alice", MessageKind::Text).with_text("hi");
/// # let second = NormalizedMessage::new(2, ts, "Alice", MessageKind::Text).with_text("again");
///
/// let block = renderer.push(&first);   // "[2023-06-01 21:10] Alice\nhi"
/// let grouped = renderer.push(&second); // "again"
/// # assert!(block.contains("Alice"));
/// # assert_eq!(grouped, "again");
/// ```
#[derive(Debug)]
pub struct Renderer<'a> {
    template: &'a FormatTemplate,
    last_sender: Option<String>,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer for the given template.
    pub fn new(template: &'a FormatTemplate) -> Self {
        Self {
            template,
            last_sender: None,
        }
    }

    /// Returns the header block, if the template asks for one.
    pub fn header(&self) -> Option<&str> {
        if self.template.include_header {
            Some(&self.template.header_text)
        } else {
            None
        }
    }

    /// Renders one message and advances the grouping state.
    ///
    /// The returned block is never empty.
    pub fn push(&mut self, msg: &NormalizedMessage) -> String {
        let content = message_content(msg);
        let date = msg.timestamp.format(&self.template.date_format).to_string();
        let time = msg.timestamp.format(&self.template.time_format).to_string();

        let grouped = self
            .template
            .continuation_pattern
            .as_deref()
            .filter(|_| self.last_sender.as_deref() == Some(msg.sender.as_str()));

        let pattern = grouped.unwrap_or(&self.template.line_pattern);
        let block = substitute(pattern, &date, &time, &msg.sender, &content);

        self.last_sender = Some(msg.sender.clone());

        // A pattern that omits every placeholder still has its literal text;
        // guard the pathological all-empty case so no message vanishes.
        if block.is_empty() {
            content
        } else {
            block
        }
    }
}

/// Renders a filtered message sequence into one text blob.
///
/// The header (when the template has one) is a one-time prefix; each message
/// contributes one block terminated by a newline.
pub fn render(messages: &[NormalizedMessage], template: &FormatTemplate) -> String {
    let mut renderer = Renderer::new(template);
    let mut out = String::new();

    if let Some(header) = renderer.header() {
        out.push_str(header);
        out.push('\n');
    }
    for msg in messages {
        out.push_str(&renderer.push(msg));
        out.push('\n');
    }
    out
}

/// Streaming variant of [`render`]: writes blocks as they are produced
/// instead of accumulating the whole export in memory.
pub fn render_to<W: Write>(
    messages: &[NormalizedMessage],
    template: &FormatTemplate,
    writer: &mut W,
) -> Result<()> {
    let mut renderer = Renderer::new(template);

    if let Some(header) = renderer.header() {
        writeln!(writer, "{header}")?;
    }
    for msg in messages {
        let block = renderer.push(msg);
        writeln!(writer, "{block}")?;
    }
    Ok(())
}

/// The fields recovered from a WhatsApp-style rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Date component, as rendered (`DD/MM/YY`)
    pub date: String,
    /// Time component, as rendered (`HH:MM`)
    pub time: String,
    /// Sender display name
    pub sender: String,
    /// Message content, markers and suffixes included
    pub message: String,
}

/// Parses a WhatsApp-style line back into its components.
///
/// Provided for round-trip verification: rendering with
/// [`FormatTemplate::whatsapp`] and re-parsing recovers the original date,
/// sender, and message text exactly. Returns `None` for lines that don't
/// match (e.g. the header).
pub fn parse_whatsapp_line(line: &str) -> Option<ParsedLine> {
    // 01/06/23, 21:10 - John Doe: Hello
    static PATTERN: &str = r"^(\d{2}/\d{2}/\d{2}), (\d{2}:\d{2}) - ([^:]+): (.*)$";
    let regex = Regex::new(PATTERN).ok()?;
    let caps = regex.captures(line)?;

    Some(ParsedLine {
        date: caps.get(1)?.as_str().to_string(),
        time: caps.get(2)?.as_str().to_string(),
        sender: caps.get(3)?.as_str().to_string(),
        message: caps.get(4)?.as_str().to_string(),
    })
}
