//! Format templates controlling how messages render into text.
//!
//! A [`FormatTemplate`] is a named configuration: a date format, a time
//! format, a line pattern with `{date}`, `{time}`, `{sender}` and
//! `{message}` placeholders, and optional header settings. Built-in
//! templates are fixed instances; [`FormatTemplate::custom`] accepts a
//! user-supplied pattern at runtime.
//!
//! Custom patterns may use any placeholder in any order, repeat them, or
//! omit them entirely. Unknown placeholders are rejected with
//! [`ChatshiftError::InvalidTemplate`] before any rendering begins.
//!
//! # Example
//!
//! ```
//! use chatshift::template::FormatTemplate;
//!
//! let wa = FormatTemplate::whatsapp();
//! assert!(wa.include_header);
//! assert_eq!(wa.line_pattern, "{date}, {time} - {sender}: {message}");
//!
//! let custom = FormatTemplate::custom("{sender}> {message}", "%Y-%m-%d", "%H:%M")?;
//! assert!(!custom.include_header);
//! # Ok::<(), chatshift::ChatshiftError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatshiftError, Result};

/// The WhatsApp export preamble, emitted verbatim as the header line.
pub const WHATSAPP_HEADER: &str = "Messages and calls are end-to-end encrypted. \
     No one outside of this chat, not even WhatsApp, can read or listen to them. \
     Tap to learn more.";

/// Placeholder names a line pattern may reference.
const PLACEHOLDERS: &[&str] = &["date", "time", "sender", "message"];

/// A named set of formatting rules, constructed once per export run and
/// read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatTemplate {
    /// Template name, for display and diagnostics.
    pub name: String,

    /// chrono format string for the `{date}` placeholder.
    pub date_format: String,

    /// chrono format string for the `{time}` placeholder.
    pub time_format: String,

    /// Line pattern with `{date}`, `{time}`, `{sender}`, `{message}`
    /// placeholders.
    pub line_pattern: String,

    /// Pattern used instead of `line_pattern` for consecutive messages from
    /// the same sender. `None` disables sender grouping.
    pub continuation_pattern: Option<String>,

    /// Whether to emit `header_text` once, before the first message.
    pub include_header: bool,

    /// Header text, emitted verbatim when `include_header` is set.
    pub header_text: String,
}

impl FormatTemplate {
    /// WhatsApp-style export: `01/06/23, 21:10 - John Doe: Hello` with the
    /// encryption-notice header.
    pub fn whatsapp() -> Self {
        Self {
            name: "WhatsApp".to_string(),
            date_format: "%d/%m/%y".to_string(),
            time_format: "%H:%M".to_string(),
            line_pattern: "{date}, {time} - {sender}: {message}".to_string(),
            continuation_pattern: None,
            include_header: true,
            header_text: WHATSAPP_HEADER.to_string(),
        }
    }

    /// Telegram-style export: `[01.06.2023 21:10] John Doe: Hello`.
    pub fn telegram() -> Self {
        Self {
            name: "Telegram".to_string(),
            date_format: "%d.%m.%Y".to_string(),
            time_format: "%H:%M".to_string(),
            line_pattern: "[{date} {time}] {sender}: {message}".to_string(),
            continuation_pattern: None,
            include_header: false,
            header_text: String::new(),
        }
    }

    /// Discord-style export with sender grouping: a header line per sender
    /// run, message bodies below it.
    ///
    /// ```text
    /// [2023-06-01 21:10] John Doe
    /// Hello
    /// Still me
    /// ```
    pub fn discord() -> Self {
        Self {
            name: "Discord".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
            line_pattern: "[{date} {time}] {sender}\n{message}".to_string(),
            continuation_pattern: Some("{message}".to_string()),
            include_header: false,
            header_text: String::new(),
        }
    }

    /// Minimal export: `2023-06-01 21:10:00 John Doe: Hello`.
    pub fn simple() -> Self {
        Self {
            name: "Simple".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),
            line_pattern: "{date} {time} {sender}: {message}".to_string(),
            continuation_pattern: None,
            include_header: false,
            header_text: String::new(),
        }
    }

    /// WhatsApp line format without the encryption-notice header.
    pub fn no_header() -> Self {
        Self {
            name: "NoHeader".to_string(),
            include_header: false,
            header_text: String::new(),
            ..Self::whatsapp()
        }
    }

    /// User-supplied template.
    ///
    /// The pattern may substitute any of the four placeholders in any
    /// order, multiple times, or omit them.
    ///
    /// # Errors
    ///
    /// Returns [`ChatshiftError::InvalidTemplate`] when the pattern
    /// references an unknown placeholder.
    pub fn custom(
        line_pattern: impl Into<String>,
        date_format: impl Into<String>,
        time_format: impl Into<String>,
    ) -> Result<Self> {
        let line_pattern = line_pattern.into();
        validate_pattern(&line_pattern)?;
        Ok(Self {
            name: "Custom".to_string(),
            date_format: date_format.into(),
            time_format: time_format.into(),
            line_pattern,
            continuation_pattern: None,
            include_header: false,
            header_text: String::new(),
        })
    }

    /// Builder method to enable a header with the given text.
    #[must_use]
    pub fn with_header(mut self, text: impl Into<String>) -> Self {
        self.include_header = true;
        self.header_text = text.into();
        self
    }

    /// Returns `true` if this template groups consecutive same-sender
    /// messages.
    pub fn groups_senders(&self) -> bool {
        self.continuation_pattern.is_some()
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::whatsapp()
    }
}

/// Checks that every `{...}` token in the pattern names a known placeholder.
///
/// # Errors
///
/// Returns [`ChatshiftError::InvalidTemplate`] naming the first unknown
/// placeholder encountered.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(ChatshiftError::invalid_template(&after[..], pattern));
        };
        let name = &after[..close];
        if !PLACEHOLDERS.contains(&name) {
            return Err(ChatshiftError::invalid_template(name, pattern));
        }
        rest = &after[close + 1..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(FormatTemplate::whatsapp().name, "WhatsApp");
        assert_eq!(FormatTemplate::telegram().name, "Telegram");
        assert_eq!(FormatTemplate::discord().name, "Discord");
        assert_eq!(FormatTemplate::simple().name, "Simple");
        assert_eq!(FormatTemplate::no_header().name, "NoHeader");
    }

    #[test]
    fn test_only_whatsapp_has_header() {
        assert!(FormatTemplate::whatsapp().include_header);
        assert!(!FormatTemplate::telegram().include_header);
        assert!(!FormatTemplate::discord().include_header);
        assert!(!FormatTemplate::simple().include_header);
        assert!(!FormatTemplate::no_header().include_header);
    }

    #[test]
    fn test_no_header_keeps_whatsapp_line() {
        assert_eq!(
            FormatTemplate::no_header().line_pattern,
            FormatTemplate::whatsapp().line_pattern
        );
    }

    #[test]
    fn test_only_discord_groups() {
        assert!(FormatTemplate::discord().groups_senders());
        assert!(!FormatTemplate::whatsapp().groups_senders());
    }

    #[test]
    fn test_custom_accepts_reordered_and_repeated() {
        assert!(FormatTemplate::custom("{message} -- {sender}", "%F", "%R").is_ok());
        assert!(FormatTemplate::custom("{sender} {sender}: {message}", "%F", "%R").is_ok());
        // Omitting placeholders is allowed too
        assert!(FormatTemplate::custom("line with no placeholders", "%F", "%R").is_ok());
    }

    #[test]
    fn test_custom_rejects_unknown_placeholder() {
        let err = FormatTemplate::custom("{date} {user}: {message}", "%F", "%R").unwrap_err();
        match err {
            ChatshiftError::InvalidTemplate { placeholder, .. } => {
                assert_eq!(placeholder, "user");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_brace_rejected() {
        assert!(validate_pattern("{date} {sender").is_err());
    }

    #[test]
    fn test_validate_all_builtins() {
        for template in [
            FormatTemplate::whatsapp(),
            FormatTemplate::telegram(),
            FormatTemplate::discord(),
            FormatTemplate::simple(),
            FormatTemplate::no_header(),
        ] {
            assert!(validate_pattern(&template.line_pattern).is_ok());
            if let Some(cont) = &template.continuation_pattern {
                assert!(validate_pattern(cont).is_ok());
            }
        }
    }

    #[test]
    fn test_with_header() {
        let t = FormatTemplate::simple().with_header("Exported history");
        assert!(t.include_header);
        assert_eq!(t.header_text, "Exported history");
    }
}
