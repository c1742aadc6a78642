//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Style`] - Built-in export styles
//!
//! The CLI works on a retrieved-message dump (JSON) written by the Telegram
//! client side, so exports are reproducible and the formatting pipeline
//! never touches the network.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::message::MessageKind;
use crate::template::FormatTemplate;

/// Export Telegram chat history into WhatsApp, Telegram, Discord,
/// or custom text formats.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatshift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatshift dump.json
    chatshift dump.json -s telegram -o history.txt
    chatshift dump.json --start-date 2023-06-01 --end-date 2023-06-30
    chatshift dump.json --media photo,video --stats
    chatshift dump.json --no-media
    chatshift dump.json -s custom --pattern '{sender}> {message}'")]
pub struct Args {
    /// Path to the retrieved-message dump (JSON)
    pub input: String,

    /// Path to output file (derived from the chat name when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export style
    #[arg(short, long, value_enum, default_value = "whatsapp")]
    pub style: Style,

    /// Line pattern for the custom style ({date}, {time}, {sender}, {message})
    #[arg(long, value_name = "PATTERN", required_if_eq("style", "custom"))]
    pub pattern: Option<String>,

    /// Date format for the custom style (chrono syntax)
    #[arg(long, value_name = "FMT", default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// Time format for the custom style (chrono syntax)
    #[arg(long, value_name = "FMT", default_value = "%H:%M")]
    pub time_format: String,

    /// Keep only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Keep only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Media kinds to include (default: all)
    #[arg(long, value_delimiter = ',', value_name = "KINDS")]
    pub media: Option<Vec<MessageKind>>,

    /// Exclude all media messages
    #[arg(long, conflicts_with = "media")]
    pub no_media: bool,

    /// Export at most N of the most recent messages (0 for all)
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Output file name template ({chat}, {date})
    #[arg(long, value_name = "TEMPLATE")]
    pub name_template: Option<String>,

    /// Write a statistics summary next to the export
    #[arg(long)]
    pub stats: bool,
}

/// Built-in export styles.
///
/// Each style corresponds to one of the fixed [`FormatTemplate`] instances;
/// [`Custom`](Style::Custom) takes its pattern from `--pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// WhatsApp-style lines with the encryption-notice header
    #[default]
    #[value(alias = "wa")]
    Whatsapp,

    /// Telegram-style bracketed lines
    #[value(alias = "tg")]
    Telegram,

    /// Discord-style blocks with sender grouping
    #[value(alias = "dc")]
    Discord,

    /// Minimal one-line format
    Simple,

    /// WhatsApp lines without the header
    #[value(name = "no-header")]
    NoHeader,

    /// User-supplied pattern (requires --pattern)
    Custom,
}

impl Style {
    /// Returns the built-in template for this style, or `None` for
    /// [`Custom`](Style::Custom).
    pub fn template(&self) -> Option<FormatTemplate> {
        match self {
            Style::Whatsapp => Some(FormatTemplate::whatsapp()),
            Style::Telegram => Some(FormatTemplate::telegram()),
            Style::Discord => Some(FormatTemplate::discord()),
            Style::Simple => Some(FormatTemplate::simple()),
            Style::NoHeader => Some(FormatTemplate::no_header()),
            Style::Custom => None,
        }
    }

    /// Returns all supported style names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &[
            "whatsapp", "wa", "telegram", "tg", "discord", "dc", "simple", "no-header", "custom",
        ]
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Whatsapp => write!(f, "WhatsApp"),
            Style::Telegram => write!(f, "Telegram"),
            Style::Discord => write!(f, "Discord"),
            Style::Simple => write!(f, "Simple"),
            Style::NoHeader => write!(f, "NoHeader"),
            Style::Custom => write!(f, "Custom"),
        }
    }
}

impl std::str::FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Style::Whatsapp),
            "telegram" | "tg" => Ok(Style::Telegram),
            "discord" | "dc" => Ok(Style::Discord),
            "simple" => Ok(Style::Simple),
            "no-header" | "noheader" => Ok(Style::NoHeader),
            "custom" => Ok(Style::Custom),
            _ => Err(format!(
                "Unknown style: '{}'. Expected one of: {}",
                s,
                Style::all_names().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_display() {
        assert_eq!(Style::Whatsapp.to_string(), "WhatsApp");
        assert_eq!(Style::NoHeader.to_string(), "NoHeader");
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("whatsapp".parse::<Style>().unwrap(), Style::Whatsapp);
        assert_eq!("wa".parse::<Style>().unwrap(), Style::Whatsapp);
        assert_eq!("tg".parse::<Style>().unwrap(), Style::Telegram);
        assert_eq!("no-header".parse::<Style>().unwrap(), Style::NoHeader);
        assert!("markdown".parse::<Style>().is_err());
    }

    #[test]
    fn test_builtin_templates() {
        assert_eq!(Style::Whatsapp.template().unwrap().name, "WhatsApp");
        assert_eq!(Style::Discord.template().unwrap().name, "Discord");
        assert!(Style::Custom.template().is_none());
    }

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::try_parse_from(["chatshift", "dump.json"]).unwrap();
        assert_eq!(args.input, "dump.json");
        assert_eq!(args.style, Style::Whatsapp);
        assert_eq!(args.limit, 0);
        assert!(!args.stats);
        assert!(args.media.is_none());
    }

    #[test]
    fn test_args_media_list() {
        let args =
            Args::try_parse_from(["chatshift", "dump.json", "--media", "photo,video"]).unwrap();
        let kinds = args.media.unwrap();
        assert_eq!(kinds, vec![MessageKind::Photo, MessageKind::Video]);
    }

    #[test]
    fn test_args_media_conflicts_with_no_media() {
        let result = Args::try_parse_from([
            "chatshift",
            "dump.json",
            "--media",
            "photo",
            "--no-media",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_style_serde() {
        let json = serde_json::to_string(&Style::Telegram).unwrap();
        assert_eq!(json, "\"telegram\"");
        let parsed: Style = serde_json::from_str("\"whatsapp\"").unwrap();
        assert_eq!(parsed, Style::Whatsapp);
    }
}
