//! # Chatshift
//!
//! A Rust library for exporting Telegram chat history into text-based
//! formats: WhatsApp-style, Telegram-style, Discord-style, Simple, or a
//! custom template.
//!
//! ## Overview
//!
//! The library is a pure, synchronous pipeline over already-retrieved
//! messages. A Telegram API client (the retrieval collaborator) hands it raw
//! message records; chatshift normalizes them, filters them by date range
//! and media kind, renders them with a format template, and optionally
//! aggregates statistics:
//!
//! ```text
//! raw messages -> normalize -> filter -> { render -> export text
//!                                          aggregate -> statistics }
//! ```
//!
//! No stage performs network or file I/O; each consumes an immutable
//! sequence and produces a new one, so every stage is independently
//! testable and safely callable on a partial retrieval.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatshift::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! fn main() -> chatshift::Result<()> {
//!     let ts = Utc.with_ymd_and_hms(2023, 6, 1, 21, 10, 0).unwrap();
//!     let messages = vec![
//!         NormalizedMessage::new(1, ts, "John Doe", MessageKind::Text)
//!             .with_text("Hello, world!"),
//!     ];
//!
//!     let filter = ExportFilter::new().with_start_date("2023-06-01")?;
//!     filter.validate()?;
//!
//!     let filtered = apply_filter(messages, &filter);
//!     let text = render(&filtered, &FormatTemplate::whatsapp());
//!     let stats = aggregate(&filtered);
//!
//!     assert!(text.contains("John Doe: Hello, world!"));
//!     assert_eq!(stats.total(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] - [`NormalizedMessage`], [`MessageKind`], [`MediaDescriptor`]
//! - [`raw`] - raw records from the retrieval collaborator and
//!   [`normalize_all`](raw::normalize_all)
//! - [`filter`] - [`ExportFilter`], [`apply_filter`](filter::apply_filter)
//! - [`template`] - [`FormatTemplate`](template::FormatTemplate) built-ins and custom templates
//! - [`render`] - [`render`](render::render), streaming [`Renderer`](render::Renderer),
//!   WhatsApp round-trip parsing
//! - [`naming`] - [`name_file`](naming::name_file)
//! - [`stats`] - [`ExportStatistics`](stats::ExportStatistics), [`aggregate`](stats::aggregate)
//! - [`output`] - export and statistics file writers
//! - [`error`] - unified error types ([`ChatshiftError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod error;
pub mod filter;
pub mod message;
pub mod naming;
pub mod output;
pub mod raw;
pub mod render;
pub mod stats;
pub mod template;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export the main types at the crate root for convenience
pub use error::{ChatshiftError, Result};
pub use message::{MediaDescriptor, MessageKind, NormalizedMessage};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatshift::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::message::{MediaDescriptor, MessageKind, NormalizedMessage, UNKNOWN_SENDER};

    // Error types
    pub use crate::error::{ChatshiftError, Result};

    // Normalization
    pub use crate::raw::{
        NullResolver, RawChat, RawMessage, SenderResolver, normalize, normalize_all,
    };

    // Filtering
    pub use crate::filter::{ExportFilter, apply_filter};

    // Templates and rendering
    pub use crate::render::{Renderer, parse_whatsapp_line, render, render_to};
    pub use crate::template::FormatTemplate;

    // File naming
    pub use crate::naming::name_file;

    // Statistics
    pub use crate::stats::{ExportStatistics, aggregate};

    // Output writers
    pub use crate::output::{write_export, write_stats};
}
