//! Filter messages by date range and media kind.
//!
//! This module provides [`ExportFilter`] for defining filter criteria and
//! [`apply_filter`] for filtering normalized message sequences.
//!
//! # Filter Behavior
//!
//! - Date bounds are **inclusive** and compare calendar dates, not
//!   time-of-day, so a boundary date keeps its whole day.
//! - The media predicate only applies to media kinds: text and service
//!   messages always pass it.
//! - An **empty** media set excludes all media but keeps non-media messages.
//!   It does not mean "exclude everything".
//! - Filtering is stable: order is preserved and no records are invented or
//!   duplicated, so applying the same filter twice is a no-op.
//!
//! # Examples
//!
//! ```
//! use chatshift::filter::{ExportFilter, apply_filter};
//! use chatshift::{MessageKind, NormalizedMessage};
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatshift::Result<()> {
//! let messages = vec![
//!     NormalizedMessage::new(1, Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap(), "Alice", MessageKind::Text)
//!         .with_text("hi"),
//!     NormalizedMessage::new(2, Utc.with_ymd_and_hms(2023, 6, 3, 9, 0, 0).unwrap(), "Bob", MessageKind::Text)
//!         .with_text("late"),
//! ];
//!
//! let filter = ExportFilter::new()
//!     .with_start_date("2023-06-01")?
//!     .with_end_date("2023-06-02")?;
//! filter.validate()?;
//!
//! let filtered = apply_filter(messages, &filter);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "hi");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{ChatshiftError, Result};
use crate::message::{MessageKind, NormalizedMessage};

/// Criteria deciding which normalized messages survive into the export.
///
/// Constructed from user input before retrieval begins and immutable during
/// a single export. Absence of a date bound means unbounded on that side.
///
/// [`ExportFilter::new`] includes **all** media kinds, so the zero-config
/// path exports everything; exclusion is opt-in via
/// [`with_media_kinds`](Self::with_media_kinds) or
/// [`without_media`](Self::without_media).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFilter {
    /// First calendar date to include (inclusive).
    pub start_date: Option<NaiveDate>,

    /// Last calendar date to include (inclusive).
    pub end_date: Option<NaiveDate>,

    /// Media kinds that pass the media predicate. Non-media kinds always
    /// pass regardless of this set.
    pub media_kinds: BTreeSet<MessageKind>,
}

impl Default for ExportFilter {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            media_kinds: MessageKind::all_media().collect(),
        }
    }
}

impl ExportFilter {
    /// Creates a filter that passes everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive) from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatshiftError::InvalidDate`] if the format is invalid.
    pub fn with_start_date(mut self, date_str: &str) -> Result<Self> {
        self.start_date = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date (inclusive) from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatshiftError::InvalidDate`] if the format is invalid.
    pub fn with_end_date(mut self, date_str: &str) -> Result<Self> {
        self.end_date = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly from a parsed [`NaiveDate`].
    #[must_use]
    pub fn with_start(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date directly from a parsed [`NaiveDate`].
    #[must_use]
    pub fn with_end(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Replaces the included media kinds with the given set.
    ///
    /// Non-media kinds in the iterator are ignored; they always pass the
    /// media predicate anyway.
    #[must_use]
    pub fn with_media_kinds(mut self, kinds: impl IntoIterator<Item = MessageKind>) -> Self {
        self.media_kinds = kinds.into_iter().filter(MessageKind::is_media).collect();
        self
    }

    /// Excludes all media kinds. Text and service messages still pass.
    #[must_use]
    pub fn without_media(mut self) -> Self {
        self.media_kinds.clear();
        self
    }

    /// Checks that the configured range is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`ChatshiftError::InvalidDateRange`] when both bounds are
    /// present and the start is after the end. Call this before retrieval
    /// or rendering begins.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ChatshiftError::InvalidDateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if any date bound is active.
    pub fn has_date_filter(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Returns `true` if the message satisfies every predicate.
    pub fn matches(&self, msg: &NormalizedMessage) -> bool {
        let date = msg.timestamp.date_naive();
        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }
        if msg.kind.is_media() && !self.media_kinds.contains(&msg.kind) {
            return false;
        }
        true
    }
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatshiftError::invalid_date(date_str))
}

/// Filters a message sequence based on the provided configuration.
///
/// Returns the sub-sequence satisfying all predicates, in the original
/// order. Consumes the input vector; for incremental use call
/// [`ExportFilter::matches`] inline during iteration instead.
pub fn apply_filter(messages: Vec<NormalizedMessage>, filter: &ExportFilter) -> Vec<NormalizedMessage> {
    messages.into_iter().filter(|m| filter.matches(m)).collect()
}
