//! Export statistics: message counts by kind and sender, date span.
//!
//! [`aggregate`] folds the already-filtered message sequence once, building
//! an [`ExportStatistics`] accumulator. Per-sender counts preserve
//! first-appearance order so that [`top_senders`](ExportStatistics::top_senders)
//! can break count ties deterministically, which keeps the statistics file
//! reproducible across runs.
//!
//! # Example
//!
//! ```
//! use chatshift::stats::aggregate;
//! use chatshift::{MessageKind, NormalizedMessage};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 6, 1, 21, 10, 0).unwrap();
//! let messages = vec![
//!     NormalizedMessage::new(1, ts, "Alice", MessageKind::Text).with_text("hi"),
//!     NormalizedMessage::new(2, ts, "Bob", MessageKind::Photo),
//! ];
//!
//! let stats = aggregate(&messages);
//! assert_eq!(stats.total(), 2);
//! assert_eq!(stats.count_for(MessageKind::Photo), 1);
//! ```

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::message::{MessageKind, NormalizedMessage};

/// Accumulated statistics for one filtered export.
///
/// Built by a single forward pass; never re-entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportStatistics {
    total: usize,
    kind_counts: BTreeMap<MessageKind, usize>,
    // Sender counts in first-appearance order; the map is only an index.
    sender_counts: Vec<(String, usize)>,
    sender_index: HashMap<String, usize>,
    earliest: Option<DateTime<Utc>>,
    latest: Option<DateTime<Utc>>,
}

impl ExportStatistics {
    /// Folds one message into the accumulator.
    fn record(&mut self, msg: &NormalizedMessage) {
        self.total += 1;
        *self.kind_counts.entry(msg.kind).or_insert(0) += 1;

        match self.sender_index.get(&msg.sender) {
            Some(&idx) => self.sender_counts[idx].1 += 1,
            None => {
                self.sender_index
                    .insert(msg.sender.clone(), self.sender_counts.len());
                self.sender_counts.push((msg.sender.clone(), 1));
            }
        }

        if self.earliest.is_none_or(|e| msg.timestamp < e) {
            self.earliest = Some(msg.timestamp);
        }
        if self.latest.is_none_or(|l| msg.timestamp > l) {
            self.latest = Some(msg.timestamp);
        }
    }

    /// Total number of messages seen.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count of messages of the given kind.
    pub fn count_for(&self, kind: MessageKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Per-kind counts, ordered by kind.
    pub fn kind_counts(&self) -> &BTreeMap<MessageKind, usize> {
        &self.kind_counts
    }

    /// Per-sender counts in first-appearance order.
    pub fn sender_counts(&self) -> &[(String, usize)] {
        &self.sender_counts
    }

    /// Earliest timestamp seen, if any message was recorded.
    pub fn earliest(&self) -> Option<DateTime<Utc>> {
        self.earliest
    }

    /// Latest timestamp seen, if any message was recorded.
    pub fn latest(&self) -> Option<DateTime<Utc>> {
        self.latest
    }

    /// Senders sorted descending by count.
    ///
    /// The sort is stable: senders with equal counts keep their
    /// first-appearance order, so the ranking is reproducible.
    pub fn top_senders(&self) -> Vec<(&str, usize)> {
        let mut senders: Vec<(&str, usize)> = self
            .sender_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        senders.sort_by(|a, b| b.1.cmp(&a.1));
        senders
    }

    /// Calendar span of the export in days, clamped to at least 1 so
    /// single-day exports don't divide by zero.
    pub fn date_span_days(&self) -> i64 {
        match (self.earliest, self.latest) {
            (Some(e), Some(l)) => {
                let days = (l.date_naive() - e.date_naive()).num_days() + 1;
                days.max(1)
            }
            _ => 1,
        }
    }

    /// Average messages per day over the export's date span.
    pub fn messages_per_day(&self) -> f64 {
        self.total as f64 / self.date_span_days() as f64
    }

    /// Renders the plain-text statistics report written next to the export.
    pub fn summary(&self, chat_name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("Chat: {chat_name}\n"));
        out.push_str(&format!("Total messages: {}\n", self.total));

        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            out.push_str(&format!(
                "Date range: {} - {} ({} days)\n",
                earliest.format("%Y-%m-%d"),
                latest.format("%Y-%m-%d"),
                self.date_span_days()
            ));
            out.push_str(&format!(
                "Messages per day: {:.1}\n",
                self.messages_per_day()
            ));
        }

        if !self.kind_counts.is_empty() {
            out.push_str("\nBy kind:\n");
            for (kind, count) in &self.kind_counts {
                out.push_str(&format!("  {kind}: {count}\n"));
            }
        }

        let top = self.top_senders();
        if !top.is_empty() {
            out.push_str("\nTop senders:\n");
            for (name, count) in top {
                out.push_str(&format!("  {name}: {count}\n"));
            }
        }

        out
    }
}

/// Builds export statistics from the filtered message sequence.
///
/// Single forward pass; the input is not mutated or reordered.
pub fn aggregate(messages: &[NormalizedMessage]) -> ExportStatistics {
    let mut stats = ExportStatistics::default();
    for msg in messages {
        stats.record(msg);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(id: i64, day: u32, sender: &str, kind: MessageKind) -> NormalizedMessage {
        let ts = Utc.with_ymd_and_hms(2023, 6, day, 12, 0, 0).unwrap();
        NormalizedMessage::new(id, ts, sender, kind).with_text("hi")
    }

    #[test]
    fn test_totals_and_kind_counts() {
        let messages = vec![
            msg(1, 1, "Alice", MessageKind::Text),
            msg(2, 1, "Bob", MessageKind::Photo),
            msg(3, 2, "Alice", MessageKind::Text),
        ];

        let stats = aggregate(&messages);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.count_for(MessageKind::Text), 2);
        assert_eq!(stats.count_for(MessageKind::Photo), 1);
        assert_eq!(stats.count_for(MessageKind::Video), 0);

        let kind_sum: usize = stats.kind_counts().values().sum();
        assert_eq!(kind_sum, stats.total());
    }

    #[test]
    fn test_top_senders_tie_break_is_first_appearance() {
        // A, B, A, B, C: A and B tie at 2, A appeared first.
        let messages = vec![
            msg(1, 1, "A", MessageKind::Text),
            msg(2, 1, "B", MessageKind::Text),
            msg(3, 1, "A", MessageKind::Text),
            msg(4, 1, "B", MessageKind::Text),
            msg(5, 1, "C", MessageKind::Text),
        ];

        let stats = aggregate(&messages);
        let top = stats.top_senders();
        assert_eq!(top, vec![("A", 2), ("B", 2), ("C", 1)]);
    }

    #[test]
    fn test_date_span_and_rate() {
        let messages = vec![
            msg(1, 1, "Alice", MessageKind::Text),
            msg(2, 3, "Alice", MessageKind::Text),
            msg(3, 3, "Alice", MessageKind::Text),
        ];

        let stats = aggregate(&messages);
        assert_eq!(stats.date_span_days(), 3);
        assert!((stats.messages_per_day() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_day_span_is_one() {
        let messages = vec![
            msg(1, 1, "Alice", MessageKind::Text),
            msg(2, 1, "Alice", MessageKind::Text),
        ];
        let stats = aggregate(&messages);
        assert_eq!(stats.date_span_days(), 1);
        assert!((stats.messages_per_day() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total(), 0);
        assert!(stats.earliest().is_none());
        assert!(stats.top_senders().is_empty());
        assert_eq!(stats.date_span_days(), 1);
        assert!(stats.messages_per_day().abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_max_timestamps() {
        let messages = vec![
            msg(1, 2, "Alice", MessageKind::Text),
            msg(2, 1, "Alice", MessageKind::Text),
            msg(3, 3, "Alice", MessageKind::Text),
        ];
        let stats = aggregate(&messages);
        assert_eq!(
            stats.earliest().unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(
            stats.latest().unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 3, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_summary_contents() {
        let messages = vec![
            msg(1, 1, "Alice", MessageKind::Text),
            msg(2, 2, "Bob", MessageKind::Photo),
        ];
        let summary = aggregate(&messages).summary("Team Chat");
        assert!(summary.contains("Chat: Team Chat"));
        assert!(summary.contains("Total messages: 2"));
        assert!(summary.contains("Date range: 2023-06-01 - 2023-06-02 (2 days)"));
        assert!(summary.contains("text: 1"));
        assert!(summary.contains("photo: 1"));
        assert!(summary.contains("Alice: 1"));
    }
}
