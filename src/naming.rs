//! Derive file-system-safe output names from chat names.
//!
//! The namer substitutes `{chat}` and `{date}` placeholders into a
//! user-supplied name template (default `{chat}_{date}`), then replaces
//! every character outside letters, digits, space, dash, underscore, and
//! dot with an underscore. When exporting multiple chats with a shared
//! template, substituting `{chat}` per chat guarantees distinct paths.
//!
//! # Example
//!
//! ```
//! use chatshift::naming::name_file;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
//! assert_eq!(name_file("Team/Chat", date, None), "Team_Chat_2023-06-01");
//! ```

use chrono::NaiveDate;

/// Default name template when the user supplies none.
pub const DEFAULT_NAME_TEMPLATE: &str = "{chat}_{date}";

/// Name used when substitution yields an empty string.
pub const FALLBACK_NAME: &str = "telegram_chat_export";

/// Derives an output file name (without extension) from a chat name, a
/// date, and an optional name template.
///
/// The result is never empty: a template that substitutes to nothing falls
/// back to [`FALLBACK_NAME`].
pub fn name_file(chat_name: &str, date: NaiveDate, template: Option<&str>) -> String {
    let template = template.unwrap_or(DEFAULT_NAME_TEMPLATE);
    let substituted = template
        .replace("{chat}", chat_name)
        .replace("{date}", &date.format("%Y-%m-%d").to_string());

    let sanitized = sanitize(&substituted);
    if sanitized.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        sanitized
    }
}

/// Replaces characters outside `[letters, digits, space, dash, underscore,
/// dot]` with underscores and trims surrounding whitespace.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
