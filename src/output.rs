//! Write export artifacts: the chat text file and its statistics sibling.
//!
//! Both artifacts are plain UTF-8 text. The statistics file sits next to
//! the export with a `_stats.txt` suffix, e.g. `Team_2023-06-01.txt` →
//! `Team_2023-06-01_stats.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stats::ExportStatistics;

/// Writes the rendered export text to the given path.
pub fn write_export(path: impl AsRef<Path>, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Derives the statistics file path for an export path.
pub fn stats_path(export_path: impl AsRef<Path>) -> PathBuf {
    let path = export_path.as_ref();
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    path.with_file_name(format!("{stem}_stats.txt"))
}

/// Writes the statistics summary next to the export file.
///
/// Returns the path the summary was written to.
pub fn write_stats(
    export_path: impl AsRef<Path>,
    stats: &ExportStatistics,
    chat_name: &str,
) -> Result<PathBuf> {
    let path = stats_path(export_path);
    fs::write(&path, stats.summary(chat_name))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MessageKind, NormalizedMessage};
    use crate::stats::aggregate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_stats_path_derivation() {
        assert_eq!(
            stats_path("export/Team_2023-06-01.txt"),
            PathBuf::from("export/Team_2023-06-01_stats.txt")
        );
        assert_eq!(stats_path("chat"), PathBuf::from("chat_stats.txt"));
    }

    #[test]
    fn test_write_export_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("chat.txt");

        write_export(&export, "01/06/23, 21:10 - Alice: hi\n").unwrap();
        assert_eq!(
            fs::read_to_string(&export).unwrap(),
            "01/06/23, 21:10 - Alice: hi\n"
        );

        let ts = Utc.with_ymd_and_hms(2023, 6, 1, 21, 10, 0).unwrap();
        let messages =
            vec![NormalizedMessage::new(1, ts, "Alice", MessageKind::Text).with_text("hi")];
        let stats = aggregate(&messages);

        let path = write_stats(&export, &stats, "Team").unwrap();
        assert_eq!(path, dir.path().join("chat_stats.txt"));
        let summary = fs::read_to_string(path).unwrap();
        assert!(summary.contains("Total messages: 1"));
    }
}
