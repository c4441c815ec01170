//! Per-run file names and most-recent-file lookup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::StoreError;

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const RAW_MARKER: &str = "_raw";
const PROCESSED_MARKER: &str = "_processed";

/// `YYYYmmdd_HHMMSS` for the given run time.
#[must_use]
pub fn run_stamp(at: DateTime<Utc>) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// `deals_raw_<stamp>.json`
#[must_use]
pub fn raw_file_name(at: DateTime<Utc>) -> String {
    format!("deals{RAW_MARKER}_{}.json", run_stamp(at))
}

/// `deals_processed_<stamp>.csv`
#[must_use]
pub fn processed_file_name(at: DateTime<Utc>) -> String {
    format!("deals{PROCESSED_MARKER}_{}.csv", run_stamp(at))
}

pub(crate) fn is_raw_file(name: &str) -> bool {
    name.contains(RAW_MARKER) && name.ends_with(".json")
}

pub(crate) fn is_processed_file(name: &str) -> bool {
    name.contains(PROCESSED_MARKER) && name.ends_with(".csv")
}

/// Run time embedded in a processed file name, if it has one.
fn processed_stamp(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(".csv")?;
    let (_, stamp) = stem.rsplit_once(&format!("{PROCESSED_MARKER}_"))?;
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}

/// File names in `dir` accepted by `keep`. A missing directory has none.
pub(crate) fn list_files(
    dir: &Path,
    keep: impl Fn(&str) -> bool,
) -> Result<Vec<(String, PathBuf)>, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if keep(name) {
                files.push((name.to_owned(), path));
            }
        }
    }
    Ok(files)
}

/// The most recent processed CSV in `dir`, or `None` if there is none.
///
/// Files are ordered by the run stamp in their name; files without a
/// parseable stamp rank below stamped ones and are ordered by modification
/// time among themselves.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if `dir` exists but cannot be listed.
pub fn latest_processed_file(dir: &Path) -> Result<Option<PathBuf>, StoreError> {
    let candidates = list_files(dir, is_processed_file)?;

    let latest = candidates
        .into_iter()
        .map(|(name, path)| {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            ((processed_stamp(&name), modified), path)
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| path);

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn file_names_embed_zero_padded_stamp() {
        assert_eq!(run_stamp(at()), "20240309_070501");
        assert_eq!(raw_file_name(at()), "deals_raw_20240309_070501.json");
        assert_eq!(processed_file_name(at()), "deals_processed_20240309_070501.csv");
    }

    #[test]
    fn processed_stamp_round_trips_file_name() {
        let name = processed_file_name(at());
        assert_eq!(processed_stamp(&name), Some(at().naive_utc()));
    }

    #[test]
    fn processed_stamp_rejects_foreign_names() {
        assert_eq!(processed_stamp("deals_processed_latest.csv"), None);
        assert_eq!(processed_stamp("deals_processed_20240309_070501.json"), None);
        assert_eq!(processed_stamp("notes.csv"), None);
    }

    #[test]
    fn file_kind_predicates() {
        assert!(is_processed_file("deals_processed_20240309_070501.csv"));
        assert!(!is_processed_file("deals_raw_20240309_070501.json"));
        assert!(is_raw_file("deals_raw_20240309_070501.json"));
        assert!(!is_raw_file("pipeline_summary.txt"));
    }

    #[test]
    fn latest_processed_file_is_none_for_missing_dir() {
        let result = latest_processed_file(Path::new("/nonexistent/playsmart/processed"));
        assert!(matches!(result, Ok(None)));
    }
}
