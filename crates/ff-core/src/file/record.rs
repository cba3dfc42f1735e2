use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Files added longer ago than this are not considered newly added and
/// never become move candidates.
pub const FRESHNESS_WINDOW_MS: i64 = 10_000;

/// Opaque reference to a writable destination container within the store.
///
/// The core never interprets the contents; `ff-infra` backs it with a
/// directory path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationRef(String);

impl DestinationRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DestinationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical metadata for one file in the store, fetched per change event.
///
/// Immutable once constructed; a later notification for the same file
/// produces a fresh record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Store-assigned identifier.
    pub store_id: String,
    pub abs_path: PathBuf,
    /// Directory path relative to the storage volume, e.g. "DCIM/Camera".
    pub volume_relative_dir: String,
    /// Display name including extension.
    pub name: String,
    pub size: u64,
    /// Added timestamp in unix milliseconds.
    pub added_at_ms: i64,
    /// Store-level pending flag; set while the writer has not finalized
    /// the file.
    pub pending_flag: bool,
    /// Store-level download flag.
    pub download_flag: bool,
}

impl FileRecord {
    pub fn extension(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }

    /// Name without extension and without a trailing "(n)" increment
    /// suffix, as produced by the store for renamed duplicates.
    pub fn non_incremented_stem(&self) -> &str {
        let stem = self
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name);
        strip_increment_suffix(stem)
    }

    /// Last segment of the volume-relative directory path.
    pub fn dir_name(&self) -> &str {
        self.volume_relative_dir
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
    }

    pub fn is_newly_added(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.added_at_ms) < FRESHNESS_WINDOW_MS
    }

    pub fn is_pending(&self) -> bool {
        self.pending_flag || self.size == 0
    }

    /// Identity equivalence: same store id, or same size and same
    /// non-incremented stem. Basis of the recency dedup cache.
    pub fn points_to_same_content_as(&self, other: &FileRecord) -> bool {
        self.store_id == other.store_id
            || (self.size == other.size
                && self.non_incremented_stem() == other.non_incremented_stem())
    }
}

/// Strips a trailing " (n)" / "(n)" duplicate-increment suffix.
fn strip_increment_suffix(stem: &str) -> &str {
    let trimmed = stem.trim_end();
    let Some(without_close) = trimmed.strip_suffix(')') else {
        return stem;
    };
    let Some(open) = without_close.rfind('(') else {
        return stem;
    };
    let digits = &without_close[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return stem;
    }
    trimmed[..open].trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, size: u64) -> FileRecord {
        FileRecord {
            store_id: format!("id-{name}"),
            abs_path: PathBuf::from(format!("/storage/Download/{name}")),
            volume_relative_dir: "Download".into(),
            name: name.into(),
            size,
            added_at_ms: 0,
            pending_flag: false,
            download_flag: true,
        }
    }

    #[test]
    fn extension_and_stem() {
        let r = record("report.pdf", 10);
        assert_eq!(r.extension(), "pdf");
        assert_eq!(r.non_incremented_stem(), "report");

        let r = record("noext", 10);
        assert_eq!(r.extension(), "");
        assert_eq!(r.non_incremented_stem(), "noext");
    }

    #[test]
    fn increment_suffix_is_stripped() {
        assert_eq!(record("report(1).pdf", 1).non_incremented_stem(), "report");
        assert_eq!(record("report (12).pdf", 1).non_incremented_stem(), "report");
        // No digits inside the parentheses: not an increment suffix.
        assert_eq!(record("report(a).pdf", 1).non_incremented_stem(), "report(a)");
        assert_eq!(record("report().pdf", 1).non_incremented_stem(), "report()");
    }

    #[test]
    fn identity_by_id_or_size_and_stem() {
        let a = record("shot.png", 512);
        let mut b = record("shot(1).png", 512);
        b.store_id = "different".into();
        assert!(a.points_to_same_content_as(&b));

        let mut c = record("shot(1).png", 513);
        c.store_id = "other".into();
        assert!(!a.points_to_same_content_as(&c));

        let mut same_id = record("renamed.png", 9999);
        same_id.store_id = a.store_id.clone();
        assert!(a.points_to_same_content_as(&same_id));
    }

    #[test]
    fn pending_when_flagged_or_empty() {
        let mut r = record("a.png", 0);
        assert!(r.is_pending());
        r.size = 1;
        assert!(!r.is_pending());
        r.pending_flag = true;
        assert!(r.is_pending());
    }

    #[test]
    fn freshness_window() {
        let mut r = record("a.png", 1);
        r.added_at_ms = 100_000;
        assert!(r.is_newly_added(100_000 + FRESHNESS_WINDOW_MS - 1));
        assert!(!r.is_newly_added(100_000 + FRESHNESS_WINDOW_MS));
    }

    #[test]
    fn dir_name_is_last_segment() {
        let mut r = record("a.jpg", 1);
        r.volume_relative_dir = "DCIM/Camera/".into();
        assert_eq!(r.dir_name(), "Camera");
    }
}
