use std::collections::VecDeque;

use crate::file::FileRecord;

/// Default capacity of a watcher's recency cache.
pub const DEFAULT_CAPACITY: usize = 5;

/// Bounded FIFO-eviction set of recently observed records, used to
/// suppress duplicate and self-triggered change notifications.
///
/// One instance per watcher, owned exclusively by that watcher's task;
/// identity collisions are only suppressed within one watcher's stream.
#[derive(Debug)]
pub struct RecencyCache {
    entries: VecDeque<FileRecord>,
    capacity: usize,
}

impl Default for RecencyCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RecencyCache {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "recency cache capacity must be non-zero");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns true if no cached record is identity-equivalent to
    /// `record`, then unconditionally inserts it, evicting the oldest
    /// entry once capacity is exceeded.
    pub fn offer(&mut self, record: &FileRecord) -> bool {
        let fresh = !self
            .entries
            .iter()
            .any(|cached| cached.points_to_same_content_as(record));

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(record.clone());

        fresh
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(id: &str, name: &str, size: u64) -> FileRecord {
        FileRecord {
            store_id: id.into(),
            abs_path: PathBuf::from("/storage/Download").join(name),
            volume_relative_dir: "Download".into(),
            name: name.into(),
            size,
            added_at_ms: 0,
            pending_flag: false,
            download_flag: true,
        }
    }

    #[test]
    fn accept_then_reject_for_equivalent_records() {
        let mut cache = RecencyCache::default();
        let a = record("1", "shot.png", 100);
        // Same content under an incremented name and a different id.
        let b = record("2", "shot(1).png", 100);

        assert!(cache.offer(&a));
        assert!(!cache.offer(&b));
    }

    #[test]
    fn independent_caches_both_accept() {
        let mut first = RecencyCache::default();
        let mut second = RecencyCache::default();
        let a = record("1", "shot.png", 100);

        assert!(first.offer(&a));
        assert!(second.offer(&a));
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut cache = RecencyCache::with_capacity(3);
        for i in 0..4 {
            assert!(cache.offer(&record(&i.to_string(), &format!("f{i}.png"), i + 1)));
        }
        assert_eq!(cache.len(), 3);
        // The first record was evicted, so it is fresh again.
        assert!(cache.offer(&record("0", "f0.png", 1)));
    }

    #[test]
    fn duplicate_insert_still_occupies_a_slot() {
        let mut cache = RecencyCache::with_capacity(2);
        let a = record("1", "a.png", 1);
        assert!(cache.offer(&a));
        assert!(!cache.offer(&a));
        assert_eq!(cache.len(), 2);
    }
}
