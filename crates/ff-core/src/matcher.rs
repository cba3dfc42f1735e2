use std::collections::HashSet;

use crate::file::{FileKind, FileRecord, Source, SourceKind};

/// Per-watcher matching strategy: maps a resolved record (plus its
/// classified source kind) to zero-or-one configured source pair.
///
/// One trait with a pluggable strategy per domain instead of a watcher
/// inheritance hierarchy.
pub trait MatchStrategy: Send + Sync {
    fn match_record(&self, record: &FileRecord, source_kind: SourceKind) -> Option<Source>;
}

/// Strategy for a media watcher: one kind, scoped to the source kinds
/// whose pair is currently enabled.
#[derive(Debug)]
pub struct MediaMatcher {
    kind: FileKind,
    enabled_source_kinds: HashSet<SourceKind>,
}

impl MediaMatcher {
    pub fn new(kind: FileKind, enabled_source_kinds: HashSet<SourceKind>) -> Self {
        debug_assert!(kind.is_media());
        Self {
            kind,
            enabled_source_kinds,
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }
}

impl MatchStrategy for MediaMatcher {
    fn match_record(&self, record: &FileRecord, source_kind: SourceKind) -> Option<Source> {
        if !self.kind.matches_extension(record.extension()) {
            return None;
        }
        self.enabled_source_kinds
            .contains(&source_kind)
            .then(|| Source::new(self.kind, source_kind))
    }
}

/// Strategy for the single aggregate non-media watcher: first enabled
/// kind whose extension set matches wins; the source is always Download.
#[derive(Debug)]
pub struct NonMediaMatcher {
    kinds: Vec<FileKind>,
}

impl NonMediaMatcher {
    pub fn new(kinds: Vec<FileKind>) -> Self {
        debug_assert!(kinds.iter().all(|kind| !kind.is_media()));
        Self { kinds }
    }

    pub fn kinds(&self) -> &[FileKind] {
        &self.kinds
    }
}

impl MatchStrategy for NonMediaMatcher {
    fn match_record(&self, record: &FileRecord, _source_kind: SourceKind) -> Option<Source> {
        self.kinds
            .iter()
            .find(|kind| kind.matches_extension(record.extension()))
            .map(|kind| Source::new(*kind, SourceKind::Download))
    }
}
