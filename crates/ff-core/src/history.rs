use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidate::MoveCandidate;
use crate::file::{DestinationRef, FileKind, SourceKind};

/// One completed move, appended to the history sink on success only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub file_name: String,
    /// Volume-relative directory the file was found in.
    pub original_dir: String,
    pub kind: FileKind,
    pub source_kind: SourceKind,
    pub destination: DestinationRef,
    pub moved_at: DateTime<Utc>,
    pub auto_moved: bool,
}

impl MoveEntry {
    pub fn from_candidate(
        candidate: &MoveCandidate,
        destination: DestinationRef,
        moved_at: DateTime<Utc>,
        auto_moved: bool,
    ) -> Self {
        Self {
            file_name: candidate.record.name.clone(),
            original_dir: candidate.record.volume_relative_dir.clone(),
            kind: candidate.source.kind,
            source_kind: candidate.source.source_kind,
            destination,
            moved_at,
            auto_moved,
        }
    }
}
