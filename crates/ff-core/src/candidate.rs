use serde::{Deserialize, Serialize};

use crate::errors::MoveError;
use crate::file::{DestinationRef, FileKind, FileRecord, Source, SourceKind};

/// A detected, classified, not-yet-relocated file awaiting a destination
/// decision. Consumed exactly once by the orchestrator or by cleanup;
/// the destination is supplied externally at move time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub record: FileRecord,
    pub source: Source,
}

impl MoveCandidate {
    pub fn new(record: FileRecord, source: Source) -> Self {
        Self { record, source }
    }

    /// Human-readable title for the action surface, e.g. "Screenshot",
    /// "Photo", "PDF Download", "/SomeApp Image".
    pub fn title(&self) -> String {
        if !self.source.kind.is_media() {
            return self.source.kind.label().to_string();
        }
        match self.source.source_kind {
            SourceKind::Screenshot => SourceKind::Screenshot.label().to_string(),
            SourceKind::Camera => match self.source.kind {
                FileKind::Video => "Video".to_string(),
                _ => "Photo".to_string(),
            },
            SourceKind::Download => format!("{} Download", self.source.kind.label()),
            SourceKind::OtherApp => {
                format!("/{} {}", self.record.dir_name(), self.source.kind.label())
            }
        }
    }
}

/// How a move was triggered. Decides last-destination bookkeeping and
/// whether the auto-move compensation path is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    /// Destination chosen through the picker.
    DestinationPicked,
    /// Last destination reused without a picker.
    Quick,
    /// Policy-driven, no user interaction.
    Auto,
}

impl MoveMode {
    pub fn is_auto(&self) -> bool {
        matches!(self, MoveMode::Auto)
    }

    /// Quick and auto moves already use the remembered destination;
    /// only a picked destination rewrites it.
    pub fn updates_last_destination(&self) -> bool {
        matches!(self, MoveMode::DestinationPicked)
    }
}

/// Terminal result of one `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { destination: DestinationRef },
    Failed(MoveError),
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}
