use serde::{Deserialize, Serialize};

use crate::file::kind::FileKind;
use crate::file::record::FileRecord;

/// Volume-relative directory segment the store uses for screenshots.
pub const SCREENSHOTS_DIR_SEGMENT: &str = "Screenshots";
/// Volume-relative directory segment the store uses for camera output.
pub const CAMERA_DIR_SEGMENT: &str = "DCIM";

/// Origin of a newly observed file, derived from path heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Screenshot,
    Camera,
    Download,
    OtherApp,
}

impl SourceKind {
    /// Classifies a record with fixed precedence: download flag first,
    /// then screenshot directory, then camera directory, else OtherApp.
    ///
    /// NOTE: Don't change the order of the Screenshot and Camera branches;
    /// the screenshot dir may be a child dir of the camera directory.
    pub fn classify(record: &FileRecord) -> SourceKind {
        let kind = if record.download_flag {
            SourceKind::Download
        } else if record.volume_relative_dir.contains(SCREENSHOTS_DIR_SEGMENT) {
            SourceKind::Screenshot
        } else if record.volume_relative_dir.contains(CAMERA_DIR_SEGMENT) {
            SourceKind::Camera
        } else {
            SourceKind::OtherApp
        };
        tracing::debug!(?kind, path = %record.volume_relative_dir, "classified source kind");
        kind
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Screenshot => "Screenshot",
            SourceKind::Camera => "Camera",
            SourceKind::Download => "Download",
            SourceKind::OtherApp => "Other App",
        }
    }
}

/// A (FileKind, SourceKind) pair, the unit of configuration.
///
/// Each pair is independently enabled/disabled and carries its own last
/// destination and auto-move policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    pub kind: FileKind,
    pub source_kind: SourceKind,
}

impl Source {
    pub fn new(kind: FileKind, source_kind: SourceKind) -> Self {
        Self { kind, source_kind }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind.label(), self.source_kind.label())
    }
}
