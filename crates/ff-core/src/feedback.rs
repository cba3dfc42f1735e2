use crate::errors::MoveError;
use crate::file::{DestinationRef, Source};

/// User-visible outcome messages published through the action surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    MoveSucceeded {
        /// Candidate title, e.g. "Screenshot" or "PDF".
        title: String,
        destination: DestinationRef,
        auto_moved: bool,
    },
    MoveFailed {
        error: MoveError,
    },
    /// The auto-move destination of `source` vanished; the policy has
    /// been disabled and the candidate re-surfaced for manual handling.
    AutoMoveDestinationInvalid {
        source: Source,
        destination: DestinationRef,
    },
}
