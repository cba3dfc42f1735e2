use thiserror::Error;

/// Closed failure taxonomy for a move attempt.
///
/// All variants are non-fatal to the process; each maps to a
/// user-visible message and triggers release of the candidate's
/// notification resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("storage permission not granted")]
    MissingPermission,

    #[error("file no longer exists at its recorded location")]
    SourceNotFound,

    #[error("file already at the selected destination")]
    AlreadyAtDestination,

    #[error("move destination no longer exists")]
    DestinationInvalid,

    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl MoveError {
    pub fn internal(detail: impl Into<String>) -> Self {
        MoveError::Internal {
            detail: detail.into(),
        }
    }
}

/// Errors surfaced by the store's raw move primitive.
///
/// Underlying I/O error codes pass through as `Io` and end up as
/// `MoveError::Internal` detail rather than being swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source file missing")]
    SourceMissing,

    #[error("destination folder missing")]
    DestinationMissing,

    #[error("a file with that name already exists at the destination")]
    AlreadyExists,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for MoveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SourceMissing => MoveError::SourceNotFound,
            StoreError::DestinationMissing => MoveError::DestinationInvalid,
            StoreError::AlreadyExists => MoveError::AlreadyAtDestination,
            StoreError::Io(io) => MoveError::internal(io.to_string()),
        }
    }
}
