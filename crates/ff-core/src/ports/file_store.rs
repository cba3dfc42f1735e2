use anyhow::Result;

use crate::errors::StoreError;
use crate::file::{DestinationRef, FileRecord};
use crate::ports::change_stream::FileRef;

/// Canonical metadata access plus the raw move primitive of the indexed
/// file store.
#[async_trait::async_trait]
pub trait FileStorePort: Send + Sync {
    /// Fetches the record a change notification refers to. `Ok(None)`
    /// when the item vanished or the reference cannot be interpreted;
    /// watchers discard such events.
    async fn resolve(&self, file_ref: &FileRef) -> Result<Option<FileRecord>>;

    /// Whether the elevated storage permission required for moving is
    /// currently held.
    async fn has_storage_permission(&self) -> bool;

    /// Whether the file still exists at its recorded location.
    async fn file_exists(&self, record: &FileRecord) -> bool;

    /// Whether the reference can be interpreted as a destination
    /// container at all. Existence is checked by `move_file` itself so
    /// a vanished container surfaces as `StoreError::DestinationMissing`.
    async fn destination_resolvable(&self, destination: &DestinationRef) -> bool;

    /// Whether the destination already contains a child named `name`.
    async fn has_child(&self, destination: &DestinationRef, name: &str) -> Result<bool>;

    /// Moves the raw bytes to the destination container under the
    /// original name: atomic rename where the store supports it,
    /// copy-then-delete otherwise. No transforms.
    async fn move_file(
        &self,
        record: &FileRecord,
        destination: &DestinationRef,
    ) -> Result<(), StoreError>;
}
