use anyhow::Result;

use crate::history::MoveEntry;

/// Append-only log of completed moves. Written on success only.
#[async_trait::async_trait]
pub trait HistorySinkPort: Send + Sync {
    async fn append(&self, entry: &MoveEntry) -> Result<()>;
}
