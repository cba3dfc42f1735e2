use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::file::FileKind;

/// Store-specific reference to the item a change notification is about.
/// Resolved to a full [`crate::file::FileRecord`] through the file store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw store-change notification.
#[derive(Debug, Clone)]
pub struct ChangeNotice {
    pub file_ref: FileRef,
}

/// The slice of the store a single watcher subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchScope {
    /// The store collection of one media kind.
    Media(FileKind),
    /// The downloads collection, covering all non-media kinds.
    Downloads,
}

/// Subscription to store-change notifications for one scope.
///
/// Dropping the receiver ends the subscription; a rebuilt watcher set
/// takes fresh subscriptions.
#[async_trait::async_trait]
pub trait ChangeStreamPort: Send + Sync {
    async fn subscribe(&self, scope: WatchScope) -> Result<mpsc::Receiver<ChangeNotice>>;
}
