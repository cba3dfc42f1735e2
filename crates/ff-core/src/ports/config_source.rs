use anyhow::Result;
use tokio::sync::watch;

use crate::config::NavigatorConfig;
use crate::file::{DestinationRef, Source};

/// The configuration source: current enabled kinds/sources and
/// per-source destination policy, with a change subscription so the
/// watcher set can be rebuilt.
#[async_trait::async_trait]
pub trait ConfigSourcePort: Send + Sync {
    async fn load(&self) -> Result<NavigatorConfig>;

    async fn save_last_destination(
        &self,
        source: &Source,
        destination: &DestinationRef,
    ) -> Result<()>;

    /// Disables the auto-move policy of `source`, keeping its recorded
    /// destination. Triggers a change broadcast like any other update.
    async fn unset_auto_move(&self, source: &Source) -> Result<()>;

    /// Receiver that always holds the latest configuration snapshot.
    fn subscribe(&self) -> watch::Receiver<NavigatorConfig>;
}
