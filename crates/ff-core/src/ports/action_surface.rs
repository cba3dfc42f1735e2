use anyhow::Result;

use crate::candidate::MoveCandidate;
use crate::feedback::Feedback;
use crate::file::{DestinationRef, FileRecord};
use crate::resources::{CorrelationId, ResourceHandle};

/// The user-facing notification/action surface.
///
/// The core decides when an affordance appears, which actions it offers
/// and when it is torn down; rendering and the picker interaction are
/// external.
#[async_trait::async_trait]
pub trait ActionSurfacePort: Send + Sync {
    /// Shows the affordance for one candidate. `quick_destination` is
    /// the recorded last destination; when absent the surface offers no
    /// quick-move action.
    async fn present(
        &self,
        candidate: &MoveCandidate,
        handle: &ResourceHandle,
        quick_destination: Option<&DestinationRef>,
    ) -> Result<()>;

    /// Rebuilds the summary affordance for the current number of live
    /// candidates; zero dismisses it.
    async fn update_summary(&self, live: usize) -> Result<()>;

    /// Tears down the affordance identified by `correlation`.
    async fn dismiss(&self, correlation: CorrelationId) -> Result<()>;

    /// Presents the destination picker. `Ok(None)` means the user
    /// cancelled; the candidate stays pending.
    async fn pick_destination(&self, candidate: &MoveCandidate) -> Result<Option<DestinationRef>>;

    /// Opens the file for viewing.
    async fn open_file(&self, record: &FileRecord) -> Result<()>;

    /// Publishes a user-visible outcome message.
    async fn publish(&self, feedback: Feedback) -> Result<()>;
}
