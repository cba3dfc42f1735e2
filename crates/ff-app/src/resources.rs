//! Notification resource tracking.
//!
//! Allocates the correlation id and action-slot ids backing one live
//! affordance, and guarantees exactly-once teardown no matter which of
//! user dismissal, action invocation or orchestrator outcome fires
//! first.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use ff_core::ports::ActionSurfacePort;
use ff_core::{CorrelationId, ResourceHandle, SlotId};
use tracing::{debug, warn};

/// Action slots reserved per candidate: move, quick-move, view, dismiss.
pub const SLOTS_PER_CANDIDATE: usize = 4;

pub struct ResourceTracker {
    surface: Arc<dyn ActionSurfacePort>,
    /// Monotonic id base; ids are never reused while the process lives,
    /// so a stale action intent can never hit a recycled slot.
    next_id: AtomicU32,
    live: Mutex<HashMap<CorrelationId, Vec<SlotId>>>,
    /// Serializes summary publishes; each reads the live count while
    /// holding this, so the surface never sees counts out of order.
    summary_gate: tokio::sync::Mutex<()>,
}

impl ResourceTracker {
    pub fn new(surface: Arc<dyn ActionSurfacePort>) -> Self {
        Self {
            surface,
            next_id: AtomicU32::new(1),
            live: Mutex::new(HashMap::new()),
            summary_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Reserves a correlation id plus `slots` globally unique slot ids
    /// and registers the handle as live. The caller presents the
    /// affordance afterwards.
    pub async fn reserve(&self, slots: usize) -> ResourceHandle {
        let base = self.next_id.fetch_add(slots as u32 + 1, Ordering::Relaxed);
        let handle = ResourceHandle {
            correlation: CorrelationId(base),
            slots: (1..=slots as u32).map(|i| SlotId(base + i)).collect(),
        };

        self.live
            .lock()
            .expect("resource registry poisoned")
            .insert(handle.correlation, handle.slots.clone());
        self.publish_summary().await;

        handle
    }

    /// Idempotent: the first call dismisses the affordance and frees the
    /// slots, later calls are no-ops. Returns whether this call did the
    /// release.
    pub async fn release(&self, correlation: CorrelationId) -> bool {
        // Remove before any await so concurrent releasers cannot both
        // proceed to the dismissal.
        {
            let mut live = self.live.lock().expect("resource registry poisoned");
            if live.remove(&correlation).is_none() {
                debug!(%correlation, "release on already-freed resources, ignoring");
                return false;
            }
        }

        if let Err(err) = self.surface.dismiss(correlation).await {
            warn!(%correlation, %err, "dismissing affordance failed");
        }
        self.publish_summary().await;
        true
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().expect("resource registry poisoned").len()
    }

    async fn publish_summary(&self) {
        let _gate = self.summary_gate.lock().await;
        let live = self.live_count();
        if let Err(err) = self.surface.update_summary(live).await {
            warn!(%err, "updating summary affordance failed");
        }
    }
}
