//! Routes emitted candidates: auto-move when the source carries an
//! auto-move destination, otherwise reserve resources and present the
//! candidate for a user decision.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ff_core::ports::ActionSurfacePort;
use ff_core::{CorrelationId, MoveCandidate, MoveMode, NavigatorConfig};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::orchestrator::MoveOrchestrator;
use crate::resources::{ResourceTracker, SLOTS_PER_CANDIDATE};

/// User intent arriving from a presented affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    QuickMove,
    View,
    Dismiss,
}

pub struct CandidateRouter {
    pending: Mutex<HashMap<CorrelationId, MoveCandidate>>,
    tracker: Arc<ResourceTracker>,
    orchestrator: Arc<MoveOrchestrator>,
    surface: Arc<dyn ActionSurfacePort>,
    config_rx: watch::Receiver<NavigatorConfig>,
}

impl CandidateRouter {
    pub fn new(
        tracker: Arc<ResourceTracker>,
        orchestrator: Arc<MoveOrchestrator>,
        surface: Arc<dyn ActionSurfacePort>,
        config_rx: watch::Receiver<NavigatorConfig>,
    ) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            tracker,
            orchestrator,
            surface,
            config_rx,
        }
    }

    /// Entry point for every candidate the watchers emit, including
    /// candidates resurfaced after a failed auto-move.
    pub async fn handle_candidate(&self, candidate: MoveCandidate) {
        let config = self.config_rx.borrow().clone();

        if let Some(destination) = config.auto_move_destination(&candidate.source).cloned() {
            info!(file = %candidate.record.name, %destination, "auto-moving candidate");
            let orchestrator = self.orchestrator.clone();
            tokio::spawn(async move {
                orchestrator
                    .execute(&candidate, None, destination, MoveMode::Auto)
                    .await;
            });
            return;
        }

        let handle = self.tracker.reserve(SLOTS_PER_CANDIDATE).await;
        let quick_destination = config.last_destination(&candidate.source);
        self.pending
            .lock()
            .expect("pending registry poisoned")
            .insert(handle.correlation, candidate.clone());

        if let Err(err) = self
            .surface
            .present(&candidate, &handle, quick_destination)
            .await
        {
            warn!(%err, "presenting candidate failed, freeing resources");
            self.remove_pending(handle.correlation);
            self.tracker.release(handle.correlation).await;
        }
    }

    /// Handles one user action against a presented candidate. Actions on
    /// unknown correlation ids are ignored; the affordance was already
    /// torn down by a racing action or dismissal.
    pub async fn dispatch(&self, correlation: CorrelationId, action: Action) {
        let Some(candidate) = self.pending_candidate(correlation) else {
            debug!(%correlation, ?action, "action on unknown candidate, ignoring");
            return;
        };

        match action {
            Action::Move => self.move_with_picker(correlation, candidate).await,
            Action::QuickMove => self.quick_move(correlation, candidate).await,
            Action::View => {
                if let Err(err) = self.surface.open_file(&candidate.record).await {
                    warn!(%err, "opening file failed");
                }
                self.remove_pending(correlation);
                self.tracker.release(correlation).await;
            }
            Action::Dismiss => {
                self.remove_pending(correlation);
                self.tracker.release(correlation).await;
            }
        }
    }

    async fn move_with_picker(&self, correlation: CorrelationId, candidate: MoveCandidate) {
        match self.surface.pick_destination(&candidate).await {
            Ok(Some(destination)) => {
                // A dismissal may have raced the open picker; a candidate
                // discarded meanwhile is never moved.
                if !self.remove_pending(correlation) {
                    debug!(%correlation, "candidate discarded while picking, ignoring");
                    return;
                }
                self.orchestrator
                    .execute(
                        &candidate,
                        Some(correlation),
                        destination,
                        MoveMode::DestinationPicked,
                    )
                    .await;
            }
            // Cancelled picker: the affordance stays live for a retry.
            Ok(None) => debug!(%correlation, "destination picker cancelled"),
            Err(err) => warn!(%correlation, %err, "destination picker failed"),
        }
    }

    async fn quick_move(&self, correlation: CorrelationId, candidate: MoveCandidate) {
        let destination = self
            .config_rx
            .borrow()
            .last_destination(&candidate.source)
            .cloned();
        let Some(destination) = destination else {
            warn!(%correlation, source = %candidate.source, "quick move without a stored destination, ignoring");
            return;
        };
        if !self.remove_pending(correlation) {
            debug!(%correlation, "candidate discarded before quick move, ignoring");
            return;
        }
        self.orchestrator
            .execute(&candidate, Some(correlation), destination, MoveMode::Quick)
            .await;
    }

    fn pending_candidate(&self, correlation: CorrelationId) -> Option<MoveCandidate> {
        self.pending
            .lock()
            .expect("pending registry poisoned")
            .get(&correlation)
            .cloned()
    }

    /// Whether this call removed the entry; false means another action
    /// already discarded the candidate.
    fn remove_pending(&self, correlation: CorrelationId) -> bool {
        self.pending
            .lock()
            .expect("pending registry poisoned")
            .remove(&correlation)
            .is_some()
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}
