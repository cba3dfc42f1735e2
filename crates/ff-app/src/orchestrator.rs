//! The move orchestrator: pre-flight checks, the move itself, and the
//! bookkeeping that follows either outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ff_core::{
    CorrelationId, DestinationRef, Feedback, MoveCandidate, MoveEntry, MoveError, MoveMode,
    MoveOutcome,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::deps::NavigatorDeps;
use crate::resources::ResourceTracker;

pub struct MoveOrchestrator {
    deps: NavigatorDeps,
    tracker: Arc<ResourceTracker>,
    /// Re-emission channel back into the candidate intake; used when an
    /// automatic move loses its destination and the candidate has to be
    /// re-surfaced for manual handling.
    candidate_tx: mpsc::Sender<MoveCandidate>,
}

impl MoveOrchestrator {
    pub fn new(
        deps: NavigatorDeps,
        tracker: Arc<ResourceTracker>,
        candidate_tx: mpsc::Sender<MoveCandidate>,
    ) -> Self {
        Self {
            deps,
            tracker,
            candidate_tx,
        }
    }

    /// Validates, executes and reports one move. Terminal either way:
    /// the candidate's resources are released on every path except the
    /// auto-move compensation, which re-surfaces the candidate instead.
    ///
    /// Blocking store I/O happens here and nowhere else; callers spawn
    /// this off the event-delivery tasks. An in-flight move is not
    /// cancellable and concurrent moves for different candidates are
    /// independent.
    pub async fn execute(
        &self,
        candidate: &MoveCandidate,
        resources: Option<CorrelationId>,
        destination: DestinationRef,
        mode: MoveMode,
    ) -> MoveOutcome {
        match self.try_move(candidate, &destination).await {
            Ok(()) => {
                info!(file = %candidate.record.name, %destination, ?mode, "move completed");
                self.on_success(candidate, destination.clone(), mode, resources)
                    .await;
                MoveOutcome::Moved { destination }
            }
            Err(error) => {
                warn!(file = %candidate.record.name, %destination, %error, "move failed");
                self.on_failure(candidate, destination, mode, resources, error.clone())
                    .await;
                MoveOutcome::Failed(error)
            }
        }
    }

    /// Precondition chain; the first failing check wins.
    async fn try_move(
        &self,
        candidate: &MoveCandidate,
        destination: &DestinationRef,
    ) -> Result<(), MoveError> {
        let store = &self.deps.store;

        if !store.has_storage_permission().await {
            return Err(MoveError::MissingPermission);
        }
        if !store.file_exists(&candidate.record).await {
            return Err(MoveError::SourceNotFound);
        }
        if !store.destination_resolvable(destination).await {
            return Err(MoveError::internal(format!(
                "destination not resolvable: {destination}"
            )));
        }
        match store.has_child(destination, &candidate.record.name).await {
            Ok(true) => return Err(MoveError::AlreadyAtDestination),
            Ok(false) => {}
            Err(err) => return Err(MoveError::internal(err.to_string())),
        }

        store
            .move_file(&candidate.record, destination)
            .await
            .map_err(MoveError::from)
    }

    async fn on_success(
        &self,
        candidate: &MoveCandidate,
        destination: DestinationRef,
        mode: MoveMode,
        resources: Option<CorrelationId>,
    ) {
        let moved_at = DateTime::from_timestamp_millis(self.deps.clock.now_ms())
            .unwrap_or_else(Utc::now);
        let entry =
            MoveEntry::from_candidate(candidate, destination.clone(), moved_at, mode.is_auto());
        if let Err(err) = self.deps.history.append(&entry).await {
            warn!(%err, "recording move history failed");
        }

        if mode.updates_last_destination() {
            if let Err(err) = self
                .deps
                .config
                .save_last_destination(&candidate.source, &destination)
                .await
            {
                warn!(%err, "saving last move destination failed");
            }
        }

        self.release(resources).await;
        self.publish(Feedback::MoveSucceeded {
            title: candidate.title(),
            destination,
            auto_moved: mode.is_auto(),
        })
        .await;
    }

    async fn on_failure(
        &self,
        candidate: &MoveCandidate,
        destination: DestinationRef,
        mode: MoveMode,
        resources: Option<CorrelationId>,
        error: MoveError,
    ) {
        if error == MoveError::DestinationInvalid && mode.is_auto() {
            // The policy's destination vanished: disable it (the config
            // change rebuilds the watcher set) and hand the candidate
            // back for manual handling, alongside a distinct notice
            // about the invalid destination.
            if let Err(err) = self.deps.config.unset_auto_move(&candidate.source).await {
                warn!(%err, source = %candidate.source, "disabling auto-move policy failed");
            }
            if self.candidate_tx.send(candidate.clone()).await.is_err() {
                warn!("candidate intake closed, dropping re-surfaced candidate");
            }
            self.release(resources).await;
            self.publish(Feedback::AutoMoveDestinationInvalid {
                source: candidate.source,
                destination,
            })
            .await;
            return;
        }

        self.release(resources).await;
        self.publish(Feedback::MoveFailed { error }).await;
    }

    async fn release(&self, resources: Option<CorrelationId>) {
        if let Some(correlation) = resources {
            self.tracker.release(correlation).await;
        }
    }

    async fn publish(&self, feedback: Feedback) {
        if let Err(err) = self.deps.surface.publish(feedback).await {
            warn!(%err, "publishing feedback failed");
        }
    }
}
