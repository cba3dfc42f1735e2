//! The navigator facade: wires the ports into the watcher supervisor,
//! candidate intake and router, and owns the spawned tasks.

use std::sync::Arc;

use anyhow::{Context, Result};
use ff_core::{CorrelationId, MoveCandidate};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::deps::NavigatorDeps;
use crate::orchestrator::MoveOrchestrator;
use crate::resources::ResourceTracker;
use crate::router::{Action, CandidateRouter};
use crate::watcher::WatcherSupervisor;

const CANDIDATE_CHANNEL_CAPACITY: usize = 64;

pub struct FileNavigator {
    router: Arc<CandidateRouter>,
    tracker: Arc<ResourceTracker>,
    intake_task: JoinHandle<()>,
    supervisor_task: JoinHandle<()>,
}

impl FileNavigator {
    /// Loads the configuration, spawns the watcher set and the candidate
    /// intake loop, and returns a handle for dispatching user actions.
    pub async fn start(deps: NavigatorDeps) -> Result<Self> {
        let config = deps
            .config
            .load()
            .await
            .context("loading navigator configuration")?;
        let config_rx = deps.config.subscribe();
        debug!(
            enabled_media = config.enabled_media_kinds().len(),
            enabled_non_media = config.enabled_non_media_kinds().len(),
            "configuration loaded"
        );

        let tracker = Arc::new(ResourceTracker::new(deps.surface.clone()));
        let (candidate_tx, candidate_rx) = mpsc::channel(CANDIDATE_CHANNEL_CAPACITY);

        let orchestrator = Arc::new(MoveOrchestrator::new(
            deps.clone(),
            tracker.clone(),
            candidate_tx.clone(),
        ));
        let router = Arc::new(CandidateRouter::new(
            tracker.clone(),
            orchestrator,
            deps.surface.clone(),
            config_rx.clone(),
        ));

        let intake_task = tokio::spawn(intake_loop(router.clone(), candidate_rx));

        let supervisor = WatcherSupervisor::new(
            deps.store.clone(),
            deps.changes.clone(),
            deps.clock.clone(),
            candidate_tx,
        );
        let supervisor_task = tokio::spawn(supervisor.run(config_rx));

        info!("file navigator started");
        Ok(Self {
            router,
            tracker,
            intake_task,
            supervisor_task,
        })
    }

    /// Dispatches one user action against a live affordance. Fire and
    /// forget: the router logs and ignores stale correlation ids.
    pub fn dispatch_action(&self, correlation: CorrelationId, action: Action) {
        let router = self.router.clone();
        tokio::spawn(async move {
            router.dispatch(correlation, action).await;
        });
    }

    pub fn live_candidates(&self) -> usize {
        self.tracker.live_count()
    }

    pub fn stop(&self) {
        self.supervisor_task.abort();
        self.intake_task.abort();
        info!("file navigator stopped");
    }
}

impl Drop for FileNavigator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn intake_loop(router: Arc<CandidateRouter>, mut candidates: mpsc::Receiver<MoveCandidate>) {
    while let Some(candidate) = candidates.recv().await {
        router.handle_candidate(candidate).await;
    }
    debug!("candidate intake closed");
}
