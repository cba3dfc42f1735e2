//! Shared fixtures for the integration tests: a scriptable action
//! surface plus polling helpers for the asynchronous pipeline.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use ff_core::ports::ActionSurfacePort;
use ff_core::{
    CorrelationId, DestinationRef, Feedback, FileRecord, MoveCandidate, ResourceHandle,
};

#[derive(Default)]
pub struct ScriptedSurface {
    presented: Mutex<Vec<(MoveCandidate, CorrelationId, Option<DestinationRef>)>>,
    feedback: Mutex<Vec<Feedback>>,
    pick_result: Mutex<Option<DestinationRef>>,
}

impl ScriptedSurface {
    pub fn set_pick_result(&self, destination: Option<DestinationRef>) {
        *self.pick_result.lock().unwrap() = destination;
    }

    pub fn presented(&self) -> Vec<(MoveCandidate, CorrelationId, Option<DestinationRef>)> {
        self.presented.lock().unwrap().clone()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ActionSurfacePort for ScriptedSurface {
    async fn present(
        &self,
        candidate: &MoveCandidate,
        handle: &ResourceHandle,
        quick_destination: Option<&DestinationRef>,
    ) -> Result<()> {
        self.presented.lock().unwrap().push((
            candidate.clone(),
            handle.correlation,
            quick_destination.cloned(),
        ));
        Ok(())
    }

    async fn update_summary(&self, _live: usize) -> Result<()> {
        Ok(())
    }

    async fn dismiss(&self, _correlation: CorrelationId) -> Result<()> {
        Ok(())
    }

    async fn pick_destination(&self, _candidate: &MoveCandidate) -> Result<Option<DestinationRef>> {
        Ok(self.pick_result.lock().unwrap().clone())
    }

    async fn open_file(&self, _record: &FileRecord) -> Result<()> {
        Ok(())
    }

    async fn publish(&self, feedback: Feedback) -> Result<()> {
        self.feedback.lock().unwrap().push(feedback);
        Ok(())
    }
}

/// Routes pipeline tracing into the test harness; `RUST_LOG` controls
/// verbosity. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Polls `condition` until it holds or the deadline passes.
pub async fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Duration::from_secs(10);
    let result = tokio::time::timeout(deadline, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for {what}");
}
