//! Change watchers: one task per media kind plus a single aggregate
//! non-media watcher, each serially consuming its own notification
//! stream with its own dedup cache.

use std::sync::Arc;

use anyhow::Result;
use ff_core::matcher::{MatchStrategy, MediaMatcher, NonMediaMatcher};
use ff_core::ports::{ChangeNotice, ChangeStreamPort, ClockPort, FileStorePort, WatchScope};
use ff_core::{MoveCandidate, NavigatorConfig, RecencyCache, SourceKind};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct ChangeWatcher {
    label: String,
    matcher: Box<dyn MatchStrategy>,
    cache: RecencyCache,
    store: Arc<dyn FileStorePort>,
    clock: Arc<dyn ClockPort>,
    candidate_tx: mpsc::Sender<MoveCandidate>,
}

impl ChangeWatcher {
    pub fn new(
        label: impl Into<String>,
        matcher: Box<dyn MatchStrategy>,
        store: Arc<dyn FileStorePort>,
        clock: Arc<dyn ClockPort>,
        candidate_tx: mpsc::Sender<MoveCandidate>,
    ) -> Self {
        Self {
            label: label.into(),
            matcher,
            cache: RecencyCache::default(),
            store,
            clock,
            candidate_tx,
        }
    }

    /// Serially processes the watcher's stream until it closes. A single
    /// malformed event never propagates an error upward; it is dropped
    /// with a trace.
    pub async fn run(mut self, mut notices: mpsc::Receiver<ChangeNotice>) {
        info!(watcher = %self.label, "watcher registered");
        while let Some(notice) = notices.recv().await {
            self.on_change(notice).await;
        }
        debug!(watcher = %self.label, "change stream closed");
    }

    async fn on_change(&mut self, notice: ChangeNotice) {
        debug!(watcher = %self.label, file_ref = %notice.file_ref, "change notification");

        let record = match self.store.resolve(&notice.file_ref).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.discard("reference did not resolve");
                return;
            }
            Err(err) => {
                self.discard(&format!("resolve failed: {err}"));
                return;
            }
        };

        // A pending file is a terminal discard for this event; the store
        // re-notifies once the writer finalizes it.
        if record.is_pending() {
            self.discard("file still pending");
            return;
        }
        if !record.is_newly_added(self.clock.now_ms()) {
            self.discard("not recently added");
            return;
        }
        if !self.cache.offer(&record) {
            self.discard("identical file in cache");
            return;
        }

        let source_kind = SourceKind::classify(&record);
        let Some(source) = self.matcher.match_record(&record, source_kind) else {
            self.discard("no enabled source matches");
            return;
        };

        let candidate = MoveCandidate::new(record, source);
        info!(watcher = %self.label, file = %candidate.record.name, source = %candidate.source, "emitting move candidate");
        if self.candidate_tx.send(candidate).await.is_err() {
            warn!(watcher = %self.label, "candidate intake closed, dropping candidate");
        }
    }

    fn discard(&self, reason: &str) {
        debug!(watcher = %self.label, "DISCARDED: {reason}");
    }
}

/// Builds and spawns the watcher set for one configuration snapshot:
/// a media watcher per enabled media kind (scoped to its enabled source
/// kinds) and one aggregate watcher for all enabled non-media kinds.
/// An empty enabled set simply yields no watchers.
pub async fn spawn_watchers(
    config: &NavigatorConfig,
    store: Arc<dyn FileStorePort>,
    changes: Arc<dyn ChangeStreamPort>,
    clock: Arc<dyn ClockPort>,
    candidate_tx: mpsc::Sender<MoveCandidate>,
) -> Result<Vec<JoinHandle<()>>> {
    let mut tasks = Vec::new();

    for kind in config.enabled_media_kinds() {
        let watcher = ChangeWatcher::new(
            format!("media:{}", kind.label()),
            Box::new(MediaMatcher::new(kind, config.enabled_source_kinds(kind))),
            store.clone(),
            clock.clone(),
            candidate_tx.clone(),
        );
        let notices = changes.subscribe(WatchScope::Media(kind)).await?;
        tasks.push(tokio::spawn(watcher.run(notices)));
    }

    let non_media = config.enabled_non_media_kinds();
    if !non_media.is_empty() {
        let watcher = ChangeWatcher::new(
            "non-media",
            Box::new(NonMediaMatcher::new(non_media)),
            store,
            clock,
            candidate_tx,
        );
        let notices = changes.subscribe(WatchScope::Downloads).await?;
        tasks.push(tokio::spawn(watcher.run(notices)));
    }

    Ok(tasks)
}

/// Owns the live watcher set and rebuilds it from scratch on every
/// configuration change: full teardown plus fresh subscriptions, never
/// an incremental diff.
pub struct WatcherSupervisor {
    store: Arc<dyn FileStorePort>,
    changes: Arc<dyn ChangeStreamPort>,
    clock: Arc<dyn ClockPort>,
    candidate_tx: mpsc::Sender<MoveCandidate>,
}

impl WatcherSupervisor {
    pub fn new(
        store: Arc<dyn FileStorePort>,
        changes: Arc<dyn ChangeStreamPort>,
        clock: Arc<dyn ClockPort>,
        candidate_tx: mpsc::Sender<MoveCandidate>,
    ) -> Self {
        Self {
            store,
            changes,
            clock,
            candidate_tx,
        }
    }

    pub async fn run(self, mut config_rx: watch::Receiver<NavigatorConfig>) {
        let initial = config_rx.borrow_and_update().clone();
        let mut tasks = self.rebuild(&initial).await;

        while config_rx.changed().await.is_ok() {
            let config = config_rx.borrow_and_update().clone();
            for task in tasks.drain(..) {
                task.abort();
            }
            tasks = self.rebuild(&config).await;
        }

        for task in tasks {
            task.abort();
        }
        debug!("configuration source closed, supervisor stopping");
    }

    async fn rebuild(&self, config: &NavigatorConfig) -> Vec<JoinHandle<()>> {
        match spawn_watchers(
            config,
            self.store.clone(),
            self.changes.clone(),
            self.clock.clone(),
            self.candidate_tx.clone(),
        )
        .await
        {
            Ok(tasks) => {
                info!(watchers = tasks.len(), "watcher set rebuilt");
                tasks
            }
            Err(err) => {
                warn!(%err, "rebuilding watcher set failed, running without watchers");
                Vec::new()
            }
        }
    }
}
