//! Hand-rolled mock ports shared by the unit tests in this crate.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use anyhow::Result;
use ff_core::ports::{
    ActionSurfacePort, ClockPort, ConfigSourcePort, FileRef, FileStorePort, HistorySinkPort,
};
use ff_core::{
    CorrelationId, DestinationRef, Feedback, FileRecord, MoveCandidate, MoveEntry,
    NavigatorConfig, ResourceHandle, Source, StoreError,
};
use tokio::sync::watch;

/// Action surface that records every interaction.
#[derive(Default)]
pub struct RecordingSurface {
    presented: Mutex<Vec<(MoveCandidate, CorrelationId, Option<DestinationRef>)>>,
    dismissed: Mutex<Vec<CorrelationId>>,
    summaries: Mutex<Vec<usize>>,
    feedback: Mutex<Vec<Feedback>>,
    opened: Mutex<Vec<FileRecord>>,
    pick_result: Mutex<Option<DestinationRef>>,
    pick_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl RecordingSurface {
    pub fn set_pick_result(&self, destination: Option<DestinationRef>) {
        *self.pick_result.lock().unwrap() = destination;
    }

    /// Holds the destination picker open until the gate gains a permit,
    /// for tests racing other actions against it.
    pub fn set_pick_gate(&self, gate: Arc<Semaphore>) {
        *self.pick_gate.lock().unwrap() = Some(gate);
    }

    pub fn presented(&self) -> Vec<(MoveCandidate, CorrelationId, Option<DestinationRef>)> {
        self.presented.lock().unwrap().clone()
    }

    pub fn dismissed(&self) -> Vec<CorrelationId> {
        self.dismissed.lock().unwrap().clone()
    }

    pub fn summary_updates(&self) -> Vec<usize> {
        self.summaries.lock().unwrap().clone()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<FileRecord> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ActionSurfacePort for RecordingSurface {
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

    async fn update_summary(&self, live: usize) -> Result<()> {
        self.summaries.lock().unwrap().push(live);
        Ok(())
    }

    async fn dismiss(&self, correlation: CorrelationId) -> Result<()> {
        self.dismissed.lock().unwrap().push(correlation);
        Ok(())
    }

    async fn pick_destination(&self, _candidate: &MoveCandidate) -> Result<Option<DestinationRef>> {
        let gate = self.pick_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await?.forget();
        }
        Ok(self.pick_result.lock().unwrap().clone())
    }

    async fn open_file(&self, record: &FileRecord) -> Result<()> {
        self.opened.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn publish(&self, feedback: Feedback) -> Result<()> {
        self.feedback.lock().unwrap().push(feedback);
        Ok(())
    }
}

/// Forced failure for the next `move_file` call on the mock store.
#[derive(Debug, Clone)]
pub enum MoveFailure {
    SourceMissing,
    DestinationMissing,
    AlreadyExists,
    Io(String),
}

impl From<MoveFailure> for StoreError {
    fn from(failure: MoveFailure) -> Self {
        match failure {
            MoveFailure::SourceMissing => StoreError::SourceMissing,
            MoveFailure::DestinationMissing => StoreError::DestinationMissing,
            MoveFailure::AlreadyExists => StoreError::AlreadyExists,
            MoveFailure::Io(detail) => {
                StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, detail))
            }
        }
    }
}

/// In-memory file store with scriptable failure behavior.
#[derive(Default)]
pub struct MockStore {
    records: Mutex<HashMap<String, FileRecord>>,
    permission: AtomicBool,
    missing_files: Mutex<HashSet<String>>,
    unresolvable_destinations: Mutex<HashSet<String>>,
    children: Mutex<HashSet<(String, String)>>,
    move_failure: Mutex<Option<MoveFailure>>,
    moved: Mutex<Vec<(FileRecord, DestinationRef)>>,
}

impl MockStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.permission.store(true, Ordering::SeqCst);
        store
    }

    pub fn insert_record(&self, file_ref: &FileRef, record: FileRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(file_ref.as_str().to_string(), record);
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::SeqCst);
    }

    pub fn set_file_missing(&self, record: &FileRecord) {
        self.missing_files
            .lock()
            .unwrap()
            .insert(record.store_id.clone());
    }

    pub fn set_destination_unresolvable(&self, destination: &DestinationRef) {
        self.unresolvable_destinations
            .lock()
            .unwrap()
            .insert(destination.as_str().to_string());
    }

    pub fn add_child(&self, destination: &DestinationRef, name: &str) {
        self.children
            .lock()
            .unwrap()
            .insert((destination.as_str().to_string(), name.to_string()));
    }

    pub fn fail_next_move(&self, failure: MoveFailure) {
        *self.move_failure.lock().unwrap() = Some(failure);
    }

    pub fn moved(&self) -> Vec<(FileRecord, DestinationRef)> {
        self.moved.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileStorePort for MockStore {
    async fn resolve(&self, file_ref: &FileRef) -> Result<Option<FileRecord>> {
        Ok(self.records.lock().unwrap().get(file_ref.as_str()).cloned())
    }

    async fn has_storage_permission(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    async fn file_exists(&self, record: &FileRecord) -> bool {
        !self.missing_files.lock().unwrap().contains(&record.store_id)
    }

    async fn destination_resolvable(&self, destination: &DestinationRef) -> bool {
        !self
            .unresolvable_destinations
            .lock()
            .unwrap()
            .contains(destination.as_str())
    }

    async fn has_child(&self, destination: &DestinationRef, name: &str) -> Result<bool> {
        Ok(self
            .children
            .lock()
            .unwrap()
            .contains(&(destination.as_str().to_string(), name.to_string())))
    }

    async fn move_file(
        &self,
        record: &FileRecord,
        destination: &DestinationRef,
    ) -> Result<(), StoreError> {
        if let Some(failure) = self.move_failure.lock().unwrap().take() {
            return Err(failure.into());
        }
        self.moved
            .lock()
            .unwrap()
            .push((record.clone(), destination.clone()));
        Ok(())
    }
}

/// Config source over an in-memory snapshot with watch broadcast.
pub struct StubConfigSource {
    config: Mutex<NavigatorConfig>,
    tx: watch::Sender<NavigatorConfig>,
    auto_move_unset: Mutex<Vec<Source>>,
    saved_destinations: Mutex<Vec<(Source, DestinationRef)>>,
}

impl StubConfigSource {
    pub fn new(config: NavigatorConfig) -> Self {
        let (tx, _) = watch::channel(config.clone());
        Self {
            config: Mutex::new(config),
            tx,
            auto_move_unset: Mutex::new(Vec::new()),
            saved_destinations: Mutex::new(Vec::new()),
        }
    }

    pub fn replace(&self, config: NavigatorConfig) {
        *self.config.lock().unwrap() = config.clone();
        let _ = self.tx.send(config);
    }

    pub fn auto_move_unset(&self) -> Vec<Source> {
        self.auto_move_unset.lock().unwrap().clone()
    }

    pub fn saved_destinations(&self) -> Vec<(Source, DestinationRef)> {
        self.saved_destinations.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConfigSourcePort for StubConfigSource {
    async fn load(&self) -> Result<NavigatorConfig> {
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save_last_destination(
        &self,
        source: &Source,
        destination: &DestinationRef,
    ) -> Result<()> {
        let updated = {
            let mut config = self.config.lock().unwrap();
            config.set_last_destination(source, destination.clone());
            config.clone()
        };
        self.saved_destinations
            .lock()
            .unwrap()
            .push((*source, destination.clone()));
        let _ = self.tx.send(updated);
        Ok(())
    }

    async fn unset_auto_move(&self, source: &Source) -> Result<()> {
        let updated = {
            let mut config = self.config.lock().unwrap();
            config.set_auto_move(source, false);
            config.clone()
        };
        self.auto_move_unset.lock().unwrap().push(*source);
        let _ = self.tx.send(updated);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<NavigatorConfig> {
        self.tx.subscribe()
    }
}

#[derive(Default)]
pub struct RecordingHistory {
    entries: Mutex<Vec<MoveEntry>>,
}

impl RecordingHistory {
    pub fn entries(&self) -> Vec<MoveEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HistorySinkPort for RecordingHistory {
    async fn append(&self, entry: &MoveEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub struct FixedClock(Mutex<i64>);

impl FixedClock {
    pub fn at(now_ms: i64) -> Self {
        Self(Mutex::new(now_ms))
    }

    pub fn set(&self, now_ms: i64) {
        *self.0.lock().unwrap() = now_ms;
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        *self.0.lock().unwrap()
    }
}

/// Change stream whose subscriptions never yield; for tests that drive
/// the pipeline below the watcher layer.
#[derive(Default)]
pub struct NullChangeStream;

#[async_trait::async_trait]
impl ff_core::ports::ChangeStreamPort for NullChangeStream {
    async fn subscribe(
        &self,
        _scope: ff_core::ports::WatchScope,
    ) -> Result<tokio::sync::mpsc::Receiver<ff_core::ports::ChangeNotice>> {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        std::mem::forget(tx);
        Ok(rx)
    }
}

pub fn record_in(dir: &str, name: &str, id: &str, now_ms: i64) -> FileRecord {
    FileRecord {
        store_id: id.to_string(),
        abs_path: PathBuf::from("/storage").join(dir).join(name),
        volume_relative_dir: dir.to_string(),
        name: name.to_string(),
        size: 1024,
        added_at_ms: now_ms,
        pending_flag: false,
        download_flag: dir.starts_with("Download"),
    }
}
