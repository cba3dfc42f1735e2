//! Change notifications for the local store, backed by `notify`.
//!
//! One subscription takes one OS watcher over the directories belonging
//! to its scope. Raw create/modify events are forwarded as volume
//! relative references; interpretation happens upstream through the
//! file store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ff_core::ports::{ChangeNotice, ChangeStreamPort, FileRef, WatchScope};
use ff_core::FileKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

const CHANNEL_CAPACITY: usize = 256;

pub struct NotifyChangeStream {
    root: PathBuf,
    /// Live OS watchers, one per subscription. Pruned lazily once the
    /// subscriber side has been dropped.
    watchers: Mutex<Vec<(RecommendedWatcher, mpsc::Sender<ChangeNotice>)>>,
}

impl NotifyChangeStream {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            watchers: Mutex::new(Vec::new()),
        }
    }

    /// Volume directories covered by one scope. Non-media kinds all
    /// surface in the download directory and share the downloads scope.
    fn scope_dirs(scope: WatchScope) -> &'static [&'static str] {
        match scope {
            WatchScope::Media(FileKind::Image) => &["DCIM", "Pictures"],
            WatchScope::Media(FileKind::Video) => &["DCIM", "Movies"],
            WatchScope::Media(FileKind::Audio) => &["Music", "Recordings"],
            WatchScope::Media(_) | WatchScope::Downloads => &["Download"],
        }
    }
}

#[async_trait]
impl ChangeStreamPort for NotifyChangeStream {
    async fn subscribe(&self, scope: WatchScope) -> Result<mpsc::Receiver<ChangeNotice>> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let root = self.root.clone();
        let event_tx = tx.clone();
        let mut watcher =
            notify::recommended_watcher(move |event: notify::Result<Event>| match event {
                Ok(event) => forward(&root, &event, &event_tx),
                Err(err) => warn!(%err, "watch backend error"),
            })
            .context("creating filesystem watcher")?;

        for dir in Self::scope_dirs(scope) {
            let path = self.root.join(dir);
            if !path.is_dir() {
                debug!(?scope, dir, "scope directory absent, not watching");
                continue;
            }
            watcher
                .watch(&path, RecursiveMode::Recursive)
                .with_context(|| format!("watching {}", path.display()))?;
        }

        let mut watchers = self.watchers.lock().expect("watcher registry poisoned");
        watchers.retain(|(_, sender)| !sender.is_closed());
        watchers.push((watcher, tx));

        Ok(rx)
    }
}

fn forward(root: &Path, event: &Event, tx: &mpsc::Sender<ChangeNotice>) {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }
    for path in &event.paths {
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let Some(reference) = relative.to_str() else {
            continue;
        };
        let notice = ChangeNotice {
            file_ref: FileRef::new(reference.replace(std::path::MAIN_SEPARATOR, "/")),
        };
        trace!(file_ref = %notice.file_ref, "forwarding change event");
        if tx.blocking_send(notice).is_err() {
            // Subscriber gone; the watcher gets pruned on the next
            // subscription.
            return;
        }
    }
}
