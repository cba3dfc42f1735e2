//! JSON-file backed configuration source.
//!
//! The file is the durable copy; an in-memory snapshot plus a watch
//! channel serve reads and change subscriptions. Writes go through an
//! atomic temp-write-then-rename so the file is always either the old
//! or the new configuration.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ff_core::ports::ConfigSourcePort;
use ff_core::{DestinationRef, NavigatorConfig, Source};
use tokio::fs;
use tokio::sync::watch;
use tracing::info;

pub struct FileConfigRepository {
    path: PathBuf,
    snapshot: Mutex<NavigatorConfig>,
    tx: watch::Sender<NavigatorConfig>,
}

impl FileConfigRepository {
    /// Opens the repository, reading the existing file or falling back
    /// to the default configuration when none exists yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parse configuration failed: {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no configuration file, using defaults");
                NavigatorConfig::default()
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read configuration failed: {}", path.display()))
            }
        };

        let (tx, _) = watch::channel(config.clone());
        Ok(Self {
            path,
            snapshot: Mutex::new(config),
            tx,
        })
    }

    /// Replaces the whole configuration, for the hosting settings UI.
    pub async fn replace(&self, config: NavigatorConfig) -> Result<()> {
        self.persist(config).await
    }

    async fn persist(&self, config: NavigatorConfig) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&config).context("serialize configuration failed")?;
        self.atomic_write(&content).await?;

        *self.snapshot.lock().expect("configuration snapshot poisoned") = config.clone();
        let _ = self.tx.send(config);
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create configuration dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp configuration failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp configuration to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn current(&self) -> NavigatorConfig {
        self.snapshot
            .lock()
            .expect("configuration snapshot poisoned")
            .clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSourcePort for FileConfigRepository {
    async fn load(&self) -> Result<NavigatorConfig> {
        Ok(self.current())
    }

    async fn save_last_destination(
        &self,
        source: &Source,
        destination: &DestinationRef,
    ) -> Result<()> {
        let mut config = self.current();
        config.set_last_destination(source, destination.clone());
        self.persist(config).await
    }

    async fn unset_auto_move(&self, source: &Source) -> Result<()> {
        let mut config = self.current();
        config.set_auto_move(source, false);
        self.persist(config).await
    }

    fn subscribe(&self) -> watch::Receiver<NavigatorConfig> {
        self.tx.subscribe()
    }
}
