//! File store backed by a local storage volume.
//!
//! References and destinations are paths relative to the volume root;
//! anything absolute or escaping the root is rejected as
//! uninterpretable.

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::UNIX_EPOCH;

use anyhow::Result;
use async_trait::async_trait;
use ff_core::ports::{FileRef, FileStorePort};
use ff_core::{DestinationRef, FileRecord, StoreError};
use tokio::fs;
use tracing::{debug, warn};

/// Writer-in-progress extensions; a file carrying one is not final yet.
const PENDING_EXTENSIONS: [&str; 4] = ["part", "crdownload", "download", "tmp"];

/// Top-level volume directory holding downloaded files.
const DOWNLOAD_DIR: &str = "Download";

pub struct LocalFileStore {
    root: PathBuf,
    /// Stand-in for the platform's elevated storage permission; hosts
    /// flip it when the grant changes.
    permission: AtomicBool,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            permission: AtomicBool::new(true),
        }
    }

    pub fn set_storage_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::SeqCst);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Interprets a relative reference against the volume root. `None`
    /// for absolute paths and paths that traverse out of the root.
    fn interpret(&self, reference: &str) -> Option<PathBuf> {
        let relative = Path::new(reference);
        if relative.components().any(|component| {
            !matches!(component, Component::Normal(_) | Component::CurDir)
        }) {
            return None;
        }
        Some(self.root.join(relative))
    }

    async fn record_for(&self, reference: &str, abs_path: &Path) -> Result<Option<FileRecord>> {
        let metadata = match fs::metadata(abs_path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_file() {
            return Ok(None);
        }

        let relative = Path::new(reference);
        let name = match relative.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => return Ok(None),
        };
        let volume_relative_dir = relative
            .parent()
            .map(path_to_slash_string)
            .unwrap_or_default();

        let added_at_ms = metadata
            .created()
            .or_else(|_| metadata.modified())
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);

        let pending_flag = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                PENDING_EXTENSIONS
                    .iter()
                    .any(|pending| ext.eq_ignore_ascii_case(pending))
            });
        let download_flag = relative
            .components()
            .next()
            .is_some_and(|component| component.as_os_str() == DOWNLOAD_DIR);

        Ok(Some(FileRecord {
            store_id: reference.to_string(),
            abs_path: abs_path.to_path_buf(),
            volume_relative_dir,
            name,
            size: metadata.len(),
            added_at_ms,
            pending_flag,
            download_flag,
        }))
    }
}

#[async_trait]
impl FileStorePort for LocalFileStore {
    async fn resolve(&self, file_ref: &FileRef) -> Result<Option<FileRecord>> {
        let Some(abs_path) = self.interpret(file_ref.as_str()) else {
            debug!(%file_ref, "reference outside the volume root");
            return Ok(None);
        };
        self.record_for(file_ref.as_str(), &abs_path).await
    }

    async fn has_storage_permission(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    async fn file_exists(&self, record: &FileRecord) -> bool {
        fs::metadata(&record.abs_path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    async fn destination_resolvable(&self, destination: &DestinationRef) -> bool {
        self.interpret(destination.as_str()).is_some()
    }

    async fn has_child(&self, destination: &DestinationRef, name: &str) -> Result<bool> {
        let Some(dir) = self.interpret(destination.as_str()) else {
            return Ok(false);
        };
        Ok(fs::metadata(dir.join(name)).await.is_ok())
    }

    async fn move_file(
        &self,
        record: &FileRecord,
        destination: &DestinationRef,
    ) -> Result<(), StoreError> {
        let dir = self
            .interpret(destination.as_str())
            .ok_or(StoreError::DestinationMissing)?;
        match fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => return Err(StoreError::DestinationMissing),
        }
        match fs::metadata(&record.abs_path).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Err(StoreError::SourceMissing),
        }

        let target = dir.join(&record.name);
        if fs::metadata(&target).await.is_ok() {
            return Err(StoreError::AlreadyExists);
        }

        match fs::rename(&record.abs_path, &target).await {
            Ok(()) => Ok(()),
            // Rename fails across mount points; fall back to copying.
            Err(rename_err) => {
                warn!(%rename_err, from = %record.abs_path.display(), to = %target.display(),
                    "rename failed, copying instead");
                fs::copy(&record.abs_path, &target).await?;
                fs::remove_file(&record.abs_path).await?;
                Ok(())
            }
        }
    }
}

fn path_to_slash_string(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
