//! Append-only move history as one JSON object per line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ff_core::ports::HistorySinkPort;
use ff_core::MoveEntry;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub struct JsonlHistorySink {
    path: PathBuf,
}

impl JsonlHistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the full history, oldest first. Missing file means no
    /// moves yet.
    pub async fn entries(&self) -> Result<Vec<MoveEntry>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read history failed: {}", self.path.display()))
            }
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).context("parse history entry failed"))
            .collect()
    }
}

#[async_trait]
impl HistorySinkPort for JsonlHistorySink {
    async fn append(&self, entry: &MoveEntry) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create history dir failed: {}", dir.display()))?;
        }

        let mut line = serde_json::to_string(entry).context("serialize history entry failed")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("open history failed: {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("append history failed: {}", self.path.display()))?;

        Ok(())
    }
}
