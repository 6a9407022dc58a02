//! File-backed ledger, one JSON line per entry.

use std::path::{Path, PathBuf};
use studypath_core::GoalId;
use super::{LedgerEntry, ProgressLedger, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Append-only ledger stored as a `.jsonl` file.
pub struct JsonLedger {
    path: PathBuf,
}

impl JsonLedger {
    /// Create a ledger at `path`, creating parent directories as needed.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self { path })
    }

    async fn read_all(&self) -> Result<Vec<LedgerEntry>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            entries.push(serde_json::from_str(line)?);
        }
        Ok(entries)
    }
}

#[async_trait]
impl ProgressLedger for JsonLedger {
    async fn append(&self, entry: LedgerEntry) -> Result<()> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }

    async fn entries_for(&self, goal_id: GoalId) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|e| e.goal_id == goal_id)
            .collect())
    }
}
