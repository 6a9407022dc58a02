//! In-memory ledger for tests and embedding.

use studypath_core::GoalId;
use super::{LedgerEntry, ProgressLedger, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Ledger backed by a process-local vector.
#[derive(Default)]
pub struct MemoryLedger {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry recorded so far, oldest first.
    pub async fn all_entries(&self) -> Vec<LedgerEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl ProgressLedger for MemoryLedger {
    async fn append(&self, entry: LedgerEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn entries_for(&self, goal_id: GoalId) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.goal_id == goal_id)
            .cloned()
            .collect())
    }
}
