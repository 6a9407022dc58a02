//! Progress Ledger
//!
//! Append-only log of study events (milestone completions, study time)
//! and the streak/velocity aggregations derived from it.

#![warn(missing_docs)]

pub mod entry;
pub mod json;
pub mod memory;
pub mod stats;

pub use entry::{EntryKind, LedgerEntry};
pub use json::JsonLedger;
pub use memory::MemoryLedger;
pub use stats::{current_streak, weekly_velocity};

use async_trait::async_trait;
use studypath_core::GoalId;

/// Error type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Append-only store of study events.
///
/// Entries are never updated or removed. Writers treat appends as
/// best-effort notifications; a failed append must not affect the
/// operation that produced the event.
#[async_trait]
pub trait ProgressLedger: Send + Sync {
    /// Append an entry.
    async fn append(&self, entry: LedgerEntry) -> Result<()>;

    /// All entries for a goal, oldest first.
    async fn entries_for(&self, goal_id: GoalId) -> Result<Vec<LedgerEntry>>;
}
