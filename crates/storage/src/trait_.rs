//! Storage trait abstraction.

use async_trait::async_trait;
use studypath_core::{Goal, GoalId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for goal aggregates.
///
/// This trait allows different storage backends to be plugged in.
/// Saves are atomic at single-goal granularity; callers serialize
/// mutations of one goal (the engine's service holds the store
/// exclusively for the duration of a load-modify-save).
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Save a goal (create or update).
    async fn save_goal(&mut self, goal: &Goal) -> Result<()>;

    /// Load a goal by ID.
    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>>;

    /// List all goals.
    async fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Delete a goal. Missing goals are not an error.
    async fn delete_goal(&mut self, id: GoalId) -> Result<()>;
}
