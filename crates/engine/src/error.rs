//! Engine error taxonomy.
//!
//! All engine failures are explicit result values; the engine performs
//! no logging, retries, or recovery of its own. Recovery policy lives
//! with the caller.

use studypath_core::{GoalId, MilestoneId, SpecError};
use studypath_storage::StorageError;

/// A dependency holding a milestone back from completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetDependency {
    /// Id of the unmet dependency
    pub id: MilestoneId,

    /// Title, when the id resolves to a milestone in the goal.
    /// `None` for a dangling reference.
    pub title: Option<String>,
}

impl std::fmt::Display for UnmetDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.title {
            Some(title) => write!(f, "'{}'", title),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Errors from milestone completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MilestoneError {
    /// Milestone id does not exist in the goal
    #[error("milestone {0} not found")]
    NotFound(MilestoneId),

    /// The milestone is already completed; callers wanting idempotence
    /// catch this and treat it as success
    #[error("milestone {0} is already completed")]
    AlreadyCompleted(MilestoneId),

    /// Completion is gated by incomplete prerequisites
    #[error("blocked by: {}", join_unmet(.0))]
    DependenciesUnmet(Vec<UnmetDependency>),
}

/// Errors from dependency edits. The edit is all-or-nothing; on error
/// the milestone's dependency set is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyError {
    /// Milestone id does not exist in the goal
    #[error("milestone {0} not found")]
    NotFound(MilestoneId),

    /// A milestone cannot depend on itself
    #[error("milestone {0} cannot depend on itself")]
    SelfReference(MilestoneId),

    /// Candidate ids that resolve to no milestone in the goal
    #[error("unknown dependency ids: {}", join_ids(.0))]
    UnknownDependency(Vec<MilestoneId>),

    /// The edit would make the goal's dependency graph cyclic
    #[error("dependency cycle: {}", join_ids(.0))]
    CycleDetected(Vec<MilestoneId>),
}

/// Errors surfaced by the goal service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Goal id does not exist in the store
    #[error("goal {0} not found")]
    GoalNotFound(GoalId),

    /// Milestone completion failed
    #[error(transparent)]
    Milestone(#[from] MilestoneError),

    /// Dependency edit rejected
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    /// Goal spec normalization failed
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_unmet(unmet: &[UnmetDependency]) -> String {
    unmet
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_ids(ids: &[MilestoneId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
