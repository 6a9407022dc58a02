//! Ledger entry model - atoms of the study timeline.

use serde::{Deserialize, Serialize};
use studypath_core::{EntryId, GoalId, MilestoneId, Time};

/// One timestamped study event for a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Goal this entry belongs to
    pub goal_id: GoalId,

    /// What kind of event this is
    pub kind: EntryKind,

    /// Event magnitude: 1 for a milestone completion, minutes for
    /// study time
    pub value: u32,

    /// Human-readable description
    pub description: String,

    /// The milestone involved, for milestone completions
    pub milestone_id: Option<MilestoneId>,

    /// When it happened
    pub timestamp: Time,
}

/// Kind of ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A milestone was completed
    Milestone,
    /// Time was spent studying
    StudyTime,
}

impl LedgerEntry {
    /// Entry for a completed milestone.
    pub fn milestone(
        goal_id: GoalId,
        milestone_id: MilestoneId,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            goal_id,
            kind: EntryKind::Milestone,
            value: 1,
            description: description.into(),
            milestone_id: Some(milestone_id),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Entry for time spent studying.
    pub fn study_time(goal_id: GoalId, minutes: u32, description: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            goal_id,
            kind: EntryKind::StudyTime,
            value: minutes,
            description: description.into(),
            milestone_id: None,
            timestamp: chrono::Utc::now(),
        }
    }
}
