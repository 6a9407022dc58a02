//! Goal model - top-level learning objective with derived progress.

use serde::{Deserialize, Serialize};
use crate::id::{GoalId, MilestoneId};
use crate::milestone::Milestone;
use crate::Time;

/// A goal is a user's top-level learning objective, tracked to
/// completion via its milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Subject category, used to pick a milestone plan
    pub category: String,

    /// Rough duration estimate
    pub estimated_duration: EstimatedDuration,

    /// Goal status
    pub status: GoalStatus,

    /// Percentage of completed milestones (0-100), derived
    pub progress: u8,

    /// Completed milestone count, derived
    pub completed_milestones: usize,

    /// Milestones; the `order` field is the authoritative ordering,
    /// independent of position in this collection
    pub milestones: Vec<Milestone>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,

    /// When the goal first reached `Completed`
    pub completed_at: Option<Time>,
}

impl Goal {
    /// Look up a milestone by id.
    pub fn milestone(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Look up a milestone by id, mutably.
    pub fn milestone_mut(&mut self, id: MilestoneId) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }

    /// Milestones sorted by their `order` field.
    pub fn ordered_milestones(&self) -> Vec<&Milestone> {
        let mut ordered: Vec<&Milestone> = self.milestones.iter().collect();
        ordered.sort_by_key(|m| m.order);
        ordered
    }
}

/// Goal status.
///
/// `Planning` and `Completed` are entered by the engine as side effects
/// of milestone completion; `Paused` and `Cancelled` are user-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Created, no milestone completed yet
    Planning,
    /// At least one milestone completed
    Active,
    /// Goal paused by the user
    Paused,
    /// All milestones completed
    Completed,
    /// Goal cancelled by the user
    Cancelled,
}

/// Rough estimate of how long a goal will take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedDuration {
    /// Number of units, always positive
    pub value: u32,

    /// Unit of the estimate
    pub unit: DurationUnit,
}

/// Unit for a duration estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Duration in weeks
    Weeks,
    /// Duration in months
    Months,
}

impl Default for EstimatedDuration {
    fn default() -> Self {
        Self {
            value: 4,
            unit: DurationUnit::Weeks,
        }
    }
}
