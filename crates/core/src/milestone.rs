//! Milestone model - ordered sub-unit of a goal with prerequisites.

use serde::{Deserialize, Serialize};
use crate::id::MilestoneId;
use crate::Time;

/// A milestone is an ordered step toward a goal, optionally gated by
/// other milestones of the same goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Identifier, unique within the parent goal
    pub id: MilestoneId,

    /// Milestone title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// What kind of work this milestone is
    pub kind: MilestoneKind,

    /// Display and default unlock order
    pub order: u32,

    /// Ids of same-goal milestones that must complete first.
    /// Set semantics; never contains the milestone's own id.
    pub dependencies: Vec<MilestoneId>,

    /// Whether the milestone has been completed
    pub is_completed: bool,

    /// Set exactly when `is_completed` transitions false -> true
    pub completed_at: Option<Time>,
}

impl Milestone {
    /// Whether this milestone declares a dependency on `id`.
    pub fn depends_on(&self, id: MilestoneId) -> bool {
        self.dependencies.contains(&id)
    }
}

/// Kind of work a milestone represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneKind {
    /// Reading, watching, studying concepts
    Theory,
    /// Exercises and drills
    Practice,
    /// A self-contained build
    Project,
    /// A test of what was learned
    Assessment,
}
