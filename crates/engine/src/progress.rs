//! Completion gating and progress recomputation.

use chrono::Utc;
use studypath_core::{Goal, GoalStatus, MilestoneId};
use crate::error::MilestoneError;
use crate::graph;

/// Complete a milestone, gated by its dependencies, then recompute the
/// goal's derived progress and status.
///
/// Re-completion is rejected with `AlreadyCompleted` rather than
/// silently accepted, so callers can tell "nothing happened" from
/// "already done". Completed is terminal; no reverse transition exists
/// here.
pub fn complete_milestone(goal: &mut Goal, milestone_id: MilestoneId) -> Result<(), MilestoneError> {
    let milestone = goal
        .milestone(milestone_id)
        .ok_or(MilestoneError::NotFound(milestone_id))?;

    if milestone.is_completed {
        return Err(MilestoneError::AlreadyCompleted(milestone_id));
    }

    let unmet = graph::unmet_dependencies(goal, milestone);
    if !unmet.is_empty() {
        return Err(MilestoneError::DependenciesUnmet(unmet));
    }

    let milestone = goal
        .milestone_mut(milestone_id)
        .ok_or(MilestoneError::NotFound(milestone_id))?;
    milestone.is_completed = true;
    milestone.completed_at = Some(Utc::now());

    recompute_progress(goal);
    Ok(())
}

/// Recompute a goal's derived progress and status from milestone state.
///
/// Idempotent: calling it again with no intervening milestone change
/// leaves the goal identical. Only two status transitions happen here:
/// Planning -> Active once anything is completed, and anything ->
/// Completed when progress reaches 100. A goal never leaves Completed,
/// even if a milestone is administratively reverted afterwards.
pub fn recompute_progress(goal: &mut Goal) {
    let total = goal.milestones.len();
    let completed = goal.milestones.iter().filter(|m| m.is_completed).count();

    goal.completed_milestones = completed;
    goal.progress = if total == 0 {
        0
    } else {
        // round half up on the percentage: 1/3 -> 33, 2/3 -> 67, 3/8 -> 38
        ((200 * completed + total) / (2 * total)) as u8
    };

    if goal.progress == 100 && total > 0 && goal.status != GoalStatus::Completed {
        goal.status = GoalStatus::Completed;
        goal.completed_at = Some(Utc::now());
    } else if goal.progress > 0 && goal.status == GoalStatus::Planning {
        goal.status = GoalStatus::Active;
    }
}
