//! Dependency validation and blocking state.
//!
//! All checks run over one goal's milestone set. A dependency id that
//! does not resolve to a milestone in the goal fails closed: it blocks
//! completion and is rejected from new edits.

use std::collections::HashSet;
use studypath_core::{Goal, Milestone, MilestoneId};
use crate::error::{DependencyError, UnmetDependency};

/// Whether completing this milestone is currently disallowed.
///
/// Completed milestones are never blocked; dependency checks only gate
/// the transition into completion, they do not retroactively invalidate
/// it.
pub fn is_blocked(goal: &Goal, milestone: &Milestone) -> bool {
    if milestone.is_completed {
        return false;
    }
    milestone
        .dependencies
        .iter()
        .any(|&dep| goal.milestone(dep).map_or(true, |m| !m.is_completed))
}

/// Directly unmet dependencies of a milestone, for "blocked by: X, Y"
/// rendering. Transitive incomplete ancestors are not reported.
pub fn unmet_dependencies(goal: &Goal, milestone: &Milestone) -> Vec<UnmetDependency> {
    if milestone.is_completed {
        return Vec::new();
    }
    milestone
        .dependencies
        .iter()
        .filter_map(|&dep| match goal.milestone(dep) {
            Some(m) if m.is_completed => None,
            Some(m) => Some(UnmetDependency {
                id: dep,
                title: Some(m.title.clone()),
            }),
            None => Some(UnmetDependency { id: dep, title: None }),
        })
        .collect()
}

/// Replace a milestone's dependency set, all-or-nothing.
///
/// Candidates are deduplicated (first occurrence kept). The edit is
/// rejected whole if it self-references, names an id outside the goal,
/// or would make the dependency graph cyclic.
pub fn set_dependencies<'a>(
    goal: &'a mut Goal,
    milestone_id: MilestoneId,
    candidates: &[MilestoneId],
) -> Result<&'a Milestone, DependencyError> {
    let index = goal
        .milestones
        .iter()
        .position(|m| m.id == milestone_id)
        .ok_or(DependencyError::NotFound(milestone_id))?;

    let mut deps: Vec<MilestoneId> = Vec::with_capacity(candidates.len());
    for &id in candidates {
        if !deps.contains(&id) {
            deps.push(id);
        }
    }

    if deps.contains(&milestone_id) {
        return Err(DependencyError::SelfReference(milestone_id));
    }

    let known: HashSet<MilestoneId> = goal.milestones.iter().map(|m| m.id).collect();
    let unknown: Vec<MilestoneId> = deps
        .iter()
        .copied()
        .filter(|id| !known.contains(id))
        .collect();
    if !unknown.is_empty() {
        return Err(DependencyError::UnknownDependency(unknown));
    }

    if let Some(cycle) = cycle_through(goal, milestone_id, &deps) {
        return Err(DependencyError::CycleDetected(cycle));
    }

    goal.milestones[index].dependencies = deps;
    Ok(&goal.milestones[index])
}

/// Validate a goal's entire dependency graph: every dependency id must
/// resolve within the goal, no milestone may depend on itself, and the
/// relation must be acyclic.
pub fn validate_graph(goal: &Goal) -> Result<(), DependencyError> {
    let known: HashSet<MilestoneId> = goal.milestones.iter().map(|m| m.id).collect();

    for milestone in &goal.milestones {
        if milestone.depends_on(milestone.id) {
            return Err(DependencyError::SelfReference(milestone.id));
        }
        let unknown: Vec<MilestoneId> = milestone
            .dependencies
            .iter()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        if !unknown.is_empty() {
            return Err(DependencyError::UnknownDependency(unknown));
        }
    }

    for milestone in &goal.milestones {
        if let Some(cycle) = cycle_through(goal, milestone.id, &milestone.dependencies) {
            return Err(DependencyError::CycleDetected(cycle));
        }
    }
    Ok(())
}

/// Search for a dependency path from `start` back to itself, with
/// `start`'s outgoing edges taken from `start_deps` instead of its
/// stored set. Any cycle introduced by an edit must pass through the
/// edited milestone, so searching from it alone is sufficient.
fn cycle_through(
    goal: &Goal,
    start: MilestoneId,
    start_deps: &[MilestoneId],
) -> Option<Vec<MilestoneId>> {
    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    if walk(goal, start, start_deps, start, &mut visited, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk(
    goal: &Goal,
    start: MilestoneId,
    start_deps: &[MilestoneId],
    node: MilestoneId,
    visited: &mut HashSet<MilestoneId>,
    path: &mut Vec<MilestoneId>,
) -> bool {
    let deps: &[MilestoneId] = if node == start {
        start_deps
    } else {
        goal.milestone(node)
            .map(|m| m.dependencies.as_slice())
            .unwrap_or(&[])
    };

    for &dep in deps {
        if dep == start {
            return true;
        }
        if visited.insert(dep) {
            path.push(dep);
            if walk(goal, start, start_deps, dep, visited, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}
