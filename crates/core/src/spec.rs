//! Input records and the normalization boundary.
//!
//! Callers hand in loosely-filled [`GoalSpec`] records (from a template,
//! a UI form, or a CLI); [`Goal::from_spec`] validates and defaults every
//! field exactly once and produces the strongly-typed model. Milestone
//! dependencies in a spec are positional indices into the milestone list,
//! resolved to real ids here.

use serde::{Deserialize, Serialize};
use crate::goal::{EstimatedDuration, Goal, GoalStatus};
use crate::id::{GoalId, MilestoneId};
use crate::milestone::{Milestone, MilestoneKind};

/// Specification for creating a goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalSpec {
    /// Goal title, required non-empty
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional category; defaults to "general"
    pub category: Option<String>,

    /// Optional duration estimate; defaults to 4 weeks
    pub estimated_duration: Option<EstimatedDuration>,

    /// Milestone plan, in order
    pub milestones: Vec<MilestoneSpec>,
}

/// Specification for one milestone within a [`GoalSpec`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneSpec {
    /// Milestone title, required non-empty
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional kind; defaults to `Theory`
    pub kind: Option<MilestoneKind>,

    /// Zero-based indices of milestones in the same spec that must
    /// complete first
    pub depends_on: Vec<usize>,
}

/// Errors from goal spec normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Goal title was empty or whitespace
    #[error("goal title must not be empty")]
    EmptyTitle,

    /// A milestone title was empty or whitespace
    #[error("milestone {index} title must not be empty")]
    EmptyMilestoneTitle {
        /// Position of the offending milestone
        index: usize,
    },

    /// A duration estimate of zero units
    #[error("estimated duration must be positive")]
    ZeroDuration,

    /// A dependency index pointing outside the milestone list
    #[error("milestone {index} depends on out-of-range step {dependency}")]
    BadDependencyIndex {
        /// Position of the offending milestone
        index: usize,
        /// The out-of-range dependency index
        dependency: usize,
    },

    /// A milestone declared itself as a dependency
    #[error("milestone {index} depends on itself")]
    SelfDependency {
        /// Position of the offending milestone
        index: usize,
    },
}

impl Goal {
    /// Build a goal from a spec, validating and defaulting all fields.
    ///
    /// Positional `depends_on` indices are resolved to the generated
    /// milestone ids. `order` is assigned 1..n from list position.
    pub fn from_spec(spec: GoalSpec) -> Result<Goal, SpecError> {
        let title = spec.title.trim().to_string();
        if title.is_empty() {
            return Err(SpecError::EmptyTitle);
        }

        let estimated_duration = spec.estimated_duration.unwrap_or_default();
        if estimated_duration.value == 0 {
            return Err(SpecError::ZeroDuration);
        }

        let ids: Vec<MilestoneId> = spec.milestones.iter().map(|_| MilestoneId::new()).collect();

        let mut milestones = Vec::with_capacity(spec.milestones.len());
        for (index, m) in spec.milestones.into_iter().enumerate() {
            let title = m.title.trim().to_string();
            if title.is_empty() {
                return Err(SpecError::EmptyMilestoneTitle { index });
            }

            let mut dependencies = Vec::new();
            for dependency in m.depends_on {
                if dependency == index {
                    return Err(SpecError::SelfDependency { index });
                }
                let Some(dep_id) = ids.get(dependency) else {
                    return Err(SpecError::BadDependencyIndex { index, dependency });
                };
                if !dependencies.contains(dep_id) {
                    dependencies.push(*dep_id);
                }
            }

            milestones.push(Milestone {
                id: ids[index],
                title,
                description: m.description.unwrap_or_default(),
                kind: m.kind.unwrap_or(MilestoneKind::Theory),
                order: (index + 1) as u32,
                dependencies,
                is_completed: false,
                completed_at: None,
            });
        }

        let now = chrono::Utc::now();
        Ok(Goal {
            id: GoalId::new(),
            title,
            description: spec.description.unwrap_or_default(),
            category: spec.category.unwrap_or_else(|| "general".to_string()),
            estimated_duration,
            status: GoalStatus::Planning,
            progress: 0,
            completed_milestones: 0,
            milestones,
            created_at: now,
            updated_at: now,
            completed_at: None,
        })
    }
}
