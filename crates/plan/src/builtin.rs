//! Builtin milestone plans.

use studypath_core::{MilestoneKind, MilestoneSpec};

/// Canned milestone plan for a goal category.
///
/// Steps form a chain: each depends on its predecessor, expressed as
/// positional indices the normalization boundary resolves to real ids.
/// Unknown categories fall back to a generic plan.
pub fn builtin_plan(category: &str) -> Vec<MilestoneSpec> {
    match category.to_lowercase().as_str() {
        "programming" => chain(vec![
            (
                "Core syntax and tooling",
                "Work through the language's official guide and set up the toolchain",
                MilestoneKind::Theory,
            ),
            (
                "Exercises on fundamentals",
                "Daily katas covering control flow, collections, and functions",
                MilestoneKind::Practice,
            ),
            (
                "Idioms and standard library",
                "Read idiomatic code and learn the standard library surface",
                MilestoneKind::Theory,
            ),
            (
                "Build a small tool",
                "Design and ship a CLI or script that solves a real problem",
                MilestoneKind::Project,
            ),
            (
                "Code review checkpoint",
                "Have the project reviewed and address the findings",
                MilestoneKind::Assessment,
            ),
        ]),
        "language" => chain(vec![
            (
                "Survival vocabulary",
                "Learn the 500 most frequent words and basic phrases",
                MilestoneKind::Theory,
            ),
            (
                "Daily listening practice",
                "Short daily sessions with graded audio material",
                MilestoneKind::Practice,
            ),
            (
                "Grammar foundations",
                "Cover the core tense and sentence patterns",
                MilestoneKind::Theory,
            ),
            (
                "Hold a ten-minute conversation",
                "Record a conversation with a native speaker or tutor",
                MilestoneKind::Project,
            ),
            (
                "Placement test",
                "Take a standard placement test and log the level reached",
                MilestoneKind::Assessment,
            ),
        ]),
        "music" => chain(vec![
            (
                "Instrument basics",
                "Posture, tuning, and first scales",
                MilestoneKind::Theory,
            ),
            (
                "Daily technique drills",
                "Scales, arpeggios, and rhythm exercises",
                MilestoneKind::Practice,
            ),
            (
                "Learn three pieces",
                "Prepare three pieces of increasing difficulty",
                MilestoneKind::Project,
            ),
            (
                "Record a performance",
                "Record all three pieces end to end and self-evaluate",
                MilestoneKind::Assessment,
            ),
        ]),
        _ => chain(vec![
            (
                "Map the territory",
                "Collect learning resources and sketch what competence looks like",
                MilestoneKind::Theory,
            ),
            (
                "Deliberate practice",
                "Regular practice sessions on the fundamentals",
                MilestoneKind::Practice,
            ),
            (
                "Apply it",
                "Use the skill on a small self-chosen project",
                MilestoneKind::Project,
            ),
            (
                "Prove it",
                "Demonstrate the skill to someone who can judge it",
                MilestoneKind::Assessment,
            ),
        ]),
    }
}

/// Build a linear plan where each step depends on the previous one.
fn chain(steps: Vec<(&str, &str, MilestoneKind)>) -> Vec<MilestoneSpec> {
    steps
        .into_iter()
        .enumerate()
        .map(|(i, (title, description, kind))| MilestoneSpec {
            title: title.to_string(),
            description: Some(description.to_string()),
            kind: Some(kind),
            depends_on: if i == 0 { vec![] } else { vec![i - 1] },
        })
        .collect()
}

/// Registry of milestone plans keyed by category.
pub struct PlanRegistry {
    plans: Vec<(String, Vec<MilestoneSpec>)>,
}

impl PlanRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { plans: Vec::new() }
    }

    /// Register a plan for a category, replacing any existing one.
    pub fn register(&mut self, category: impl Into<String>, plan: Vec<MilestoneSpec>) {
        let category = category.into().to_lowercase();
        self.plans.retain(|(c, _)| *c != category);
        self.plans.push((category, plan));
    }

    /// Plan for a category: a registered one, else the builtin.
    pub fn plan_for(&self, category: &str) -> Vec<MilestoneSpec> {
        let category = category.to_lowercase();
        self.plans
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, plan)| plan.clone())
            .unwrap_or_else(|| builtin_plan(&category))
    }

    /// Registered categories.
    pub fn categories(&self) -> Vec<&str> {
        self.plans.iter().map(|(c, _)| c.as_str()).collect()
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programming_plan_is_a_chain() {
        let plan = builtin_plan("programming");
        assert_eq!(plan.len(), 5);
        assert!(plan[0].depends_on.is_empty());
        for (i, step) in plan.iter().enumerate().skip(1) {
            assert_eq!(step.depends_on, vec![i - 1]);
        }
    }

    #[test]
    fn plan_covers_all_kinds() {
        let kinds: Vec<MilestoneKind> = builtin_plan("programming")
            .into_iter()
            .filter_map(|s| s.kind)
            .collect();
        assert!(kinds.contains(&MilestoneKind::Theory));
        assert!(kinds.contains(&MilestoneKind::Practice));
        assert!(kinds.contains(&MilestoneKind::Project));
        assert!(kinds.contains(&MilestoneKind::Assessment));
    }

    #[test]
    fn unknown_category_falls_back_to_generic() {
        let plan = builtin_plan("basket weaving");
        assert!(!plan.is_empty());
        assert_eq!(plan[0].title, "Map the territory");
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        assert_eq!(builtin_plan("Programming").len(), 5);
    }

    #[test]
    fn registry_prefers_registered_plans() {
        let mut registry = PlanRegistry::new();
        registry.register(
            "programming",
            vec![MilestoneSpec {
                title: "Just ship it".to_string(),
                ..Default::default()
            }],
        );

        assert_eq!(registry.plan_for("PROGRAMMING").len(), 1);
        // unregistered categories still resolve
        assert_eq!(registry.plan_for("music").len(), 4);
    }
}
