//! Goal service - async façade over the engine.
//!
//! One service operation is one load-modify-save of a single goal
//! aggregate, performed while holding the store exclusively. That lock
//! supplies the per-goal mutual exclusion the recomputation of shared
//! `progress`/`status` requires; the engine functions themselves are
//! synchronous pure logic with no suspension points.

use std::sync::Arc;
use chrono::Utc;
use studypath_core::{Goal, GoalId, GoalSpec, Milestone, MilestoneId};
use studypath_ledger::{LedgerEntry, ProgressLedger};
use studypath_storage::GoalStore;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::EngineError;
use crate::{graph, progress};

/// Service façade wiring the engine to a goal store and an optional
/// progress ledger.
pub struct GoalService<S: GoalStore> {
    storage: Arc<Mutex<S>>,
    ledger: Option<Arc<dyn ProgressLedger>>,
}

impl<S: GoalStore> GoalService<S> {
    /// Create a service over a store.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            ledger: None,
        }
    }

    /// Attach a progress ledger. Completions will emit one entry each,
    /// best-effort.
    pub fn with_ledger(mut self, ledger: Arc<dyn ProgressLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Create a goal from a spec and persist it. The initial dependency
    /// graph is validated whole: unknown references, self references,
    /// and cycles are rejected before anything is saved.
    pub async fn create_goal(&self, spec: GoalSpec) -> Result<Goal, EngineError> {
        let goal = Goal::from_spec(spec)?;
        graph::validate_graph(&goal)?;

        self.storage.lock().await.save_goal(&goal).await?;
        Ok(goal)
    }

    /// Load a goal.
    pub async fn goal(&self, goal_id: GoalId) -> Result<Goal, EngineError> {
        self.storage
            .lock()
            .await
            .load_goal(goal_id)
            .await?
            .ok_or(EngineError::GoalNotFound(goal_id))
    }

    /// List all goals.
    pub async fn goals(&self) -> Result<Vec<Goal>, EngineError> {
        Ok(self.storage.lock().await.list_goals().await?)
    }

    /// Complete a milestone and persist the recomputed goal.
    ///
    /// On success one ledger entry is emitted (at-least-once,
    /// best-effort); a ledger failure never rolls back the completion.
    pub async fn complete_milestone(
        &self,
        goal_id: GoalId,
        milestone_id: MilestoneId,
    ) -> Result<Goal, EngineError> {
        let goal = {
            let mut storage = self.storage.lock().await;
            let mut goal = storage
                .load_goal(goal_id)
                .await?
                .ok_or(EngineError::GoalNotFound(goal_id))?;

            progress::complete_milestone(&mut goal, milestone_id)?;
            goal.updated_at = Utc::now();
            storage.save_goal(&goal).await?;
            goal
        };

        self.record_completion(&goal, milestone_id).await;
        Ok(goal)
    }

    /// Replace a milestone's dependencies and persist the goal.
    pub async fn set_dependencies(
        &self,
        goal_id: GoalId,
        milestone_id: MilestoneId,
        dependencies: &[MilestoneId],
    ) -> Result<Milestone, EngineError> {
        let mut storage = self.storage.lock().await;
        let mut goal = storage
            .load_goal(goal_id)
            .await?
            .ok_or(EngineError::GoalNotFound(goal_id))?;

        let milestone = graph::set_dependencies(&mut goal, milestone_id, dependencies)?.clone();
        goal.updated_at = Utc::now();
        storage.save_goal(&goal).await?;
        Ok(milestone)
    }

    /// Whether a milestone is currently blocked by its dependencies.
    pub async fn is_blocked(
        &self,
        goal_id: GoalId,
        milestone_id: MilestoneId,
    ) -> Result<bool, EngineError> {
        let goal = self.goal(goal_id).await?;
        let milestone = goal
            .milestone(milestone_id)
            .ok_or(crate::error::MilestoneError::NotFound(milestone_id))?;
        Ok(graph::is_blocked(&goal, milestone))
    }

    /// Recompute a goal's derived progress and status, persist, and
    /// return it. Safe to call redundantly.
    pub async fn recompute_progress(&self, goal_id: GoalId) -> Result<Goal, EngineError> {
        let mut storage = self.storage.lock().await;
        let mut goal = storage
            .load_goal(goal_id)
            .await?
            .ok_or(EngineError::GoalNotFound(goal_id))?;

        progress::recompute_progress(&mut goal);
        storage.save_goal(&goal).await?;
        Ok(goal)
    }

    async fn record_completion(&self, goal: &Goal, milestone_id: MilestoneId) {
        let Some(ledger) = &self.ledger else {
            return;
        };

        let title = goal
            .milestone(milestone_id)
            .map(|m| m.title.as_str())
            .unwrap_or_default();
        let entry = LedgerEntry::milestone(
            goal.id,
            milestone_id,
            format!("Completed milestone '{}'", title),
        );

        if let Err(e) = ledger.append(entry).await {
            // completion is already persisted; the ledger is advisory
            warn!("failed to record completion in ledger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypath_core::{GoalStatus, MilestoneSpec};
    use studypath_ledger::{EntryKind, LedgerError, MemoryLedger};
    use studypath_storage::MemoryStore;

    fn chain_spec() -> GoalSpec {
        GoalSpec {
            title: "Learn Rust".to_string(),
            category: Some("programming".to_string()),
            milestones: vec![
                MilestoneSpec {
                    title: "Basics".to_string(),
                    ..Default::default()
                },
                MilestoneSpec {
                    title: "Ownership".to_string(),
                    depends_on: vec![0],
                    ..Default::default()
                },
                MilestoneSpec {
                    title: "Build a CLI".to_string(),
                    depends_on: vec![1],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_and_complete_through_the_chain() {
        let service = GoalService::new(MemoryStore::new());
        let goal = service.create_goal(chain_spec()).await.unwrap();
        let ids: Vec<MilestoneId> = goal.milestones.iter().map(|m| m.id).collect();

        assert!(service.is_blocked(goal.id, ids[1]).await.unwrap());
        assert!(!service.is_blocked(goal.id, ids[0]).await.unwrap());

        let goal = service.complete_milestone(goal.id, ids[0]).await.unwrap();
        assert_eq!(goal.progress, 33);
        assert_eq!(goal.status, GoalStatus::Active);

        service.complete_milestone(goal.id, ids[1]).await.unwrap();
        let goal = service.complete_milestone(goal.id, ids[2]).await.unwrap();
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.status, GoalStatus::Completed);

        // persisted state matches the returned aggregate
        assert_eq!(service.goal(goal.id).await.unwrap(), goal);
    }

    #[tokio::test]
    async fn unknown_goal_reported() {
        let service = GoalService::new(MemoryStore::new());
        let ghost = GoalId::new();

        let err = service
            .complete_milestone(ghost, MilestoneId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::GoalNotFound(id) if id == ghost));
    }

    #[tokio::test]
    async fn completion_emits_ledger_entry() {
        let ledger = Arc::new(MemoryLedger::new());
        let service =
            GoalService::new(MemoryStore::new()).with_ledger(ledger.clone());

        let goal = service.create_goal(chain_spec()).await.unwrap();
        let first = goal.milestones[0].id;
        service.complete_milestone(goal.id, first).await.unwrap();

        let entries = ledger.entries_for(goal.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Milestone);
        assert_eq!(entries[0].value, 1);
        assert_eq!(entries[0].milestone_id, Some(first));
    }

    #[tokio::test]
    async fn ledger_failure_does_not_fail_completion() {
        struct FailingLedger;

        #[async_trait::async_trait]
        impl ProgressLedger for FailingLedger {
            async fn append(&self, _entry: LedgerEntry) -> studypath_ledger::Result<()> {
                Err(LedgerError::Other("ledger offline".to_string()))
            }

            async fn entries_for(
                &self,
                _goal_id: GoalId,
            ) -> studypath_ledger::Result<Vec<LedgerEntry>> {
                Ok(Vec::new())
            }
        }

        let service =
            GoalService::new(MemoryStore::new()).with_ledger(Arc::new(FailingLedger));

        let goal = service.create_goal(chain_spec()).await.unwrap();
        let first = goal.milestones[0].id;

        let goal = service.complete_milestone(goal.id, first).await.unwrap();
        assert!(goal.milestones[0].is_completed);
    }

    #[tokio::test]
    async fn blocked_completion_not_persisted() {
        let service = GoalService::new(MemoryStore::new());
        let goal = service.create_goal(chain_spec()).await.unwrap();
        let last = goal.milestones[2].id;

        let err = service.complete_milestone(goal.id, last).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Milestone(crate::error::MilestoneError::DependenciesUnmet(_))
        ));

        let stored = service.goal(goal.id).await.unwrap();
        assert_eq!(stored.progress, 0);
        assert!(!stored.milestones[2].is_completed);
    }

    #[tokio::test]
    async fn dependency_edit_persists() {
        let service = GoalService::new(MemoryStore::new());
        let goal = service.create_goal(chain_spec()).await.unwrap();
        let (first, last) = (goal.milestones[0].id, goal.milestones[2].id);

        let updated = service
            .set_dependencies(goal.id, last, &[first])
            .await
            .unwrap();
        assert_eq!(updated.dependencies, vec![first]);

        let stored = service.goal(goal.id).await.unwrap();
        assert_eq!(stored.milestones[2].dependencies, vec![first]);
    }

    #[tokio::test]
    async fn recompute_is_idempotent_end_to_end() {
        let service = GoalService::new(MemoryStore::new());
        let goal = service.create_goal(chain_spec()).await.unwrap();
        let first = goal.milestones[0].id;
        service.complete_milestone(goal.id, first).await.unwrap();

        let once = service.recompute_progress(goal.id).await.unwrap();
        let twice = service.recompute_progress(goal.id).await.unwrap();
        assert_eq!(once, twice);
    }
}
