//! In-memory goal store for tests and embedding.

use std::collections::HashMap;
use studypath_core::{Goal, GoalId};
use super::{GoalStore, Result};
use tokio::sync::RwLock;

/// Goal store backed by a process-local map.
#[derive(Default)]
pub struct MemoryStore {
    goals: RwLock<HashMap<GoalId, Goal>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl GoalStore for MemoryStore {
    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.goals.write().await.insert(goal.id, goal.clone());
        Ok(())
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        Ok(self.goals.read().await.get(&id).cloned())
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self.goals.read().await.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        self.goals.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypath_core::GoalSpec;

    #[tokio::test]
    async fn round_trip() {
        let mut store = MemoryStore::new();
        let goal = Goal::from_spec(GoalSpec {
            title: "Learn Rust".to_string(),
            ..Default::default()
        })
        .unwrap();

        store.save_goal(&goal).await.unwrap();
        assert_eq!(store.load_goal(goal.id).await.unwrap(), Some(goal.clone()));

        store.delete_goal(goal.id).await.unwrap();
        assert_eq!(store.load_goal(goal.id).await.unwrap(), None);
    }
}
