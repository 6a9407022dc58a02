//! JSON file storage implementation.
//!
//! Stores each goal as a JSON file and keeps a small per-goal meta
//! marker (version + updated_at) bumped on every save, so an outer
//! layer can detect concurrent writers with an optimistic version
//! check.

use std::path::Path;
use studypath_core::{Goal, GoalId};
use super::{GoalStore, Result};
use tokio::fs;
use tracing::debug;

/// File-based JSON storage backend.
pub struct JsonStore {
    root: std::path::PathBuf,
}

impl JsonStore {
    /// Create storage rooted at `root`, creating the `goals/` and
    /// `meta/goals/` subdirectories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("goals")).await?;
        fs::create_dir_all(root.join("meta").join("goals")).await?;

        Ok(Self { root })
    }

    fn goal_path(&self, id: GoalId) -> std::path::PathBuf {
        self.root.join("goals").join(format!("{}.json", id))
    }

    fn meta_path(&self, id: GoalId) -> std::path::PathBuf {
        self.root
            .join("meta")
            .join("goals")
            .join(format!("{}.meta.json", id))
    }

    /// Read and increment the per-goal version, return the new version.
    async fn bump_version(&self, id: GoalId) -> Result<u64> {
        let path = self.meta_path(id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl GoalStore for JsonStore {
    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        let path = self.goal_path(goal.id);
        let json = serde_json::to_string_pretty(goal)?;
        fs::write(&path, json.as_bytes()).await?;

        let version = self.bump_version(goal.id).await?;
        debug!("saved goal {} (version {})", goal.id, version);
        Ok(())
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        read_json(&self.goal_path(id)).await
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = list_dir(&self.root.join("goals")).await?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        fs::remove_file(self.goal_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Ok(())
            } else {
                Err(e)
            }
        })?;
        let _ = fs::remove_file(self.meta_path(id)).await;
        debug!("deleted goal {}", id);
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &std::path::Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypath_core::{Goal, GoalSpec, MilestoneSpec};

    fn sample_goal(title: &str) -> Goal {
        Goal::from_spec(GoalSpec {
            title: title.to_string(),
            milestones: vec![MilestoneSpec {
                title: "First step".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let goal = sample_goal("Learn Rust");
        store.save_goal(&goal).await.unwrap();

        let loaded = store.load_goal(goal.id).await.unwrap().unwrap();
        assert_eq!(loaded, goal);
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        assert!(store.load_goal(GoalId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_all_goals() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        store.save_goal(&sample_goal("One")).await.unwrap();
        store.save_goal(&sample_goal("Two")).await.unwrap();

        let goals = store.list_goals().await.unwrap();
        assert_eq!(goals.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_goal_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let goal = sample_goal("Learn Rust");
        store.save_goal(&goal).await.unwrap();
        store.delete_goal(goal.id).await.unwrap();
        assert!(store.load_goal(goal.id).await.unwrap().is_none());

        // second delete is a no-op
        store.delete_goal(goal.id).await.unwrap();
    }

    #[tokio::test]
    async fn version_meta_bumped_on_each_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let goal = sample_goal("Learn Rust");
        store.save_goal(&goal).await.unwrap();
        store.save_goal(&goal).await.unwrap();

        let meta = tokio::fs::read_to_string(store.meta_path(goal.id))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&meta).unwrap();
        assert_eq!(json.get("version").and_then(|v| v.as_u64()), Some(2));
    }
}
