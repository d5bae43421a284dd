use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, NewGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;

/// Process-local goal store. Listings come back in insertion order.
#[derive(Default)]
pub struct InMemoryGoalRepository {
    goals: DashMap<String, (u64, Goal)>,
    next_seq: AtomicU64,
}

impl InMemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<(u64, Goal)> = self
            .goals
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        goals.sort_by_key(|(seq, _)| *seq);
        Ok(goals.into_iter().map(|(_, goal)| goal).collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.goals
            .get(goal_id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| Error::NotFound(format!("Goal '{}' not found", goal_id)))
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let goal = new_goal.into_goal(Uuid::new_v4().to_string());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.goals.insert(goal.id.clone(), (seq, goal.clone()));
        debug!("Stored goal {}", goal.id);
        Ok(goal)
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        goal_update.validate()?;
        let mut entry = self
            .goals
            .get_mut(&goal_update.id)
            .ok_or_else(|| Error::NotFound(format!("Goal '{}' not found", goal_update.id)))?;
        entry.value_mut().1 = goal_update.clone();
        Ok(goal_update)
    }

    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize> {
        Ok(self.goals.remove(&goal_id_to_delete).map_or(0, |_| 1))
    }
}
