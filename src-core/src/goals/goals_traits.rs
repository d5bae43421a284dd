use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::IndicatorPalette;
use crate::errors::Result;
use crate::goals::goal_progress_model::{GoalCard, GoalSummary};
use crate::goals::goals_model::{Goal, NewGoal};

/// Persistence collaborator for goals
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_update: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize>;
}

#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, updated_goal_data: Goal) -> Result<Goal>;
    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize>;
    fn progress_for_goal(&self, goal_id: &str, now: DateTime<Utc>) -> Result<f64>;
    fn goals_with_progress(&self, now: DateTime<Utc>) -> Result<Vec<Goal>>;
    fn goal_summaries(
        &self,
        now: DateTime<Utc>,
        palette: &IndicatorPalette,
    ) -> Result<Vec<GoalSummary>>;
    fn goal_cards(&self) -> Result<Vec<GoalCard>>;
}
