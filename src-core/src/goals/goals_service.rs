use crate::config::IndicatorPalette;
use crate::errors::{Error, Result};
use crate::goals::goal_progress_model::{GoalCard, GoalSummary};
use crate::goals::goals_model::{Goal, IntervalWindow, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::goals::progress::interval_progress;
use crate::records::records_model::Record;
use crate::records::records_traits::RecordRepositoryTrait;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

pub struct GoalService<G: GoalRepositoryTrait, R: RecordRepositoryTrait> {
    goal_repo: Arc<G>,
    record_repo: Arc<R>,
}

impl<G: GoalRepositoryTrait, R: RecordRepositoryTrait> GoalService<G, R> {
    pub fn new(goal_repo: Arc<G>, record_repo: Arc<R>) -> Self {
        GoalService {
            goal_repo,
            record_repo,
        }
    }

    pub fn current_interval(&self, goal_id: &str, now: DateTime<Utc>) -> Result<IntervalWindow> {
        Ok(self.goal_repo.get_goal(goal_id)?.current_interval(now))
    }

    /// Records grouped by goal id, each group in logged order
    fn records_by_goal(&self) -> Result<HashMap<String, Vec<Record>>> {
        let mut grouped: HashMap<String, Vec<Record>> = HashMap::new();
        for record in self.record_repo.load_records()? {
            grouped.entry(record.goal_id.clone()).or_default().push(record);
        }
        Ok(grouped)
    }

    /// Fill in `progress` and `goal_progress` for the interval containing `now`
    fn with_progress(goal: Goal, records: &[Record], now: DateTime<Utc>) -> Goal {
        let progress = interval_progress(&goal, records, now);
        let goal_progress = goal.interval_target_amount;
        Goal {
            progress: Some(progress),
            goal_progress: Some(goal_progress),
            ..goal
        }
    }
}

#[async_trait]
impl<G: GoalRepositoryTrait, R: RecordRepositoryTrait> GoalServiceTrait for GoalService<G, R> {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        debug!("Getting goals");
        self.goal_repo.load_goals()
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        debug!("Getting goal '{}'", goal.name);
        Ok(goal)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        info!("Creating goal '{}'", new_goal.name);
        self.goal_repo.insert_new_goal(new_goal).await
    }

    async fn update_goal(&self, updated_goal_data: Goal) -> Result<Goal> {
        updated_goal_data.validate()?;
        self.goal_repo.update_goal(updated_goal_data).await
    }

    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize> {
        let goal = match self.goal_repo.get_goal(&goal_id_to_delete) {
            Ok(goal) => goal,
            Err(Error::NotFound(_)) => {
                debug!("Goal {} already gone", goal_id_to_delete);
                return Ok(0);
            }
            Err(e) => return Err(e),
        };
        info!("Deleting goal '{}'", goal.name);
        let removed_records = self
            .record_repo
            .delete_records_for_goal(goal_id_to_delete.clone())
            .await?;
        debug!("Removed {} records of goal '{}'", removed_records, goal.name);
        self.goal_repo.delete_goal(goal_id_to_delete).await
    }

    fn progress_for_goal(&self, goal_id: &str, now: DateTime<Utc>) -> Result<f64> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        let records = self.record_repo.load_records_for_goal(goal_id)?;
        debug!("Getting progress for goal '{}'", goal.name);
        Ok(interval_progress(&goal, &records, now))
    }

    fn goals_with_progress(&self, now: DateTime<Utc>) -> Result<Vec<Goal>> {
        let grouped = self.records_by_goal()?;
        Ok(self
            .goal_repo
            .load_goals()?
            .into_iter()
            .map(|goal| {
                let records = grouped.get(&goal.id).map(Vec::as_slice).unwrap_or_default();
                Self::with_progress(goal, records, now)
            })
            .collect())
    }

    fn goal_summaries(
        &self,
        now: DateTime<Utc>,
        palette: &IndicatorPalette,
    ) -> Result<Vec<GoalSummary>> {
        Ok(self
            .goals_with_progress(now)?
            .iter()
            .map(|goal| GoalSummary::new(goal, palette))
            .collect())
    }

    fn goal_cards(&self) -> Result<Vec<GoalCard>> {
        let grouped = self.records_by_goal()?;
        Ok(self
            .goal_repo
            .load_goals()?
            .iter()
            .map(|goal| GoalCard::new(goal, grouped.get(&goal.id).map(Vec::as_slice)))
            .collect())
    }
}
