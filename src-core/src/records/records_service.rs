use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::errors::{Error, Result};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::records::records_model::{NewRecord, Record};
use crate::records::records_traits::{RecordRepositoryTrait, RecordServiceTrait};
use crate::series::{build_cumulative_series, CumulativeSeries};

pub struct RecordService<G: GoalRepositoryTrait, R: RecordRepositoryTrait> {
    goal_repo: Arc<G>,
    record_repo: Arc<R>,
}

impl<G: GoalRepositoryTrait, R: RecordRepositoryTrait> RecordService<G, R> {
    pub fn new(goal_repo: Arc<G>, record_repo: Arc<R>) -> Self {
        RecordService {
            goal_repo,
            record_repo,
        }
    }
}

#[async_trait]
impl<G: GoalRepositoryTrait, R: RecordRepositoryTrait> RecordServiceTrait for RecordService<G, R> {
    fn get_records(&self) -> Result<Vec<Record>> {
        debug!("Getting records");
        self.record_repo.load_records()
    }

    fn get_records_for_goal(&self, goal_id: &str) -> Result<Vec<Record>> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        debug!("Getting records for goal '{}'", goal.name);
        self.record_repo.load_records_for_goal(goal_id)
    }

    async fn create_record(&self, new_record: NewRecord) -> Result<Record> {
        let goal = match self.goal_repo.get_goal(&new_record.goal_id) {
            Ok(goal) => goal,
            Err(e) => {
                warn!("Rejected record for unknown goal {}", new_record.goal_id);
                return Err(e);
            }
        };
        info!("Creating record for goal '{}'", goal.name);
        self.record_repo.insert_new_record(new_record).await
    }

    async fn delete_record(&self, record_id: String) -> Result<usize> {
        let record = self.record_repo.get_record(&record_id)?;
        match self.goal_repo.get_goal(&record.goal_id) {
            Ok(goal) => info!("Deleting record for goal '{}'", goal.name),
            Err(Error::NotFound(_)) => info!("Deleting orphaned record {}", record_id),
            Err(e) => return Err(e),
        }
        self.record_repo.delete_record(record_id).await
    }

    fn series_for_goal(&self, goal_id: &str) -> Result<CumulativeSeries> {
        let records = self.get_records_for_goal(goal_id)?;
        Ok(build_cumulative_series(&records))
    }
}
