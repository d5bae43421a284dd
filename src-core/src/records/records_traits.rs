use async_trait::async_trait;

use crate::errors::Result;
use crate::records::records_model::{NewRecord, Record};
use crate::series::CumulativeSeries;

/// Persistence collaborator for records
#[async_trait]
pub trait RecordRepositoryTrait: Send + Sync {
    fn load_records(&self) -> Result<Vec<Record>>;
    fn get_record(&self, record_id: &str) -> Result<Record>;
    fn load_records_for_goal(&self, goal_id: &str) -> Result<Vec<Record>>;
    async fn insert_new_record(&self, new_record: NewRecord) -> Result<Record>;
    async fn delete_record(&self, record_id: String) -> Result<usize>;
    async fn delete_records_for_goal(&self, goal_id: String) -> Result<usize>;
}

#[async_trait]
pub trait RecordServiceTrait: Send + Sync {
    fn get_records(&self) -> Result<Vec<Record>>;
    fn get_records_for_goal(&self, goal_id: &str) -> Result<Vec<Record>>;
    async fn create_record(&self, new_record: NewRecord) -> Result<Record>;
    async fn delete_record(&self, record_id: String) -> Result<usize>;
    fn series_for_goal(&self, goal_id: &str) -> Result<CumulativeSeries>;
}
