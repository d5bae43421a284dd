use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::records::records_model::{NewRecord, Record};
use crate::records::records_traits::RecordRepositoryTrait;

/// Process-local record store. Listings come back in the order records were
/// logged, not sorted by date.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: DashMap<String, (u64, Record)>,
    next_seq: AtomicU64,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_ordered<F>(&self, keep: F) -> Vec<Record>
    where
        F: Fn(&Record) -> bool,
    {
        let mut records: Vec<(u64, Record)> = self
            .records
            .iter()
            .filter(|entry| keep(&entry.value().1))
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|(seq, _)| *seq);
        records.into_iter().map(|(_, record)| record).collect()
    }
}

#[async_trait]
impl RecordRepositoryTrait for InMemoryRecordRepository {
    fn load_records(&self) -> Result<Vec<Record>> {
        Ok(self.collect_ordered(|_| true))
    }

    fn get_record(&self, record_id: &str) -> Result<Record> {
        self.records
            .get(record_id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| Error::NotFound(format!("Record '{}' not found", record_id)))
    }

    fn load_records_for_goal(&self, goal_id: &str) -> Result<Vec<Record>> {
        Ok(self.collect_ordered(|record| record.goal_id == goal_id))
    }

    async fn insert_new_record(&self, new_record: NewRecord) -> Result<Record> {
        new_record.validate()?;
        let id = Uuid::new_v4().to_string();
        let record = new_record.into_record(id.clone());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.records.insert(id, (seq, record.clone()));
        debug!("Stored record for goal {}", record.goal_id);
        Ok(record)
    }

    async fn delete_record(&self, record_id: String) -> Result<usize> {
        Ok(self.records.remove(&record_id).map_or(0, |_| 1))
    }

    async fn delete_records_for_goal(&self, goal_id: String) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|_, (_, record)| record.goal_id != goal_id);
        Ok(before.saturating_sub(self.records.len()))
    }
}
