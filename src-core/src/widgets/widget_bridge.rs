use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::RwLock;

use crate::errors::Result;
use crate::goals::goals_model::Goal;
use crate::records::records_model::Record;
use crate::widgets::widget_model::WidgetSnapshot;

/// Port to the platform's widget storage
#[async_trait]
pub trait WidgetBridge: Send + Sync {
    async fn export_widget_snapshot(&self, goal: &Goal, records: &[Record]) -> Result<()>;
}

/// Bridge for targets without native widgets. Logs the payload and drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWidgetBridge;

#[async_trait]
impl WidgetBridge for NoopWidgetBridge {
    async fn export_widget_snapshot(&self, goal: &Goal, records: &[Record]) -> Result<()> {
        let snapshot = WidgetSnapshot::from_records(goal, records, Utc::now());
        debug!(
            "Widget export skipped for goal {}: {}",
            goal.id,
            serde_json::to_string(&snapshot)?
        );
        Ok(())
    }
}

/// Keeps the most recent snapshot per goal
#[derive(Debug, Default, Clone)]
pub struct InMemoryWidgetBridge {
    snapshots: Arc<RwLock<HashMap<String, WidgetSnapshot>>>,
}

impl InMemoryWidgetBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self, goal_id: &str) -> Option<WidgetSnapshot> {
        self.snapshots.read().await.get(goal_id).cloned()
    }

    pub async fn snapshots(&self) -> Vec<WidgetSnapshot> {
        let mut all: Vec<_> = self.snapshots.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.goal_id.cmp(&b.goal_id));
        all
    }

    pub async fn clear(&self) {
        self.snapshots.write().await.clear();
    }
}

#[async_trait]
impl WidgetBridge for InMemoryWidgetBridge {
    async fn export_widget_snapshot(&self, goal: &Goal, records: &[Record]) -> Result<()> {
        let snapshot = WidgetSnapshot::from_records(goal, records, Utc::now());
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(goal.id.clone(), snapshot);
        Ok(())
    }
}
