use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use log::info;

use crate::errors::{Error, Result};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::records::records_model::Record;
use crate::records::records_traits::RecordRepositoryTrait;
use crate::widgets::widget_bridge::WidgetBridge;

/// Pushes every goal's snapshot through a [`WidgetBridge`].
pub struct WidgetSyncService<G: GoalRepositoryTrait, R: RecordRepositoryTrait, B: WidgetBridge> {
    goal_repo: Arc<G>,
    record_repo: Arc<R>,
    bridge: Arc<B>,
}

impl<G, R, B> WidgetSyncService<G, R, B>
where
    G: GoalRepositoryTrait,
    R: RecordRepositoryTrait,
    B: WidgetBridge,
{
    pub fn new(goal_repo: Arc<G>, record_repo: Arc<R>, bridge: Arc<B>) -> Self {
        WidgetSyncService {
            goal_repo,
            record_repo,
            bridge,
        }
    }

    pub async fn export_goal(&self, goal_id: &str) -> Result<()> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        let records = self.record_repo.load_records_for_goal(goal_id)?;
        self.bridge
            .export_widget_snapshot(&goal, &records)
            .await
            .map_err(|e| Error::Export(format!("goal {}: {}", goal_id, e)))
    }

    /// Export all goals concurrently. Returns how many were exported.
    pub async fn export_all(&self) -> Result<usize> {
        let goals = self.goal_repo.load_goals()?;
        let mut grouped: HashMap<String, Vec<Record>> = HashMap::new();
        for record in self.record_repo.load_records()? {
            grouped.entry(record.goal_id.clone()).or_default().push(record);
        }

        let exports = goals.iter().map(|goal| {
            let records = grouped.get(&goal.id).map(Vec::as_slice).unwrap_or_default();
            async move {
                self.bridge
                    .export_widget_snapshot(goal, records)
                    .await
                    .map_err(|e| Error::Export(format!("goal {}: {}", goal.id, e)))
            }
        });
        try_join_all(exports).await?;

        info!("Exported {} widget snapshots", goals.len());
        Ok(goals.len())
    }
}
