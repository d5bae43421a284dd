use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goals::goals_model::Goal;
use crate::goals::progress::{interval_progress, progress_fraction};
use crate::records::records_model::Record;
use crate::series::build_cumulative_series;

/// What a widget shows for a single goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub goal_id: String,
    pub goal_name: String,
    pub unit: String,
    pub current_value: f64,
    pub target_amount: f64,
    pub fraction: f64,
    pub sparkline: Vec<f64>,
    pub exported_at: DateTime<Utc>,
}

impl WidgetSnapshot {
    /// Snapshot from the goal's records. Completion uses the goal's own
    /// `progress` when the upstream supplied one, otherwise the progress of the
    /// interval containing `exported_at`, as the goals table computes it.
    pub fn from_records(goal: &Goal, records: &[Record], exported_at: DateTime<Utc>) -> Self {
        let series = build_cumulative_series(records);
        let current_value = series.current_value();
        let fraction = progress_fraction(
            goal.interval_start_amount,
            goal.progress.or_else(|| Some(interval_progress(goal, records, exported_at))),
            goal.goal_progress,
            goal.interval_target_amount,
        );

        WidgetSnapshot {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            unit: goal.unit.clone(),
            current_value,
            target_amount: goal.interval_target_amount,
            fraction,
            sparkline: series.values(),
            exported_at,
        }
    }
}
