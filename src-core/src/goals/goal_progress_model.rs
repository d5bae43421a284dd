use serde::{Deserialize, Serialize};

use crate::config::IndicatorPalette;
use crate::goals::goals_model::Goal;
use crate::goals::progress::goal_fraction;
use crate::records::records_model::Record;
use crate::series::build_cumulative_series_opt;

/// Progress bar state for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressIndicator {
    /// Completion in [0, 1]
    pub fraction: f64,
    /// Fraction as a whole percentage, for tooltips
    pub percent: i64,
    /// Blend of the complete and behind colours, `#rrggbb`
    pub color: String,
}

impl ProgressIndicator {
    pub fn from_fraction(fraction: f64, palette: &IndicatorPalette) -> Self {
        let color = palette
            .complete_color
            .mix(fraction, &palette.behind_color)
            .to_string();
        ProgressIndicator {
            fraction,
            percent: (fraction * 100.0).round() as i64,
            color,
        }
    }

    pub fn for_goal(goal: &Goal, palette: &IndicatorPalette) -> Self {
        Self::from_fraction(goal_fraction(goal), palette)
    }
}

/// One row of the goals table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub goal_id: String,
    pub name: String,
    pub unit: String,
    pub target_amount: f64,
    pub progress: Option<f64>,
    pub goal_progress: Option<f64>,
    pub indicator: ProgressIndicator,
}

impl GoalSummary {
    pub fn new(goal: &Goal, palette: &IndicatorPalette) -> Self {
        GoalSummary {
            goal_id: goal.id.clone(),
            name: goal.name.clone(),
            unit: goal.unit.clone(),
            target_amount: goal.interval_target_amount,
            progress: goal.progress,
            goal_progress: goal.goal_progress,
            indicator: ProgressIndicator::for_goal(goal, palette),
        }
    }
}

/// Card in the goals grid: running total against target, with sparkline data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCard {
    pub goal_id: String,
    pub name: String,
    pub unit: String,
    /// Last cumulative value of the goal's series, 0 with no records
    pub current_value: f64,
    pub target_amount: f64,
    pub sparkline: Vec<f64>,
}

impl GoalCard {
    pub fn new(goal: &Goal, records: Option<&[Record]>) -> Self {
        let series = build_cumulative_series_opt(records);
        GoalCard {
            goal_id: goal.id.clone(),
            name: goal.name.clone(),
            unit: goal.unit.clone(),
            current_value: series.current_value(),
            target_amount: goal.interval_target_amount,
            sparkline: series.values(),
        }
    }
}
