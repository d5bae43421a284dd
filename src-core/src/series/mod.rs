//! Cumulative per-day series built from goal records.

pub mod series_builder;
pub mod series_model;

pub use series_builder::{annotate_running_progress, build_cumulative_series, build_cumulative_series_opt};
pub use series_model::{ChartPoint, CumulativeSeries, SeriesEntry};
