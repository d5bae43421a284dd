use serde::{Deserialize, Serialize};

/// One point of the cumulative series: the running total at the end of a
/// UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntry {
    /// `YYYY-MM-DD`
    pub day: String,
    /// Timestamp of the record that last touched this entry
    pub iso_timestamp: String,
    pub cumulative_value: f64,
}

/// Result of folding a record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSeries {
    pub sum: f64,
    pub entries: Vec<SeriesEntry>,
}

/// `{ time, value }` pair as a line chart consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    pub value: f64,
}

impl From<&SeriesEntry> for ChartPoint {
    fn from(entry: &SeriesEntry) -> Self {
        ChartPoint {
            time: entry.day.clone(),
            value: entry.cumulative_value,
        }
    }
}

impl CumulativeSeries {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.entries.iter().map(ChartPoint::from).collect()
    }

    /// Straight line from the first to the last point, drawn dashed behind
    /// the series.
    pub fn guide_line(&self) -> Option<(ChartPoint, ChartPoint)> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        Some((first.into(), last.into()))
    }

    /// Sparkline data.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.cumulative_value).collect()
    }

    pub fn current_value(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.cumulative_value)
    }

    /// Whether entry days never go backwards. Charts with a strictly ordered
    /// time axis can only plot chronological series.
    pub fn is_chronological(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].day <= pair[1].day)
    }
}
