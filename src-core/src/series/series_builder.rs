use log::warn;

use crate::dates::{to_iso_millis, utc_day_key};
use crate::records::records_model::Record;
use crate::series::series_model::{CumulativeSeries, SeriesEntry};

/// Fold `records` into a running total, one entry per UTC day.
///
/// Records are taken in the order given and never sorted. A record falling
/// on the same day as the previous entry replaces that entry, so several logs
/// in one day become a single chart point; a day that reappears later after a
/// different day starts a new entry. Zero amounts still produce entries.
pub fn build_cumulative_series(records: &[Record]) -> CumulativeSeries {
    let mut series = CumulativeSeries::default();

    for record in records {
        let day = utc_day_key(&record.date);
        let iso_timestamp = to_iso_millis(&record.date);
        let cumulative_value = series.sum + record.amount;

        if let Some(last) = series.entries.last_mut().filter(|last| last.day == day) {
            last.iso_timestamp = iso_timestamp;
            last.cumulative_value = cumulative_value;
        } else {
            series.entries.push(SeriesEntry {
                day,
                iso_timestamp,
                cumulative_value,
            });
        }

        series.sum += record.amount;
    }

    if !series.is_chronological() {
        warn!(
            "Records for the series were not in chronological order; {} entries kept in input order",
            series.entries.len()
        );
    }

    series
}

/// [`build_cumulative_series`] where a missing list means no records.
pub fn build_cumulative_series_opt(records: Option<&[Record]>) -> CumulativeSeries {
    build_cumulative_series(records.unwrap_or_default())
}

/// Copies of `records` with `progress` set to the running total after each.
pub fn annotate_running_progress(records: &[Record]) -> Vec<Record> {
    let mut running = 0.0;
    records
        .iter()
        .map(|record| {
            running += record.amount;
            Record {
                progress: Some(running),
                ..record.clone()
            }
        })
        .collect()
}
