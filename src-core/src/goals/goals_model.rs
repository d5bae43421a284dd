use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::errors::{Result, ValidationError};

/// A length of time exchanged as an ISO-8601 duration (`PT86400S`, `P1D`,
/// `P1DT2H30M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IsoDuration(Duration);

impl IsoDuration {
    pub fn from_duration(duration: Duration) -> Self {
        IsoDuration(duration)
    }

    pub fn seconds(seconds: i64) -> Self {
        IsoDuration(Duration::seconds(seconds))
    }

    pub fn days(days: i64) -> Self {
        IsoDuration(Duration::days(days))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Duration::zero()
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = self.0.num_milliseconds();
        if total_millis < 0 {
            f.write_str("-")?;
        }
        let total_millis = total_millis.unsigned_abs();

        let millis = total_millis % 1000;
        let total_seconds = total_millis / 1000;
        let days = total_seconds / 86_400;
        let hours = (total_seconds % 86_400) / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        f.write_str("P")?;
        if days > 0 {
            write!(f, "{}D", days)?;
        }
        if hours == 0 && minutes == 0 && seconds == 0 && millis == 0 {
            if days == 0 {
                f.write_str("T0S")?;
            }
            return Ok(());
        }

        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}M", minutes)?;
        }
        if millis > 0 {
            write!(f, "{}.{:03}S", seconds, millis)?;
        } else if seconds > 0 {
            write!(f, "{}S", seconds)?;
        }
        Ok(())
    }
}

impl FromStr for IsoDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDuration(s.to_string());

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(unsigned) => (true, unsigned),
            None => (false, trimmed),
        };
        let rest = unsigned.strip_prefix('P').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid());
        }

        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) if !time.is_empty() => (date, Some(time)),
            Some(_) => return Err(invalid()),
            None => (rest, None),
        };

        let mut total_millis: f64 = 0.0;
        let mut number = String::new();

        for c in date_part.chars() {
            match c {
                '0'..='9' | '.' => number.push(c),
                'W' | 'D' => {
                    let value: f64 = number.parse().map_err(|_| invalid())?;
                    let unit_days = if c == 'W' { 7.0 } else { 1.0 };
                    total_millis += value * unit_days * 86_400_000.0;
                    number.clear();
                }
                _ => return Err(invalid()),
            }
        }
        if !number.is_empty() {
            return Err(invalid());
        }

        if let Some(time_part) = time_part {
            for c in time_part.chars() {
                match c {
                    '0'..='9' | '.' => number.push(c),
                    'H' | 'M' | 'S' => {
                        let value: f64 = number.parse().map_err(|_| invalid())?;
                        let unit_millis = match c {
                            'H' => 3_600_000.0,
                            'M' => 60_000.0,
                            _ => 1000.0,
                        };
                        total_millis += value * unit_millis;
                        number.clear();
                    }
                    _ => return Err(invalid()),
                }
            }
            if !number.is_empty() {
                return Err(invalid());
            }
        }

        if !total_millis.is_finite() || total_millis > i64::MAX as f64 / 2.0 {
            return Err(invalid());
        }

        let millis = total_millis.round() as i64;
        Ok(IsoDuration(Duration::milliseconds(if negative { -millis } else { millis })))
    }
}

/// A goal as stored by the persistence collaborator.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(with = "crate::dates::utc_datetime")]
    pub interval_start_date: DateTime<Utc>,
    #[serde_as(as = "DisplayFromStr")]
    pub interval_length: IsoDuration,
    #[serde_as(as = "DisplayFromStr")]
    pub bucket_size: IsoDuration,
    pub interval_start_amount: f64,
    pub interval_target_amount: f64,
    pub reset: bool,
    /// Current cumulative amount, when the upstream has computed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Target for the current interval, falls back to `interval_target_amount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_progress: Option<f64>,
}

impl Goal {
    pub fn goal_progress_target(&self) -> f64 {
        self.goal_progress.unwrap_or(self.interval_target_amount)
    }

    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(
            &self.name,
            &self.unit,
            &self.interval_length,
            &self.bucket_size,
            self.interval_start_amount,
            self.interval_target_amount,
        )
    }

    /// The interval `now` falls into.
    ///
    /// Resetting goals step from `interval_start_date` in `interval_length`
    /// increments; anything else accumulates from the start date onward. An
    /// instant before the start date maps to the first interval.
    pub fn current_interval(&self, now: DateTime<Utc>) -> IntervalWindow {
        let start = self.interval_start_date;
        let length = self.interval_length.as_duration();

        if !self.reset || !self.interval_length.is_positive() {
            return IntervalWindow { start, end: None };
        }

        let length_ms = length.num_milliseconds();
        let elapsed_ms = (now - start).num_milliseconds();
        let completed = if elapsed_ms > 0 { elapsed_ms / length_ms } else { 0 };

        let window_start = start
            .checked_add_signed(Duration::milliseconds(completed.saturating_mul(length_ms)))
            .unwrap_or(start);
        IntervalWindow {
            start: window_start,
            // past the representable range the interval never ends
            end: window_start.checked_add_signed(length),
        }
    }
}

/// Half-open `[start, end)` span; `end == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl IntervalWindow {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && self.end.map_or(true, |end| *instant < end)
    }
}

/// Longest accepted interval or bucket, roughly a thousand years
pub const MAX_GOAL_DURATION_DAYS: i64 = 366_000;

fn validate_goal_fields(
    name: &str,
    unit: &str,
    interval_length: &IsoDuration,
    bucket_size: &IsoDuration,
    interval_start_amount: f64,
    interval_target_amount: f64,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if unit.trim().is_empty() {
        return Err(ValidationError::MissingField("unit".to_string()).into());
    }
    let max = IsoDuration::days(MAX_GOAL_DURATION_DAYS);
    for (label, duration) in [("interval length", interval_length), ("bucket size", bucket_size)] {
        if !duration.is_positive() {
            return Err(ValidationError::InvalidDuration(format!(
                "{} must be positive, got {}",
                label, duration
            ))
            .into());
        }
        if *duration > max {
            return Err(ValidationError::InvalidDuration(format!(
                "{} must be at most {} days, got {}",
                label, MAX_GOAL_DURATION_DAYS, duration
            ))
            .into());
        }
    }
    if !interval_start_amount.is_finite() || !interval_target_amount.is_finite() {
        return Err(ValidationError::InvalidInput(
            "Interval start and target amounts must be finite numbers".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Payload for creating a goal.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub unit: String,
    #[serde(with = "crate::dates::utc_datetime")]
    pub interval_start_date: DateTime<Utc>,
    #[serde_as(as = "DisplayFromStr")]
    pub interval_length: IsoDuration,
    #[serde_as(as = "DisplayFromStr")]
    pub bucket_size: IsoDuration,
    pub interval_start_amount: f64,
    pub interval_target_amount: f64,
    #[serde(default)]
    pub reset: bool,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_goal_fields(
            &self.name,
            &self.unit,
            &self.interval_length,
            &self.bucket_size,
            self.interval_start_amount,
            self.interval_target_amount,
        )
    }

    pub fn into_goal(self, id: String) -> Goal {
        Goal {
            id,
            name: self.name,
            unit: self.unit,
            interval_start_date: self.interval_start_date,
            interval_length: self.interval_length,
            bucket_size: self.bucket_size,
            interval_start_amount: self.interval_start_amount,
            interval_target_amount: self.interval_target_amount,
            reset: self.reset,
            progress: None,
            goal_progress: None,
        }
    }
}
