//! Goal completion fraction and the indicator colour derived from it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::errors::ValidationError;
use crate::goals::goals_model::Goal;
use crate::records::records_model::Record;

/// Completion of a goal as a fraction in `[0, 1]`.
///
/// `current_progress` defaults to 0 and `goal_progress_target` to
/// `interval_target_amount`. A goal whose target equals its start amount has
/// no range; it counts as complete once progress reaches the start amount.
/// Non-finite inputs are not sanitised and may yield NaN.
pub fn progress_fraction(
    interval_start_amount: f64,
    current_progress: Option<f64>,
    goal_progress_target: Option<f64>,
    interval_target_amount: f64,
) -> f64 {
    let current = current_progress.unwrap_or(0.0);
    let target = goal_progress_target.unwrap_or(interval_target_amount);
    let range = target - interval_start_amount;

    if range == 0.0 {
        return if current >= interval_start_amount { 1.0 } else { 0.0 };
    }

    ((current - interval_start_amount) / range).clamp(0.0, 1.0)
}

/// [`progress_fraction`] over a goal's own fields.
pub fn goal_fraction(goal: &Goal) -> f64 {
    progress_fraction(
        goal.interval_start_amount,
        goal.progress,
        goal.goal_progress,
        goal.interval_target_amount,
    )
}

/// `interval_start_amount` plus every record of `goal` dated inside the
/// interval containing `now`.
pub fn interval_progress(goal: &Goal, records: &[Record], now: DateTime<Utc>) -> f64 {
    let window = goal.current_interval(now);
    records
        .iter()
        .filter(|r| r.goal_id == goal.id && window.contains(&r.date))
        .fold(goal.interval_start_amount, |sum, r| sum + r.amount)
}

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Blend `weight` of `self` with `1 - weight` of `other`, per channel.
    pub fn mix(&self, weight: f64, other: &Rgb) -> Rgb {
        let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| (a as f64 * weight + b as f64 * (1.0 - weight)).round() as u8;
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidInput(format!("'{}' is not a #rrggbb colour", s));

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}
