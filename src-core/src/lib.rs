//! Goal tracking core.
//!
//! Turns persisted goals and their dated records into the derived state the
//! client renders: a cumulative per-day series for charts and sparklines, and
//! a clamped completion fraction with its indicator colour.

pub mod config;
pub mod dates;
pub mod errors;
pub mod goals;
pub mod records;
pub mod series;
pub mod view_controls;
pub mod widgets;

pub use errors::{Error, Result, ValidationError};
