//! Derived duration computation.
//!
//! A stage's `duration` is always a pure function of
//! `(start_date, end_date, duration_unit)` and is never independently
//! settable by a caller. Both boundary instants are truncated to the whole
//! hour before differencing: sub-hour precision is not part of the duration
//! model.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Seconds per hour.
const SECS_PER_HOUR: i64 = 3600;
/// Hours per day.
const HOURS_PER_DAY: i64 = 24;
/// Hours per week.
const HOURS_PER_WEEK: f64 = 7.0 * 24.0;

/// Unit in which a stage duration is expressed.
///
/// Variants map to the `duration_unit` Postgres enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "duration_unit", rename_all = "UPPERCASE")]
pub enum DurationUnit {
    Hours,
    Days,
    Weeks,
}

impl DurationUnit {
    /// The wire/storage spelling of this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Hours => "HOURS",
            DurationUnit::Days => "DAYS",
            DurationUnit::Weeks => "WEEKS",
        }
    }
}

/// Compute the elapsed time between `start` and `end` in the requested unit.
///
/// Returns `None` when `end` is absent: a duration is meaningless without an
/// end boundary. Otherwise both instants are truncated to whole-hour
/// resolution and the difference is split into a calendar day count `D` and
/// a residual hour count `H` in `[0, 23]`:
///
/// - `Hours` -> `D*24 + H` (always integral)
/// - `Days`  -> `D + H/24`
/// - `Weeks` -> `D/7 + H/168`
///
/// Callers must have already enforced `end >= start` (the field validators
/// reject reversed windows before anything reaches this function); a
/// reversed window here is a programming-contract violation, not a runtime
/// case.
pub fn compute_duration(
    start: Timestamp,
    end: Option<Timestamp>,
    unit: DurationUnit,
) -> Option<f64> {
    let end = end?;

    // Floor both instants to the hour boundary, then work in whole hours.
    let start_hours = start.timestamp().div_euclid(SECS_PER_HOUR);
    let end_hours = end.timestamp().div_euclid(SECS_PER_HOUR);
    let total_hours = end_hours - start_hours;

    let days = total_hours.div_euclid(HOURS_PER_DAY);
    let hours = total_hours.rem_euclid(HOURS_PER_DAY);

    Some(match unit {
        DurationUnit::Hours => (days * HOURS_PER_DAY + hours) as f64,
        DurationUnit::Days => days as f64 + hours as f64 / HOURS_PER_DAY as f64,
        DurationUnit::Weeks => days as f64 / 7.0 + hours as f64 / HOURS_PER_WEEK,
    })
}
