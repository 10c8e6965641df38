//! Goal progress calculator
//!
//! Projects how far along a savings goal should be under linear pacing from
//! its creation date to its target date, and compares that with what has
//! actually been saved.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::Goal;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Derived progress of one goal at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Percent saved, clamped to [0, 100] for progress bars
    pub percent_complete: f64,
    /// Percent saved, unclamped (over 100 when the goal was exceeded)
    pub raw_percent_complete: f64,
    /// What linear pacing says should be saved by now
    pub expected_amount: f64,
    pub is_on_pace: bool,
    /// `expected_amount - current`; negative when ahead of pace
    pub deficit: f64,
}

impl GoalProgress {
    /// How far behind pace, or `None` when on pace
    pub fn shortfall(&self) -> Option<f64> {
        (!self.is_on_pace && self.deficit > 0.0).then_some(self.deficit)
    }

    /// The goal's saved amount reached or passed its target
    pub fn is_exceeded(&self) -> bool {
        self.raw_percent_complete >= 100.0
    }
}

/// Percent saved, unclamped; zero when the target is zero or unusable
pub fn raw_percent(goal: &Goal) -> f64 {
    match goal.target() {
        Some(target) if target != 0.0 => goal.current() / target * 100.0,
        _ => 0.0,
    }
}

/// Compute a goal's progress as of `as_of`
///
/// Dates are taken at midnight; elapsed and total durations are fractional
/// days. When the pacing window is empty or inverted (target date on or
/// before the creation date), or the creation date is unknown, the whole
/// target is expected already.
pub fn compute_progress(goal: &Goal, as_of: NaiveDateTime) -> GoalProgress {
    let target = goal.target().unwrap_or(0.0);
    let current = goal.current();

    let raw_percent_complete = raw_percent(goal);
    let percent_complete = raw_percent_complete.clamp(0.0, 100.0);

    let expected_amount = match (goal.created_at, goal.target_date) {
        (Some(created), Some(due)) => {
            let total_days = days_between(midnight(created), midnight(due));
            if total_days <= 0.0 {
                target
            } else {
                let elapsed_days = days_between(midnight(created), as_of);
                elapsed_days / total_days * target
            }
        }
        _ => target,
    };

    GoalProgress {
        percent_complete,
        raw_percent_complete,
        expected_amount,
        is_on_pace: current >= expected_amount,
        deficit: expected_amount - current,
    }
}

/// Compute a goal's progress as of the start of `day`
pub fn compute_progress_on(goal: &Goal, day: NaiveDate) -> GoalProgress {
    compute_progress(goal, midnight(day))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}
