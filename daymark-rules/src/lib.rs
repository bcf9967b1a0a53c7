//! Recurring base-calendar rules.
//!
//! The base rule is the always-present bottom layer of day classification:
//! a repeating pattern that assigns every day a default off/work status
//! without any data dependency. Three pattern shapes exist:
//!
//! - [`RecurringRule::Standard`] — fixed off weekdays (the ordinary weekend)
//! - [`RecurringRule::WeeksCycle`] — an N-week repeating grid (N in 2..=4)
//! - [`RecurringRule::DaysCycle`] — alternating runs of work and off days
//!
//! Evaluation is pure and O(1) for every shape. Exactly one rule is active
//! at a time; it is persisted as a single configuration row whose wire
//! format lives in [`row`].

mod row;

pub use row::BaseRuleRow;

use daymark_types::{CalendarDay, Weekday};
use std::collections::BTreeSet;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Errors from rule construction or row decoding.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("week cycle length must be 2, 3 or 4, got {0}")]
    BadCycleLength(u32),

    #[error("off-day index {index} outside cycle of {cycle_days} days")]
    IndexOutOfRange { index: u32, cycle_days: u32 },

    #[error("work and off run lengths must both be at least 1")]
    EmptyRun,

    #[error("unknown rule type tag: {0}")]
    UnknownRuleType(u8),

    #[error("malformed index list {field:?}: {value:?}")]
    MalformedIndexList { field: &'static str, value: String },

    #[error(transparent)]
    Types(#[from] daymark_types::Error),
}

/// The repeating pattern that defines a default off/work status for
/// every calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringRule {
    /// Off on a fixed set of weekdays.
    Standard { off_weekdays: BTreeSet<Weekday> },

    /// Off on a fixed set of day slots within an `N`-week grid.
    ///
    /// `off_indices` are absolute positions modulo `7 * cycle_weeks` of the
    /// day number itself. `offset_weeks` shifts only how the grid is
    /// presented for editing (so "this week" lands on a stable row); it is
    /// never applied during evaluation.
    WeeksCycle {
        offset_weeks: i32,
        cycle_weeks: u32,
        off_indices: BTreeSet<u32>,
    },

    /// Alternating runs: `work_len` work days then `off_len` off days,
    /// anchored at `start`.
    DaysCycle {
        start: CalendarDay,
        work_len: u32,
        off_len: u32,
    },
}

impl RecurringRule {
    /// The rule every fresh install starts with: Saturday and Sunday off.
    #[must_use]
    pub fn default_weekend() -> Self {
        RecurringRule::Standard {
            off_weekdays: BTreeSet::from([Weekday::Saturday, Weekday::Sunday]),
        }
    }

    /// Builds a week-cycle rule, validating the cycle length and indices.
    pub fn weeks_cycle(
        offset_weeks: i32,
        cycle_weeks: u32,
        off_indices: impl IntoIterator<Item = u32>,
    ) -> Result<Self> {
        if !(2..=4).contains(&cycle_weeks) {
            return Err(RuleError::BadCycleLength(cycle_weeks));
        }
        let cycle_days = 7 * cycle_weeks;
        let off_indices: BTreeSet<u32> = off_indices.into_iter().collect();
        if let Some(&index) = off_indices.iter().find(|&&i| i >= cycle_days) {
            return Err(RuleError::IndexOutOfRange { index, cycle_days });
        }
        Ok(RecurringRule::WeeksCycle {
            offset_weeks,
            cycle_weeks,
            off_indices,
        })
    }

    /// Builds a days-cycle rule, validating the run lengths.
    pub fn days_cycle(start: CalendarDay, work_len: u32, off_len: u32) -> Result<Self> {
        if work_len == 0 || off_len == 0 {
            return Err(RuleError::EmptyRun);
        }
        Ok(RecurringRule::DaysCycle {
            start,
            work_len,
            off_len,
        })
    }

    /// Evaluates the rule for one day. Pure, total, O(1).
    #[must_use]
    pub fn is_off(&self, day: CalendarDay) -> bool {
        match self {
            RecurringRule::Standard { off_weekdays } => off_weekdays.contains(&day.weekday()),
            RecurringRule::WeeksCycle {
                cycle_weeks,
                off_indices,
                ..
            } => {
                let cycle_days = i64::from(7 * cycle_weeks);
                let slot = day.day_number().rem_euclid(cycle_days) as u32;
                off_indices.contains(&slot)
            }
            RecurringRule::DaysCycle {
                start,
                work_len,
                off_len,
            } => {
                let cycle = i64::from(work_len + off_len);
                let offset = (day - *start).rem_euclid(cycle);
                offset >= i64::from(*work_len)
            }
        }
    }

    /// Position of `day` within the rule's repeating cycle, if the rule
    /// has one. Used by grid editors; `Standard` has no cycle position.
    #[must_use]
    pub fn cycle_index_of(&self, day: CalendarDay) -> Option<u32> {
        match self {
            RecurringRule::Standard { .. } => None,
            RecurringRule::WeeksCycle { cycle_weeks, .. } => {
                Some(day.day_number().rem_euclid(i64::from(7 * cycle_weeks)) as u32)
            }
            RecurringRule::DaysCycle {
                start,
                work_len,
                off_len,
            } => Some((day - *start).rem_euclid(i64::from(work_len + off_len)) as u32),
        }
    }
}

impl Default for RecurringRule {
    fn default() -> Self {
        Self::default_weekend()
    }
}
