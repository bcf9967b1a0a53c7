//! The in-memory holiday plan.
//!
//! A plan is a dated list of named overrides with an inclusive validity
//! window. Whether it came from a bundled resource or from user-authored
//! rows, the loaded form is the same.

use daymark_types::{CalendarDay, DayType};
use std::collections::BTreeMap;

/// One named override inside a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEntry {
    pub name: String,
    pub day_type: DayType,
}

/// A loaded holiday plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicHolidayPlan {
    name: String,
    start: CalendarDay,
    end: CalendarDay,
    days: BTreeMap<CalendarDay, HolidayEntry>,
}

impl PublicHolidayPlan {
    /// Assembles a plan from its parts.
    #[must_use]
    pub fn new(
        name: String,
        start: CalendarDay,
        end: CalendarDay,
        days: BTreeMap<CalendarDay, HolidayEntry>,
    ) -> Self {
        Self {
            name,
            start,
            end,
            days,
        }
    }

    /// The plan's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First day of the validity window (inclusive).
    #[must_use]
    pub fn start(&self) -> CalendarDay {
        self.start
    }

    /// Last day of the validity window (inclusive).
    #[must_use]
    pub fn end(&self) -> CalendarDay {
        self.end
    }

    /// All entries, ordered by day.
    #[must_use]
    pub fn days(&self) -> &BTreeMap<CalendarDay, HolidayEntry> {
        &self.days
    }

    /// Looks up the entry for one day, if any.
    #[must_use]
    pub fn lookup(&self, day: CalendarDay) -> Option<&HolidayEntry> {
        self.days.get(&day)
    }

    /// True iff `day` lies outside the validity window.
    ///
    /// Callers must treat this as a distinct condition, not as "no
    /// holiday": a plan can only answer for days it covers.
    #[must_use]
    pub fn is_over_reach(&self, day: CalendarDay) -> bool {
        day < self.start || day > self.end
    }

    /// True iff the plan contains at least one compensatory workday.
    /// Decides whether the extra "shifted workday" legend is shown.
    #[must_use]
    pub fn has_holiday_shift(&self) -> bool {
        self.days.values().any(|e| e.day_type == DayType::Work)
    }
}
