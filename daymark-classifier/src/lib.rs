//! Layered day classification.
//!
//! Whether a day is off combines three signals, strongest first:
//!
//! 1. the user's custom per-day override, if one exists
//! 2. the selected public-holiday plan's entry, if one exists
//! 3. the always-present recurring base rule
//!
//! [`DayClassifier`] evaluates the layers for single days, detects
//! disagreement between them ([`DayClassifier::check_clash_day`]) and
//! searches forward for the next day of a wanted type. [`CalendarContext`]
//! wires the classifier from the store and the selected plan — services
//! are constructed explicitly and threaded through, never global.

mod context;

pub use context::CalendarContext;

use daymark_holiday::PublicHolidayPlan;
use daymark_rules::RecurringRule;
use daymark_store::DayStore;
use daymark_types::{CalendarDay, DayType};

/// Result type alias using the crate's error type.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Errors surfaced while classifying.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("store error: {0}")]
    Store(#[from] daymark_store::StoreError),

    #[error("holiday plan error: {0}")]
    Holiday(#[from] daymark_holiday::HolidayError),
}

/// Which layer decided a day's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    CustomOverride,
    HolidayPlan,
    BaseRule,
}

/// A day's resolved classification, with the deciding layer and, when the
/// plan decided, the entry's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub day_type: DayType,
    pub source: Source,
    pub holiday_name: Option<String>,
}

/// Classifies days by composing the three signal layers.
pub struct DayClassifier {
    base_rule: RecurringRule,
    plan: Option<PublicHolidayPlan>,
    overrides: Option<DayStore>,
}

impl DayClassifier {
    /// Builds a classifier from explicit parts. `plan` and `overrides`
    /// are optional layers; the base rule always answers.
    #[must_use]
    pub fn new(
        base_rule: RecurringRule,
        plan: Option<PublicHolidayPlan>,
        overrides: Option<DayStore>,
    ) -> Self {
        Self {
            base_rule,
            plan,
            overrides,
        }
    }

    /// The active base rule.
    #[must_use]
    pub fn base_rule(&self) -> &RecurringRule {
        &self.base_rule
    }

    /// The loaded plan layer, if any. Callers needing range-checked plan
    /// lookups (automation) go through [`daymark_holiday::lookup_checked`].
    #[must_use]
    pub fn plan(&self) -> Option<&PublicHolidayPlan> {
        self.plan.as_ref()
    }

    /// Whether `day` is off, by precedence: custom override, then plan
    /// entry, then base rule.
    pub fn is_off(&self, day: CalendarDay) -> ClassifierResult<bool> {
        Ok(self.classify(day)?.day_type.is_off())
    }

    /// Full classification: the winning day type, the layer that decided,
    /// and the holiday name when the plan decided.
    pub fn classify(&self, day: CalendarDay) -> ClassifierResult<Classification> {
        if let Some(custom) = self.custom_signal(day)? {
            return Ok(Classification {
                day_type: custom,
                source: Source::CustomOverride,
                holiday_name: None,
            });
        }
        if let Some(entry) = self.plan.as_ref().and_then(|p| p.lookup(day)) {
            return Ok(Classification {
                day_type: entry.day_type,
                source: Source::HolidayPlan,
                holiday_name: Some(entry.name.clone()),
            });
        }
        Ok(Classification {
            day_type: DayType::from_is_off(self.base_rule.is_off(day)),
            source: Source::BaseRule,
            holiday_name: None,
        })
    }

    /// Infallible variant of [`DayClassifier::is_off`] over a prefetched
    /// custom signal; never touches the store. Month grids fetch their
    /// override rows in one range query and classify each cell with this.
    #[must_use]
    pub fn is_off_with(&self, day: CalendarDay, custom: Option<DayType>) -> bool {
        if let Some(day_type) = custom {
            return day_type.is_off();
        }
        if let Some(entry) = self.plan.as_ref().and_then(|p| p.lookup(day)) {
            return entry.day_type.is_off();
        }
        self.base_rule.is_off(day)
    }

    /// Detects disagreement among the active signals for `day`.
    ///
    /// With both optional signals defined, the day is calm only when all
    /// three agree; with one defined, when it agrees with the base rule.
    /// The custom signal is consulted only when `include_custom` is set.
    pub fn check_clash_day(&self, day: CalendarDay, include_custom: bool) -> ClassifierResult<bool> {
        let base = self.base_rule.is_off(day);
        let plan = self
            .plan
            .as_ref()
            .and_then(|p| p.lookup(day))
            .map(|entry| entry.day_type.is_off());
        let custom = if include_custom {
            self.custom_signal(day)?.map(|t| t.is_off())
        } else {
            None
        };

        Ok(match (plan, custom) {
            (Some(p), Some(c)) => !(base == p && c == base),
            (Some(p), None) => p != base,
            (None, Some(c)) => c != base,
            (None, None) => false,
        })
    }

    /// Finds the first day after `after` classified as `day_type`.
    ///
    /// Scans forward one day at a time and gives up after 365 candidates —
    /// a documented limitation of the search, kept as-is: a rule with a
    /// longer dry spell reports "not found" rather than scanning further.
    pub fn fetch_next_day(
        &self,
        day_type: DayType,
        after: CalendarDay,
    ) -> ClassifierResult<Option<CalendarDay>> {
        let mut candidate = after.next();
        for _ in 0..365 {
            if self.is_off(candidate)? == day_type.is_off() {
                return Ok(Some(candidate));
            }
            candidate = candidate.next();
        }
        Ok(None)
    }

    fn custom_signal(&self, day: CalendarDay) -> ClassifierResult<Option<DayType>> {
        let Some(store) = &self.overrides else {
            return Ok(None);
        };
        Ok(store.custom_day(day)?.map(|row| row.day_type))
    }
}
