//! Public holiday plans for Daymark.
//!
//! A plan is the middle layer of day classification: a dated list of named
//! off/work overrides with a validity window. Plans come from two places —
//! immutable bundled region resources, and user-authored records kept in
//! the store — and at most one plan is selected at a time.
//!
//! Loading is always a full reload; switching plans never patches the
//! previous one incrementally.

mod error;
mod exchange;
mod plan;
mod region;

pub use error::{HolidayError, HolidayResult};
pub use exchange::{PlanFile, PlanFileDay};
pub use plan::{HolidayEntry, PublicHolidayPlan};
pub use region::Region;

use daymark_store::{DayStore, PlanDayRow, PlanRecord};
use daymark_types::{CalendarDay, PlanId};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Identifies a plan: a bundled region or a user-authored record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKey {
    Builtin(Region),
    Custom(PlanId),
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKey::Builtin(region) => write!(f, "builtin:{region}"),
            PlanKey::Custom(id) => write!(f, "custom:{id}"),
        }
    }
}

impl FromStr for PlanKey {
    type Err = HolidayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(key) = s.strip_prefix("builtin:") {
            return Ok(PlanKey::Builtin(key.parse()?));
        }
        if let Some(id) = s.strip_prefix("custom:") {
            let id = PlanId::parse(id)
                .map_err(|_| HolidayError::UnknownPlanKey(s.to_string()))?;
            return Ok(PlanKey::Custom(id));
        }
        Err(HolidayError::UnknownPlanKey(s.to_string()))
    }
}

/// Loads, selects and edits holiday plans.
#[derive(Clone)]
pub struct PlanManager {
    store: DayStore,
}

impl PlanManager {
    /// Creates a manager over the given store.
    #[must_use]
    pub fn new(store: DayStore) -> Self {
        Self { store }
    }

    // ── selection ────────────────────────────────────────────────

    /// The globally selected plan key, if any.
    pub fn selected_key(&self) -> HolidayResult<Option<PlanKey>> {
        let Some(value) = self.store.config_value(daymark_store::SELECTED_PLAN_KEY)? else {
            return Ok(None);
        };
        match value.parse() {
            Ok(key) => Ok(Some(key)),
            Err(_) => {
                // A stale key (e.g. a deleted custom plan id from an old
                // install) behaves like no selection.
                warn!(value, "ignoring unparseable selected plan key");
                Ok(None)
            }
        }
    }

    /// Selects a plan (or clears the selection with `None`).
    pub fn select(&self, key: Option<PlanKey>) -> HolidayResult<()> {
        let value = key.map(|k| k.to_string());
        self.store
            .set_config_value(daymark_store::SELECTED_PLAN_KEY, value.as_deref())?;
        Ok(())
    }

    // ── loading ──────────────────────────────────────────────────

    /// Loads the currently selected plan, if a selection exists and the
    /// plan is available.
    pub fn load_selected(&self) -> HolidayResult<Option<PublicHolidayPlan>> {
        match self.selected_key()? {
            Some(key) => self.load(key),
            None => Ok(None),
        }
    }

    /// Loads a plan by key. A missing or malformed builtin resource and a
    /// deleted custom plan both yield `Ok(None)` — the plan is simply
    /// unavailable. Store failures are real errors.
    pub fn load(&self, key: PlanKey) -> HolidayResult<Option<PublicHolidayPlan>> {
        match key {
            PlanKey::Builtin(region) => Ok(region.load()),
            PlanKey::Custom(id) => self.load_custom(id),
        }
    }

    fn load_custom(&self, id: PlanId) -> HolidayResult<Option<PublicHolidayPlan>> {
        let Some(record) = self.store.plan_record(id)? else {
            return Ok(None);
        };
        let mut days = BTreeMap::new();
        for row in self.store.plan_days(id)? {
            days.insert(
                row.day,
                HolidayEntry {
                    name: row.name,
                    day_type: row.day_type,
                },
            );
        }
        Ok(Some(PublicHolidayPlan::new(
            record.name,
            record.start,
            record.end,
            days,
        )))
    }

    // ── user-authored plans ──────────────────────────────────────

    /// Creates or replaces a user plan from an exchange-shaped file,
    /// replacing its entire day-set transactionally.
    pub fn save_user_plan(&self, id: PlanId, file: &PlanFile) -> HolidayResult<()> {
        let record = PlanRecord {
            id,
            name: file.name.clone(),
            start: file.start.to_calendar_day()?,
            end: file.end.to_calendar_day()?,
        };
        let mut rows = Vec::with_capacity(file.days.len());
        for day in &file.days {
            rows.push(PlanDayRow {
                day: day.date.to_calendar_day()?,
                name: day.name.clone(),
                day_type: day.day_type,
            });
        }
        self.store.save_plan(&record, &rows)?;
        Ok(())
    }

    /// Deletes a user plan, clearing the selection if it pointed at it.
    pub fn delete_user_plan(&self, id: PlanId) -> HolidayResult<()> {
        if self.selected_key()? == Some(PlanKey::Custom(id)) {
            self.select(None)?;
        }
        self.store.delete_plan(id)?;
        Ok(())
    }

    /// Lists stored user plans.
    pub fn user_plans(&self) -> HolidayResult<Vec<PlanRecord>> {
        Ok(self.store.plan_records()?)
    }

    // ── import / export ──────────────────────────────────────────

    /// Exports a user plan as exchange-file JSON.
    pub fn export_user_plan(&self, id: PlanId) -> HolidayResult<Option<String>> {
        let Some(plan) = self.load_custom(id)? else {
            return Ok(None);
        };
        Ok(Some(PlanFile::from(&plan).to_json()?))
    }

    /// Imports an exchange file as a new user plan, returning its id.
    pub fn import_user_plan(&self, json: &str) -> HolidayResult<PlanId> {
        let file = PlanFile::from_json(json)?;
        let id = PlanId::new();
        self.save_user_plan(id, &file)?;
        Ok(id)
    }
}

/// Plan-backed classification helper used by automation callers: resolves
/// a day against a plan, distinguishing "out of range" from "no entry".
pub fn lookup_checked(
    plan: &PublicHolidayPlan,
    day: CalendarDay,
) -> HolidayResult<Option<&HolidayEntry>> {
    if plan.is_over_reach(day) {
        return Err(HolidayError::OutOfPlanRange);
    }
    Ok(plan.lookup(day))
}
