//! The plan exchange file format.
//!
//! Bundled region resources and exported user plans share one JSON shape:
//!
//! ```json
//! { "name": "...",
//!   "days": [{ "name": "...", "date": {"year":2026,"month":1,"day":1}, "type": 0 }],
//!   "start": {"year":2025,"month":1,"day":1},
//!   "end":   {"year":2026,"month":12,"day":31} }
//! ```
//!
//! `type` is 0 for an off day, 1 for a compensatory workday. Encoding a
//! loaded plan and decoding it back yields an identical file.

use crate::{HolidayEntry, HolidayResult, PublicHolidayPlan};
use daymark_types::{DayType, GregorianDay};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A plan as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFile {
    pub name: String,
    pub days: Vec<PlanFileDay>,
    pub start: GregorianDay,
    pub end: GregorianDay,
}

/// One dated entry of a plan file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFileDay {
    pub name: String,
    pub date: GregorianDay,
    #[serde(rename = "type")]
    pub day_type: DayType,
}

impl PlanFile {
    /// Decodes a plan file from JSON text.
    pub fn from_json(json: &str) -> HolidayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the file as JSON text.
    pub fn to_json(&self) -> HolidayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the dates and builds the in-memory plan.
    pub fn into_plan(self) -> HolidayResult<PublicHolidayPlan> {
        let start = self.start.to_calendar_day()?;
        let end = self.end.to_calendar_day()?;
        let mut days = BTreeMap::new();
        for day in self.days {
            days.insert(
                day.date.to_calendar_day()?,
                HolidayEntry {
                    name: day.name,
                    day_type: day.day_type,
                },
            );
        }
        Ok(PublicHolidayPlan::new(self.name, start, end, days))
    }
}

impl From<&PublicHolidayPlan> for PlanFile {
    fn from(plan: &PublicHolidayPlan) -> Self {
        PlanFile {
            name: plan.name().to_string(),
            days: plan
                .days()
                .iter()
                .map(|(day, entry)| PlanFileDay {
                    name: entry.name.clone(),
                    date: GregorianDay::from(*day),
                    day_type: entry.day_type,
                })
                .collect(),
            start: GregorianDay::from(plan.start()),
            end: GregorianDay::from(plan.end()),
        }
    }
}
