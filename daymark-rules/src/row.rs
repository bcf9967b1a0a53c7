//! Wire format of the persisted base-rule configuration row.
//!
//! The row is a single flat record; which fields are meaningful depends on
//! the `type` tag. Index sets are stored as `/`-separated integer strings
//! (`"6/7"`, `"0/1/13"`), day anchors as raw day numbers.

use crate::{RecurringRule, Result, RuleError};
use daymark_types::{CalendarDay, Weekday};
use serde::{Deserialize, Serialize};

/// The persisted form of a [`RecurringRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRuleRow {
    /// 0 = standard, 1 = weeks cycle, 2 = days cycle.
    #[serde(rename = "type")]
    pub rule_type: u8,

    /// Off weekday indices for type 0, e.g. `"6/7"`.
    #[serde(rename = "standardOffday", default)]
    pub standard_offday: String,

    /// Display offset for type 1.
    #[serde(rename = "weekOffset", default)]
    pub week_offset: i32,

    /// Cycle length in weeks for type 1 (2, 3 or 4).
    #[serde(rename = "weekCount", default)]
    pub week_count: u32,

    /// Off slot indices for type 1, e.g. `"5/6/12"`.
    #[serde(rename = "weekIndexs", default)]
    pub week_indexs: String,

    /// Anchor day number for type 2.
    #[serde(rename = "dayStart", default)]
    pub day_start: i64,

    /// Work run length for type 2.
    #[serde(rename = "dayWorkCount", default)]
    pub day_work_count: u32,

    /// Off run length for type 2.
    #[serde(rename = "dayOffCount", default)]
    pub day_off_count: u32,
}

impl BaseRuleRow {
    /// Encodes a rule into its row form. Fields not used by the rule's
    /// variant keep their default values.
    #[must_use]
    pub fn encode(rule: &RecurringRule) -> Self {
        let mut row = BaseRuleRow::default();
        match rule {
            RecurringRule::Standard { off_weekdays } => {
                row.rule_type = 0;
                row.standard_offday = join_indices(off_weekdays.iter().map(|w| u32::from(w.index())));
            }
            RecurringRule::WeeksCycle {
                offset_weeks,
                cycle_weeks,
                off_indices,
            } => {
                row.rule_type = 1;
                row.week_offset = *offset_weeks;
                row.week_count = *cycle_weeks;
                row.week_indexs = join_indices(off_indices.iter().copied());
            }
            RecurringRule::DaysCycle {
                start,
                work_len,
                off_len,
            } => {
                row.rule_type = 2;
                row.day_start = start.day_number();
                row.day_work_count = *work_len;
                row.day_off_count = *off_len;
            }
        }
        row
    }

    /// Decodes the row back into a validated rule.
    pub fn decode(&self) -> Result<RecurringRule> {
        match self.rule_type {
            0 => {
                let mut off_weekdays = std::collections::BTreeSet::new();
                for i in split_indices("standardOffday", &self.standard_offday)? {
                    let index = u8::try_from(i).unwrap_or(u8::MAX);
                    off_weekdays.insert(Weekday::from_index(index)?);
                }
                Ok(RecurringRule::Standard { off_weekdays })
            }
            1 => RecurringRule::weeks_cycle(
                self.week_offset,
                self.week_count,
                split_indices("weekIndexs", &self.week_indexs)?,
            ),
            2 => RecurringRule::days_cycle(
                CalendarDay::from_day_number(self.day_start),
                self.day_work_count,
                self.day_off_count,
            ),
            other => Err(RuleError::UnknownRuleType(other)),
        }
    }
}

fn join_indices(indices: impl Iterator<Item = u32>) -> String {
    indices
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn split_indices(field: &'static str, value: &str) -> Result<Vec<u32>> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split('/')
        .map(|part| {
            part.parse().map_err(|_| RuleError::MalformedIndexList {
                field,
                value: value.to_string(),
            })
        })
        .collect()
}
