//! Bundled lunisolar year tables.
//!
//! A table is a JSON resource holding one record per lunisolar year:
//! the Gregorian start day, which month (if any) is doubled, a bit per
//! month for its length (1 = 30 days, 0 = 29), the sexagenary cycle index
//! and the number of the first month in the record. Decoding validates
//! the records and checks that consecutive years tile the day line with
//! no gaps; a malformed resource makes the whole variant unavailable.

use daymark_types::{CalendarDay, GregorianDay};
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::warn;

const CHINESE_RESOURCE: &str = include_str!("../resources/chinese.json");
const KOREAN_RESOURCE: &str = include_str!("../resources/korean.json");

/// Which bundled lunisolar table to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Civil Chinese calendar, month boundaries at UTC+8.
    Chinese,
    /// Korean dangi calendar, month boundaries at UTC+9.
    Korean,
}

impl Variant {
    /// The decoded table for this variant, loaded once per process.
    ///
    /// Fails closed: a malformed resource yields `None` (logged), and the
    /// variant simply has no data.
    #[must_use]
    pub fn table(&self) -> Option<&'static LunarTable> {
        static CHINESE: OnceLock<Option<LunarTable>> = OnceLock::new();
        static KOREAN: OnceLock<Option<LunarTable>> = OnceLock::new();
        let (cell, resource, label) = match self {
            Variant::Chinese => (&CHINESE, CHINESE_RESOURCE, "chinese"),
            Variant::Korean => (&KOREAN, KOREAN_RESOURCE, "korean"),
        };
        cell.get_or_init(|| match LunarTable::from_json(resource) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!(variant = label, error = %e, "lunisolar table unavailable");
                None
            }
        })
        .as_ref()
    }
}

/// Whether a lunisolar year is plain or carries an intercalary month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearKind {
    /// Twelve ordinary months.
    Common,
    /// Thirteen months; the carried number is the month that is doubled.
    Leap(u8),
}

/// One lunisolar year record.
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// The Gregorian year of the record's start day, used as the
    /// lunisolar year number.
    pub year: i32,
    /// First day of the year (month `start_month`, day 1).
    pub start: CalendarDay,
    /// Plain year or which month is doubled.
    pub kind: YearKind,
    /// Sexagenary cycle index in `0..60` (0 = jiazi).
    pub sexagenary: u8,
    /// Number of the first month in the record.
    pub start_month: u8,
    /// True if the record begins on the intercalary occurrence of
    /// `start_month`.
    pub starts_on_leap: bool,
    /// Bit per month slot, 1 = 30 days.
    sizes: u16,
    /// Number of month slots (12, or 13 in a leap year).
    months: u8,
    /// Sum of the month lengths.
    day_count: u16,
}

impl LunarYear {
    /// Number of month slots in the year.
    #[must_use]
    pub fn month_count(&self) -> u8 {
        self.months
    }

    /// Length in days of the month at `slot`, 29 or 30.
    #[must_use]
    pub fn month_len(&self, slot: u8) -> u8 {
        if self.sizes & (1 << slot) != 0 { 30 } else { 29 }
    }

    /// Total number of days in the year.
    #[must_use]
    pub fn day_count(&self) -> u16 {
        self.day_count
    }

    /// Last day of the year (inclusive).
    #[must_use]
    pub fn end(&self) -> CalendarDay {
        self.start + (i64::from(self.day_count) - 1)
    }

    /// Slot index holding the intercalary month, if any.
    #[must_use]
    pub fn leap_slot(&self) -> Option<u8> {
        if self.starts_on_leap {
            return Some(0);
        }
        match self.kind {
            YearKind::Common => None,
            YearKind::Leap(month) => Some(month - self.start_month + 1),
        }
    }
}

/// A decoded lunisolar table.
#[derive(Debug, Clone)]
pub struct LunarTable {
    pub name: String,
    pub reference: String,
    /// First covered day.
    pub start: CalendarDay,
    /// Last covered day (inclusive).
    pub end: CalendarDay,
    years: Vec<LunarYear>,
}

impl LunarTable {
    /// Decodes and validates a table resource.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let file: TableFile = serde_json::from_str(json)?;
        let start = file.start.to_calendar_day()?;
        let end = file.end.to_calendar_day()?;

        let mut years = Vec::with_capacity(file.years.len());
        for record in file.years {
            years.push(decode_year(record)?);
        }
        // Years must tile the table range without gaps or overlaps.
        for pair in years.windows(2) {
            if pair[0].start + i64::from(pair[0].day_count) != pair[1].start {
                return Err(TableError::Discontiguous { year: pair[1].year });
            }
        }
        match (years.first(), years.last()) {
            (Some(first), Some(last)) if first.start == start && last.end() == end => {}
            _ => return Err(TableError::RangeMismatch),
        }

        Ok(Self {
            name: file.name,
            reference: file.reference,
            start,
            end,
            years,
        })
    }

    /// The years of the table, in order.
    #[must_use]
    pub fn years(&self) -> &[LunarYear] {
        &self.years
    }

    /// Finds the year record whose day span contains `day`.
    #[must_use]
    pub fn year_containing(&self, day: CalendarDay) -> Option<&LunarYear> {
        if day < self.start || day > self.end {
            return None;
        }
        let index = self
            .years
            .partition_point(|year| year.start <= day)
            .checked_sub(1)?;
        Some(&self.years[index])
    }
}

/// Errors from table decoding. Not public API: loading fails closed, the
/// error only feeds the log line.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad date: {0}")]
    BadDate(#[from] daymark_types::Error),

    #[error("year {year}: {problem}")]
    BadYear { year: i32, problem: String },

    #[error("year {year} does not start where the previous one ends")]
    Discontiguous { year: i32 },

    #[error("year records do not cover the declared start..end range")]
    RangeMismatch,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    name: String,
    reference: String,
    start: GregorianDay,
    end: GregorianDay,
    years: Vec<YearRecord>,
}

#[derive(Debug, Deserialize)]
struct YearRecord {
    start: GregorianDay,
    #[serde(rename = "leapMonth")]
    leap_month: i8,
    #[serde(rename = "sizeInfo")]
    size_info: String,
    #[serde(rename = "sexagenaryCycleInfo")]
    sexagenary: u8,
    #[serde(rename = "startMonth")]
    start_month: i8,
}

fn decode_year(record: YearRecord) -> Result<LunarYear, TableError> {
    let start = record.start.to_calendar_day()?;
    let year = record.start.year;
    let bad = |problem: String| TableError::BadYear { year, problem };

    let kind = match record.leap_month {
        -1 => YearKind::Common,
        m @ 0..=12 => YearKind::Leap(m as u8),
        other => return Err(bad(format!("leap month {other} out of range"))),
    };
    if record.sexagenary >= 60 {
        return Err(bad(format!("sexagenary index {} out of range", record.sexagenary)));
    }
    let starts_on_leap = record.start_month < 0;
    let start_month = record.start_month.unsigned_abs();
    if !(1..=12).contains(&start_month) {
        return Err(bad(format!("start month {} out of range", record.start_month)));
    }
    if let YearKind::Leap(m) = kind {
        // The doubled month must fall at or after the first month, or the
        // slot arithmetic has no valid position for it.
        if !starts_on_leap && m < start_month {
            return Err(bad(format!("leap month {m} before start month {start_month}")));
        }
    }

    let months = record.size_info.len();
    let expected = if matches!(kind, YearKind::Leap(_)) { 13 } else { 12 };
    if months != expected {
        return Err(bad(format!("{months} month sizes, expected {expected}")));
    }
    let mut sizes: u16 = 0;
    let mut day_count: u16 = 0;
    for (slot, c) in record.size_info.chars().enumerate() {
        match c {
            '1' => {
                sizes |= 1 << slot;
                day_count += 30;
            }
            '0' => day_count += 29,
            other => return Err(bad(format!("bad size char {other:?}"))),
        }
    }

    Ok(LunarYear {
        year,
        start,
        kind,
        sexagenary: record.sexagenary,
        start_month,
        starts_on_leap,
        sizes,
        months: months as u8,
        day_count,
    })
}
