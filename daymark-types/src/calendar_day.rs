//! The day-number primitive.
//!
//! A calendar day is identified by its Julian Day Number: a single integer
//! that increases by one per day and is independent of month and year
//! boundaries. All rule evaluation, plan lookup, and override storage key
//! off this integer.

use crate::{Error, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A single calendar day, stored as a Julian Day Number.
///
/// The JDN is the count of days since the beginning of the Julian period;
/// 1970-01-01 is day 2_440_588. Ordering and day arithmetic are plain
/// integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(i64);

impl CalendarDay {
    /// Creates a day from a raw day number.
    #[must_use]
    pub const fn from_day_number(n: i64) -> Self {
        Self(n)
    }

    /// Creates a day from a Gregorian calendar date.
    ///
    /// Returns an error if the field values do not name a real date
    /// (month out of 1..=12, day past the end of the month).
    pub fn from_ymd(year: i32, month: u8, day: u8) -> crate::Result<Self> {
        if !(1..=12).contains(&month) || day == 0 {
            return Err(Error::InvalidDate { year, month, day });
        }
        let candidate = Self(jdn_from_gregorian(year, i64::from(month), i64::from(day)));
        // Round-tripping rejects overflowed days such as February 30.
        if candidate.to_gregorian() != (year, month, day) {
            return Err(Error::InvalidDate { year, month, day });
        }
        Ok(candidate)
    }

    /// Returns the raw day number.
    #[must_use]
    pub const fn day_number(&self) -> i64 {
        self.0
    }

    /// Represents the day as a Gregorian `(year, month, day)` triple.
    #[must_use]
    pub fn to_gregorian(&self) -> (i32, u8, u8) {
        let jdn = self.0;
        let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as u8, day as u8)
    }

    /// Returns the Gregorian year the day falls in.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.to_gregorian().0
    }

    /// Returns the day of week, derived from the day number alone.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        // JDN 0 is a Monday, so the ISO order index is jdn mod 7 + 1.
        Weekday::from_index((self.0.rem_euclid(7) + 1) as u8)
            .expect("weekday index is always in 1..=7")
    }

    /// Returns the day that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.to_gregorian();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl Add<i64> for CalendarDay {
    type Output = CalendarDay;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<CalendarDay> for CalendarDay {
    type Output = i64;

    fn sub(self, rhs: CalendarDay) -> Self::Output {
        self.0 - rhs.0
    }
}

const fn jdn_from_gregorian(year: i32, month: i64, day: i64) -> i64 {
    let y = year as i64;
    let m = month;
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + day
        - 32075
}

/// A structured Gregorian date, the form day values take in resource and
/// exchange files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GregorianDay {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl GregorianDay {
    /// Converts to the canonical day number, validating the fields.
    pub fn to_calendar_day(self) -> crate::Result<CalendarDay> {
        CalendarDay::from_ymd(self.year, self.month, self.day)
    }
}

impl From<CalendarDay> for GregorianDay {
    fn from(day: CalendarDay) -> Self {
        let (year, month, day) = day.to_gregorian();
        Self { year, month, day }
    }
}
