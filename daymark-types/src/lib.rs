//! Core type definitions for Daymark.
//!
//! This crate defines the fundamental, presentation-agnostic types used
//! throughout the calendar core:
//! - [`CalendarDay`], a single-integer day number (Julian Day Number)
//! - [`GregorianDay`], the structured form used in resource files
//! - [`Weekday`] and [`DayType`]
//!
//! Every other component keys off the day number, never off a
//! (year, month, day) tuple, so month and year boundaries cannot introduce
//! ambiguity.

mod calendar_day;
mod day_type;
mod ids;
mod weekday;

pub use calendar_day::{CalendarDay, GregorianDay};
pub use day_type::DayType;
pub use ids::PlanId;
pub use weekday::Weekday;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type conversions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid day type value: {0}")]
    InvalidDayType(u8),

    #[error("invalid weekday index: {0}")]
    InvalidWeekday(u8),

    #[error("invalid gregorian date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },
}
