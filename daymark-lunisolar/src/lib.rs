//! Lunisolar calendar support for Daymark.
//!
//! Two independent, read-only subsystems queried for calendar labels:
//!
//! - [`find_day_info`] converts a Gregorian day into a traditional
//!   lunisolar date using bundled per-year tables. Two table variants are
//!   shipped: the civil Chinese calendar (UTC+8) and the Korean dangi
//!   variant (UTC+9) — the two can disagree on leap months.
//! - [`SolarTermCalculator`] derives the 24 solar-term dates of a year
//!   from a packed historical table, caching one decoded map per year.
//!
//! Both are defined only inside their bundled table ranges; outside them
//! lookups return nothing rather than extrapolating.

mod convert;
mod data;
pub mod fmt;
mod solar_term;
mod table;

pub use convert::{find_day_info, LunarDate, LunarMonth};
pub use solar_term::{SolarTerm, SolarTermCalculator};
pub use table::{LunarTable, LunarYear, Variant, YearKind};
