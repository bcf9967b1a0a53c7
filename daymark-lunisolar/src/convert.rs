//! Gregorian to lunisolar date conversion.

use crate::table::{LunarYear, Variant, YearKind};
use daymark_types::CalendarDay;

/// A month of the lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarMonth {
    /// Month number in `1..=12`.
    pub number: u8,
    /// True for the intercalary occurrence of a doubled month.
    pub is_leap: bool,
}

/// A fully resolved lunisolar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// The lunisolar year number.
    pub year: i32,
    pub month: LunarMonth,
    /// Day of month in `1..=30`.
    pub day: u8,
    /// Sexagenary cycle index of the year, `0..60`.
    pub sexagenary: u8,
}

/// Converts a Gregorian day into its lunisolar date.
///
/// Returns `None` for days outside the variant's table range (or when the
/// bundled table failed to load).
#[must_use]
pub fn find_day_info(day: CalendarDay, variant: Variant) -> Option<LunarDate> {
    let table = variant.table()?;
    let year = table.year_containing(day)?;

    let mut offset = day - year.start;
    debug_assert!((0..i64::from(year.day_count())).contains(&offset));
    for slot in 0..year.month_count() {
        let len = i64::from(year.month_len(slot));
        if offset < len {
            return Some(LunarDate {
                year: year.year,
                month: month_at_slot(year, slot),
                day: (offset + 1) as u8,
                sexagenary: year.sexagenary,
            });
        }
        offset -= len;
    }
    None
}

/// Resolves the month occupying `slot`, accounting for the intercalary
/// position: months after the doubled one shift back by one slot.
fn month_at_slot(year: &LunarYear, slot: u8) -> LunarMonth {
    if year.starts_on_leap {
        return if slot == 0 {
            LunarMonth {
                number: year.start_month,
                is_leap: true,
            }
        } else {
            LunarMonth {
                number: year.start_month + slot - 1,
                is_leap: false,
            }
        };
    }
    match year.kind {
        YearKind::Common => LunarMonth {
            number: year.start_month + slot,
            is_leap: false,
        },
        YearKind::Leap(_) => {
            let leap_slot = year
                .leap_slot()
                .expect("leap year always has a leap slot");
            if slot < leap_slot {
                LunarMonth {
                    number: year.start_month + slot,
                    is_leap: false,
                }
            } else if slot == leap_slot {
                LunarMonth {
                    number: year.start_month + leap_slot - 1,
                    is_leap: true,
                }
            } else {
                LunarMonth {
                    number: year.start_month + slot - 1,
                    is_leap: false,
                }
            }
        }
    }
}
