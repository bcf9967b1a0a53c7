//! The 24 solar terms.
//!
//! Term dates come from a packed historical table ([`crate::data`]): one
//! integer per year, 24 two-bit fields, each offset by a fixed per-term
//! correction to yield the day of month. Field order follows the calendar
//! (two terms per month starting in January), while term identity is
//! numbered from Start of Spring, hence the `(index + 22) % 24` rotation.

use crate::data::{DAY_CORRECTION, FIRST_YEAR, PACKED_TERMS};
use daymark_types::CalendarDay;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// One of the 24 solar terms, numbered from Start of Spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SolarTerm {
    StartOfSpring = 0,
    RainWater = 1,
    AwakeningOfInsects = 2,
    SpringEquinox = 3,
    PureBrightness = 4,
    GrainRain = 5,
    StartOfSummer = 6,
    GrainBuds = 7,
    GrainInEar = 8,
    SummerSolstice = 9,
    MinorHeat = 10,
    MajorHeat = 11,
    StartOfAutumn = 12,
    EndOfHeat = 13,
    WhiteDew = 14,
    AutumnEquinox = 15,
    ColdDew = 16,
    FrostDescent = 17,
    StartOfWinter = 18,
    MinorSnow = 19,
    MajorSnow = 20,
    WinterSolstice = 21,
    MinorCold = 22,
    MajorCold = 23,
}

impl SolarTerm {
    /// All 24 terms in order from Start of Spring.
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::StartOfSpring,
        SolarTerm::RainWater,
        SolarTerm::AwakeningOfInsects,
        SolarTerm::SpringEquinox,
        SolarTerm::PureBrightness,
        SolarTerm::GrainRain,
        SolarTerm::StartOfSummer,
        SolarTerm::GrainBuds,
        SolarTerm::GrainInEar,
        SolarTerm::SummerSolstice,
        SolarTerm::MinorHeat,
        SolarTerm::MajorHeat,
        SolarTerm::StartOfAutumn,
        SolarTerm::EndOfHeat,
        SolarTerm::WhiteDew,
        SolarTerm::AutumnEquinox,
        SolarTerm::ColdDew,
        SolarTerm::FrostDescent,
        SolarTerm::StartOfWinter,
        SolarTerm::MinorSnow,
        SolarTerm::MajorSnow,
        SolarTerm::WinterSolstice,
        SolarTerm::MinorCold,
        SolarTerm::MajorCold,
    ];

    /// The term's index in `0..24`, Start of Spring first.
    #[must_use]
    pub const fn index(&self) -> u8 {
        *self as u8
    }

    /// English name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            SolarTerm::StartOfSpring => "Start of Spring",
            SolarTerm::RainWater => "Rain Water",
            SolarTerm::AwakeningOfInsects => "Awakening of Insects",
            SolarTerm::SpringEquinox => "Spring Equinox",
            SolarTerm::PureBrightness => "Pure Brightness",
            SolarTerm::GrainRain => "Grain Rain",
            SolarTerm::StartOfSummer => "Start of Summer",
            SolarTerm::GrainBuds => "Grain Buds",
            SolarTerm::GrainInEar => "Grain in Ear",
            SolarTerm::SummerSolstice => "Summer Solstice",
            SolarTerm::MinorHeat => "Minor Heat",
            SolarTerm::MajorHeat => "Major Heat",
            SolarTerm::StartOfAutumn => "Start of Autumn",
            SolarTerm::EndOfHeat => "End of Heat",
            SolarTerm::WhiteDew => "White Dew",
            SolarTerm::AutumnEquinox => "Autumn Equinox",
            SolarTerm::ColdDew => "Cold Dew",
            SolarTerm::FrostDescent => "Frost Descent",
            SolarTerm::StartOfWinter => "Start of Winter",
            SolarTerm::MinorSnow => "Minor Snow",
            SolarTerm::MajorSnow => "Major Snow",
            SolarTerm::WinterSolstice => "Winter Solstice",
            SolarTerm::MinorCold => "Minor Cold",
            SolarTerm::MajorCold => "Major Cold",
        }
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map from term date to term, for one year.
pub type TermDates = BTreeMap<CalendarDay, SolarTerm>;

/// Decodes and caches per-year solar-term dates.
///
/// Reads may happen concurrently from multiple callers; cache population
/// takes the write lock. One decoded map is shared per year via `Arc`.
#[derive(Debug, Default)]
pub struct SolarTermCalculator {
    cache: RwLock<HashMap<i32, Arc<TermDates>>>,
}

impl SolarTermCalculator {
    /// Creates a calculator with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The 24 term dates of `year`, or an empty map for years outside the
    /// table.
    #[must_use]
    pub fn solar_terms(&self, year: i32) -> Arc<TermDates> {
        if let Some(hit) = self.cache.read().unwrap().get(&year) {
            return Arc::clone(hit);
        }
        let decoded = Arc::new(decode_year(year));
        let mut cache = self.cache.write().unwrap();
        // Another writer may have filled the slot while we decoded.
        Arc::clone(cache.entry(year).or_insert_with(|| {
            debug!(year, "solar terms cached");
            decoded
        }))
    }
}

fn decode_year(year: i32) -> TermDates {
    let mut terms = TermDates::new();
    let Some(offset) = year.checked_sub(FIRST_YEAR) else {
        return terms;
    };
    let Some(&packed) = usize::try_from(offset).ok().and_then(|i| PACKED_TERMS.get(i)) else {
        return terms;
    };
    for (index, correction) in DAY_CORRECTION.iter().enumerate() {
        let field = (packed >> (2 * index)) & 0b11;
        let day = correction + field as u8;
        let month = index as u8 / 2 + 1;
        let term = SolarTerm::ALL[(index + 22) % 24];
        let date = CalendarDay::from_ymd(year, month, day)
            .expect("term table only encodes real dates");
        terms.insert(date, term);
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_starts_in_january() {
        // Field 0 is January's first term, which is Minor Cold.
        let terms = decode_year(2000);
        let (first_date, first_term) = terms.iter().next().unwrap();
        assert_eq!((2000, 1), {
            let (y, m, _) = first_date.to_gregorian();
            (y, m)
        });
        assert_eq!(SolarTerm::MinorCold, *first_term);
    }

    #[test]
    fn out_of_table_years_are_empty() {
        assert!(decode_year(1900).is_empty());
        assert!(decode_year(2101).is_empty());
        assert!(decode_year(i32::MIN).is_empty());
    }
}
