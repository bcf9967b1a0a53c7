use daymark_lunisolar::{find_day_info, fmt, LunarMonth, SolarTerm, SolarTermCalculator, Variant};
use daymark_types::CalendarDay;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn day(y: i32, m: u8, d: u8) -> CalendarDay {
    CalendarDay::from_ymd(y, m, d).unwrap()
}

fn month(number: u8, is_leap: bool) -> LunarMonth {
    LunarMonth { number, is_leap }
}

// ── conversion ───────────────────────────────────────────────────

#[test]
fn new_year_2026_is_month_one_day_one() {
    let info = find_day_info(day(2026, 2, 17), Variant::Chinese).unwrap();
    assert_eq!(2026, info.year);
    assert_eq!(month(1, false), info.month);
    assert_eq!(1, info.day);
}

#[test]
fn conversion_matches_reference_dates() {
    // (gregorian, lunisolar year, month, leap, day)
    let cases = [
        ((2000, 1, 1), 1999, 11, false, 25),
        ((2016, 11, 29), 2016, 11, false, 1),
        ((2017, 1, 27), 2016, 12, false, 30),
        ((2017, 1, 28), 2017, 1, false, 1),
        ((2017, 7, 22), 2017, 6, false, 29),
        ((2017, 7, 23), 2017, 6, true, 1),
        ((2017, 12, 17), 2017, 10, false, 30),
        ((2026, 1, 1), 2025, 11, false, 13),
    ];
    for ((gy, gm, gd), y, m, leap, d) in cases {
        let info = find_day_info(day(gy, gm, gd), Variant::Chinese).unwrap();
        assert_eq!(
            (y, month(m, leap), d),
            (info.year, info.month, info.day),
            "for {gy:04}-{gm:02}-{gd:02}"
        );
    }
}

#[test]
fn every_year_starts_at_its_start_month() {
    let table = Variant::Chinese.table().unwrap();
    for year in table.years() {
        let info = find_day_info(year.start, Variant::Chinese).unwrap();
        assert_eq!(1, info.day, "year {}", year.year);
        assert_eq!(year.start_month, info.month.number, "year {}", year.year);
        assert_eq!(year.year, info.year);
    }
}

#[test]
fn days_before_and_after_the_table_are_unknown() {
    let table = Variant::Chinese.table().unwrap();
    assert!(find_day_info(table.start + -1, Variant::Chinese).is_none());
    assert!(find_day_info(table.end, Variant::Chinese).is_some());
    assert!(find_day_info(table.end + 1, Variant::Chinese).is_none());
    assert!(find_day_info(day(2150, 6, 1), Variant::Chinese).is_none());
}

#[test]
fn variants_can_disagree_on_leap_months() {
    // April 2012: the Chinese calendar doubled month 4, the Korean dangi
    // calendar doubled month 3, so the same day resolves differently.
    let d = day(2012, 4, 23);
    let cn = find_day_info(d, Variant::Chinese).unwrap();
    let kr = find_day_info(d, Variant::Korean).unwrap();
    assert_eq!(month(4, false), cn.month);
    assert_eq!(month(3, true), kr.month);
}

#[test]
fn sexagenary_cycle_is_exposed() {
    let info = find_day_info(day(2025, 6, 1), Variant::Chinese).unwrap();
    assert_eq!(month(5, false), info.month);
    assert_eq!("乙巳", fmt::sexagenary_name(info.sexagenary));
}

#[test]
fn consecutive_days_never_skip() {
    // Walking across several month and year boundaries, the lunisolar day
    // either advances by one or resets to 1 in the next month.
    let mut prev = find_day_info(day(2024, 12, 1), Variant::Chinese).unwrap();
    for i in 1..500 {
        let info = find_day_info(day(2024, 12, 1) + i, Variant::Chinese).unwrap();
        if info.month == prev.month {
            assert_eq!(prev.day + 1, info.day);
        } else {
            assert_eq!(1, info.day);
            assert!(prev.day == 29 || prev.day == 30);
        }
        prev = info;
    }
}

// ── solar terms ──────────────────────────────────────────────────

#[test]
fn year_2026_has_24_distinct_terms() {
    let calc = SolarTermCalculator::new();
    let terms = calc.solar_terms(2026);
    assert_eq!(24, terms.len());
    let identities: BTreeSet<SolarTerm> = terms.values().copied().collect();
    assert_eq!(24, identities.len());
    // Two terms per month, every month.
    for m in 1..=12u8 {
        let in_month = terms
            .keys()
            .filter(|d| d.to_gregorian().1 == m)
            .count();
        assert_eq!(2, in_month, "month {m}");
    }
}

#[test]
fn known_term_dates_for_2026() {
    let calc = SolarTermCalculator::new();
    let terms = calc.solar_terms(2026);
    assert_eq!(Some(&SolarTerm::MinorCold), terms.get(&day(2026, 1, 5)));
    assert_eq!(Some(&SolarTerm::StartOfSpring), terms.get(&day(2026, 2, 4)));
    assert_eq!(Some(&SolarTerm::SpringEquinox), terms.get(&day(2026, 3, 20)));
    assert_eq!(Some(&SolarTerm::WinterSolstice), terms.get(&day(2026, 12, 22)));
}

#[test]
fn years_outside_the_table_are_empty() {
    let calc = SolarTermCalculator::new();
    assert!(calc.solar_terms(2200).is_empty());
    assert!(calc.solar_terms(1900).is_empty());
    assert_eq!(24, calc.solar_terms(1901).len());
    assert_eq!(24, calc.solar_terms(2100).len());
}

#[test]
fn cache_returns_the_shared_map() {
    let calc = SolarTermCalculator::new();
    let a = calc.solar_terms(2026);
    let b = calc.solar_terms(2026);
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn concurrent_reads_and_fills_agree() {
    let calc = std::sync::Arc::new(SolarTermCalculator::new());
    let mut handles = Vec::new();
    for offset in 0..8 {
        let calc = std::sync::Arc::clone(&calc);
        handles.push(std::thread::spawn(move || {
            let mut total = 0usize;
            for year in (2000..2030).cycle().skip(offset).take(120) {
                total += calc.solar_terms(year).len();
            }
            total
        }));
    }
    for handle in handles {
        assert_eq!(120 * 24, handle.join().unwrap());
    }
}

#[test]
fn term_display_names() {
    assert_eq!("Winter Solstice", SolarTerm::WinterSolstice.to_string());
    assert_eq!("小寒", fmt::solar_term_name(SolarTerm::MinorCold));
}
