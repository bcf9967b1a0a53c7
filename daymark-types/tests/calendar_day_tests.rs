use daymark_types::{CalendarDay, DayType, GregorianDay, Weekday};
use pretty_assertions::assert_eq;

#[test]
fn gregorian_round_trip() {
    for (y, m, d) in [
        (1970, 1, 1),
        (2000, 1, 1),
        (2024, 2, 29),
        (2026, 1, 1),
        (2099, 12, 31),
    ] {
        let day = CalendarDay::from_ymd(y, m, d).unwrap();
        assert_eq!((y, m, d), day.to_gregorian());
    }
}

#[test]
fn known_day_numbers() {
    assert_eq!(
        2_451_545,
        CalendarDay::from_ymd(2000, 1, 1).unwrap().day_number()
    );
    assert_eq!(
        2_440_588,
        CalendarDay::from_ymd(1970, 1, 1).unwrap().day_number()
    );
}

#[test]
fn day_arithmetic_crosses_boundaries() {
    let dec31 = CalendarDay::from_ymd(2025, 12, 31).unwrap();
    let jan1 = CalendarDay::from_ymd(2026, 1, 1).unwrap();
    assert_eq!(jan1, dec31 + 1);
    assert_eq!(1, jan1 - dec31);
    assert_eq!(jan1, dec31.next());
}

#[test]
fn weekday_matches_known_dates() {
    // 2026-01-01 is a Thursday, 2000-01-01 a Saturday.
    let thu = CalendarDay::from_ymd(2026, 1, 1).unwrap();
    assert_eq!(Weekday::Thursday, thu.weekday());
    let sat = CalendarDay::from_ymd(2000, 1, 1).unwrap();
    assert_eq!(Weekday::Saturday, sat.weekday());
}

#[test]
fn weekday_advances_by_one_per_day() {
    let start = CalendarDay::from_ymd(2026, 3, 1).unwrap();
    for i in 0..14 {
        let expect = (start.weekday().index() as i64 - 1 + i).rem_euclid(7) + 1;
        assert_eq!(expect as u8, (start + i).weekday().index());
    }
}

#[test]
fn display_is_iso() {
    let day = CalendarDay::from_ymd(2026, 1, 1).unwrap();
    assert_eq!("2026-01-01", day.to_string());
}

#[test]
fn structured_day_converts() {
    let g = GregorianDay {
        year: 2026,
        month: 1,
        day: 1,
    };
    let day = g.to_calendar_day().unwrap();
    assert_eq!(g, GregorianDay::from(day));

    let bad = GregorianDay {
        year: 2026,
        month: 2,
        day: 30,
    };
    assert!(bad.to_calendar_day().is_err());
}

// ── serde formats ────────────────────────────────────────────────

#[test]
fn calendar_day_serializes_transparent() {
    let day = CalendarDay::from_ymd(2000, 1, 1).unwrap();
    assert_eq!("2451545", serde_json::to_string(&day).unwrap());
    let back: CalendarDay = serde_json::from_str("2451545").unwrap();
    assert_eq!(day, back);
}

#[test]
fn day_type_serializes_as_integer() {
    assert_eq!("0", serde_json::to_string(&DayType::Off).unwrap());
    assert_eq!("1", serde_json::to_string(&DayType::Work).unwrap());
    assert_eq!(
        DayType::Work,
        serde_json::from_str::<DayType>("1").unwrap()
    );
    assert!(serde_json::from_str::<DayType>("2").is_err());
}

#[test]
fn weekday_index_round_trip() {
    for w in Weekday::ALL {
        assert_eq!(w, Weekday::from_index(w.index()).unwrap());
    }
    assert!(Weekday::from_index(0).is_err());
    assert!(Weekday::from_index(8).is_err());
}
