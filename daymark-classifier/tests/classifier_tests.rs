use daymark_classifier::{CalendarContext, Classification, DayClassifier, Source};
use daymark_holiday::{PlanFile, PlanKey, Region};
use daymark_rules::RecurringRule;
use daymark_store::DayStore;
use daymark_types::{CalendarDay, DayType, Weekday};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn day(y: i32, m: u8, d: u8) -> CalendarDay {
    CalendarDay::from_ymd(y, m, d).unwrap()
}

fn weekend_rule() -> RecurringRule {
    RecurringRule::default_weekend()
}

/// A small plan: 2026-01-01 off ("New Year"), 2026-01-04 (a Sunday) work.
fn plan_with_shift() -> daymark_holiday::PublicHolidayPlan {
    let json = r#"{
        "name": "test plan",
        "days": [
            {"name": "New Year", "date": {"year":2026,"month":1,"day":1}, "type": 0},
            {"name": "makeup day", "date": {"year":2026,"month":1,"day":4}, "type": 1}
        ],
        "start": {"year":2026,"month":1,"day":1},
        "end": {"year":2026,"month":12,"day":31}
    }"#;
    PlanFile::from_json(json).unwrap().into_plan().unwrap()
}

// ── precedence ───────────────────────────────────────────────────

#[test]
fn base_rule_answers_when_alone() {
    let classifier = DayClassifier::new(weekend_rule(), None, None);
    assert!(!classifier.is_off(day(2026, 1, 1)).unwrap()); // Thursday
    assert!(classifier.is_off(day(2026, 1, 3)).unwrap()); // Saturday
}

#[test]
fn plan_entry_beats_base_rule() {
    let classifier = DayClassifier::new(weekend_rule(), Some(plan_with_shift()), None);
    // Thursday, but the plan marks it off.
    assert!(classifier.is_off(day(2026, 1, 1)).unwrap());
    // Sunday, but the plan shifts it to a workday.
    assert!(!classifier.is_off(day(2026, 1, 4)).unwrap());
    // Days without entries still follow the base rule.
    assert!(classifier.is_off(day(2026, 1, 10)).unwrap()); // Saturday
}

#[test]
fn custom_override_beats_everything() {
    let store = DayStore::open_in_memory().unwrap();
    let classifier =
        DayClassifier::new(weekend_rule(), Some(plan_with_shift()), Some(store.clone()));

    // Plan says off; the user overrides to work.
    store
        .set_custom_day(day(2026, 1, 1), Some(DayType::Work))
        .unwrap();
    assert!(!classifier.is_off(day(2026, 1, 1)).unwrap());

    // Removing the override lets the plan answer again.
    store.set_custom_day(day(2026, 1, 1), None).unwrap();
    assert!(classifier.is_off(day(2026, 1, 1)).unwrap());
}

#[test]
fn classification_reports_the_deciding_layer() {
    let store = DayStore::open_in_memory().unwrap();
    let classifier =
        DayClassifier::new(weekend_rule(), Some(plan_with_shift()), Some(store.clone()));

    assert_eq!(
        Classification {
            day_type: DayType::Off,
            source: Source::HolidayPlan,
            holiday_name: Some("New Year".into()),
        },
        classifier.classify(day(2026, 1, 1)).unwrap()
    );

    store
        .set_custom_day(day(2026, 1, 1), Some(DayType::Work))
        .unwrap();
    let decided = classifier.classify(day(2026, 1, 1)).unwrap();
    assert_eq!(Source::CustomOverride, decided.source);
    assert_eq!(None, decided.holiday_name);

    assert_eq!(
        Source::BaseRule,
        classifier.classify(day(2026, 1, 7)).unwrap().source
    );
}

#[test]
fn prefetched_classification_matches_the_store_path() {
    let store = DayStore::open_in_memory().unwrap();
    let classifier =
        DayClassifier::new(weekend_rule(), Some(plan_with_shift()), Some(store.clone()));
    store
        .set_custom_day(day(2026, 1, 2), Some(DayType::Off))
        .unwrap();

    let from = day(2026, 1, 1);
    let to = day(2026, 1, 10);
    let rows = store.custom_days_in(from, to).unwrap();
    let mut d = from;
    while d <= to {
        let prefetched = rows
            .iter()
            .find(|r| r.day == d)
            .map(|r| r.day_type);
        assert_eq!(
            classifier.is_off(d).unwrap(),
            classifier.is_off_with(d, prefetched),
            "at {d}"
        );
        d = d.next();
    }
}

// ── clash detection ──────────────────────────────────────────────

#[test]
fn no_signals_means_no_clash() {
    let classifier = DayClassifier::new(weekend_rule(), None, None);
    assert!(!classifier.check_clash_day(day(2026, 1, 1), true).unwrap());
}

#[test]
fn plan_disagreeing_with_base_is_a_clash() {
    let classifier = DayClassifier::new(weekend_rule(), Some(plan_with_shift()), None);
    // Base says work (Thursday), plan says off: clash.
    assert!(classifier.check_clash_day(day(2026, 1, 1), false).unwrap());
    // Base says off (Sunday), plan says work: clash.
    assert!(classifier.check_clash_day(day(2026, 1, 4), false).unwrap());
    // No plan entry: no clash.
    assert!(!classifier.check_clash_day(day(2026, 1, 7), false).unwrap());
}

#[test]
fn base_off_plan_work_without_custom_is_a_clash() {
    // The concrete table row: base off, plan says work, custom absent,
    // include_custom = false -> clash.
    let mut off_weekdays = BTreeSet::new();
    off_weekdays.insert(Weekday::Sunday);
    let classifier = DayClassifier::new(
        RecurringRule::Standard { off_weekdays },
        Some(plan_with_shift()),
        None,
    );
    assert!(classifier.check_clash_day(day(2026, 1, 4), false).unwrap());
}

#[test]
fn custom_agreeing_with_all_clears_the_clash() {
    let store = DayStore::open_in_memory().unwrap();
    let classifier =
        DayClassifier::new(weekend_rule(), Some(plan_with_shift()), Some(store.clone()));
    let d = day(2026, 1, 1); // base work, plan off

    // plan != base: clash with or without the custom layer.
    assert!(classifier.check_clash_day(d, true).unwrap());

    // A custom "off" matching the plan still clashes: base disagrees.
    store.set_custom_day(d, Some(DayType::Off)).unwrap();
    assert!(classifier.check_clash_day(d, true).unwrap());

    // Custom equal to base on a day with no plan entry: calm.
    let plain = day(2026, 1, 7); // Wednesday, base work
    store.set_custom_day(plain, Some(DayType::Work)).unwrap();
    assert!(!classifier.check_clash_day(plain, true).unwrap());

    // Custom differing from base on a plain day: clash, but only when
    // the custom layer is included.
    store.set_custom_day(plain, Some(DayType::Off)).unwrap();
    assert!(classifier.check_clash_day(plain, true).unwrap());
    assert!(!classifier.check_clash_day(plain, false).unwrap());
}

#[test]
fn all_three_agreeing_is_calm() {
    // A base rule that is off on Thursdays agrees with the plan's New
    // Year entry; a matching custom override keeps the day calm.
    let store = DayStore::open_in_memory().unwrap();
    let classifier = DayClassifier::new(
        RecurringRule::Standard {
            off_weekdays: BTreeSet::from([Weekday::Thursday]),
        },
        Some(plan_with_shift()),
        Some(store.clone()),
    );
    let d = day(2026, 1, 1); // Thursday: base off, plan off
    assert!(!classifier.check_clash_day(d, true).unwrap());

    store.set_custom_day(d, Some(DayType::Off)).unwrap();
    assert!(!classifier.check_clash_day(d, true).unwrap());

    // Flipping the custom to work breaks the agreement.
    store.set_custom_day(d, Some(DayType::Work)).unwrap();
    assert!(classifier.check_clash_day(d, true).unwrap());
}

// ── forward search ───────────────────────────────────────────────

#[test]
fn finds_the_next_off_and_work_days() {
    let classifier = DayClassifier::new(weekend_rule(), Some(plan_with_shift()), None);
    // After Wednesday 2025-12-31: next off day is New Year (plan), next
    // work day is Friday.
    let after = day(2025, 12, 31);
    assert_eq!(
        Some(day(2026, 1, 1)),
        classifier.fetch_next_day(DayType::Off, after).unwrap()
    );
    assert_eq!(
        Some(day(2026, 1, 2)),
        classifier.fetch_next_day(DayType::Work, after).unwrap()
    );
    // The search starts strictly after the given day.
    assert_eq!(
        Some(day(2026, 1, 9)),
        classifier
            .fetch_next_day(DayType::Work, day(2026, 1, 8))
            .unwrap()
    );
}

#[test]
fn search_gives_up_after_365_days() {
    // A rule with no off days at all: nothing to find.
    let classifier = DayClassifier::new(
        RecurringRule::Standard {
            off_weekdays: BTreeSet::new(),
        },
        None,
        None,
    );
    assert_eq!(
        None,
        classifier
            .fetch_next_day(DayType::Off, day(2026, 1, 1))
            .unwrap()
    );

    // An off day exactly at the cap is found; one past it is not.
    let store = DayStore::open_in_memory().unwrap();
    let far = DayClassifier::new(
        RecurringRule::Standard {
            off_weekdays: BTreeSet::new(),
        },
        None,
        Some(store.clone()),
    );
    let start = day(2026, 1, 1);
    store
        .set_custom_day(start + 365, Some(DayType::Off))
        .unwrap();
    assert_eq!(
        Some(start + 365),
        far.fetch_next_day(DayType::Off, start).unwrap()
    );

    store.set_custom_day(start + 365, None).unwrap();
    store
        .set_custom_day(start + 366, Some(DayType::Off))
        .unwrap();
    assert_eq!(None, far.fetch_next_day(DayType::Off, start).unwrap());
}

// ── end to end through the context ───────────────────────────────

#[test]
fn new_year_2026_end_to_end() {
    let context = CalendarContext::open_in_memory().unwrap();
    context
        .plans()
        .select(Some(PlanKey::Builtin(Region::China)))
        .unwrap();

    // Base rule defaults to the weekend; 2026-01-01 is a Thursday, so the
    // base says work — but the bundled plan marks it off.
    let classifier = context.classifier().unwrap();
    assert_eq!(
        RecurringRule::default_weekend(),
        *classifier.base_rule()
    );
    assert!(classifier.is_off(day(2026, 1, 1)).unwrap());

    // A custom override flips it to work and wins.
    context
        .store()
        .set_custom_day(day(2026, 1, 1), Some(DayType::Work))
        .unwrap();
    assert!(!classifier.is_off(day(2026, 1, 1)).unwrap());
}

#[test]
fn context_persists_services_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    {
        let context = CalendarContext::open(&path).unwrap();
        context
            .plans()
            .select(Some(PlanKey::Builtin(Region::UnitedStates)))
            .unwrap();
        context.classifier().unwrap(); // writes the default base rule
    }

    let context = CalendarContext::open(&path).unwrap();
    let classifier = context.classifier().unwrap();
    assert_eq!("United States (Federal)", classifier.plan().unwrap().name());
    // Thanksgiving 2026 comes from the reloaded selection.
    assert!(classifier.is_off(day(2026, 11, 26)).unwrap());
}

#[test]
fn solar_terms_available_through_context() {
    let context = CalendarContext::open_in_memory().unwrap();
    assert_eq!(24, context.solar_terms().solar_terms(2026).len());
    assert!(context.solar_terms().solar_terms(2200).is_empty());
}
