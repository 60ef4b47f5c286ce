//! Host-side checks for the time-zone table and its daylight-saving rules.

use gps_clock::zones::{zone, ZONES};
use time::{Date, Month, OffsetDateTime};

fn utc(year: i32, month: Month, day: u8, hour: u8, minute: u8) -> OffsetDateTime {
    Date::from_calendar_date(year, month, day)
        .unwrap()
        .with_hms(hour, minute, 0)
        .unwrap()
        .assume_utc()
}

fn named(name: &str) -> &'static gps_clock::zones::Zone {
    ZONES
        .iter()
        .find(|z| z.name == name)
        .unwrap_or_else(|| panic!("no zone named {name}"))
}

#[test]
fn fixed_zones_never_change() {
    let india = named("India");
    assert!(!india.has_dst());
    assert_eq!(india.offset_minutes(utc(2024, Month::January, 15, 12, 0)), 330);
    assert_eq!(india.offset_minutes(utc(2024, Month::July, 15, 12, 0)), 330);
    assert_eq!(india.abbrev(utc(2024, Month::July, 15, 12, 0)), "IST");
}

#[test]
fn central_europe_spring_change() {
    // 2024: last Sunday of March is the 31st; 02:00 CET = 01:00 UTC.
    let zone = named("Central Europe");
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 31, 0, 59)), 60);
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 31, 1, 1)), 120);
    assert_eq!(zone.abbrev(utc(2024, Month::March, 31, 0, 59)), "CET");
    assert_eq!(zone.abbrev(utc(2024, Month::March, 31, 1, 1)), "CEST");
}

#[test]
fn central_europe_autumn_change() {
    // 2024: last Sunday of October is the 27th; 03:00 CEST = 01:00 UTC.
    let zone = named("Central Europe");
    assert_eq!(zone.offset_minutes(utc(2024, Month::October, 27, 0, 59)), 120);
    assert_eq!(zone.offset_minutes(utc(2024, Month::October, 27, 1, 1)), 60);
}

#[test]
fn uk_change_is_at_one_am() {
    // 01:00 GMT = 01:00 UTC on 2024-03-31.
    let zone = named("UK");
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 31, 0, 59)), 0);
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 31, 1, 1)), 60);
    assert_eq!(zone.abbrev(utc(2024, Month::June, 1, 12, 0)), "BST");
    assert_eq!(zone.abbrev(utc(2024, Month::December, 1, 12, 0)), "GMT");
}

#[test]
fn us_eastern_changes() {
    let zone = named("US Eastern");
    // Second Sunday of March 2024 is the 10th; 02:00 EST = 07:00 UTC.
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 10, 6, 59)), -300);
    assert_eq!(zone.offset_minutes(utc(2024, Month::March, 10, 7, 1)), -240);
    // First Sunday of November is the 3rd; 02:00 EDT = 06:00 UTC.
    assert_eq!(zone.offset_minutes(utc(2024, Month::November, 3, 5, 59)), -240);
    assert_eq!(zone.offset_minutes(utc(2024, Month::November, 3, 6, 1)), -300);
}

#[test]
fn southern_hemisphere_daylight_time_spans_new_year() {
    let zone = named("Australia East");
    assert_eq!(zone.offset_minutes(utc(2024, Month::January, 15, 0, 0)), 660);
    assert_eq!(zone.offset_minutes(utc(2024, Month::June, 15, 0, 0)), 600);
    assert_eq!(zone.offset_minutes(utc(2024, Month::December, 15, 0, 0)), 660);
    // First Sunday of April 2024 is the 7th; 03:00 AEDT = 16:00 UTC Apr 6.
    assert_eq!(zone.offset_minutes(utc(2024, Month::April, 6, 15, 59)), 660);
    assert_eq!(zone.offset_minutes(utc(2024, Month::April, 6, 16, 1)), 600);
    assert_eq!(zone.abbrev(utc(2024, Month::January, 15, 0, 0)), "AEDT");
}

#[test]
fn half_hour_offsets() {
    let india = named("India");
    assert_eq!(india.offset_minutes(utc(2024, Month::May, 1, 0, 0)), 330);

    let nf = named("Newfoundland");
    assert_eq!(nf.offset_minutes(utc(2024, Month::January, 15, 12, 0)), -210);
    assert_eq!(nf.offset_minutes(utc(2024, Month::July, 15, 12, 0)), -150);
}

#[test]
fn utc_offset_helper_matches_minutes() {
    let zone = named("Japan");
    let offset = zone.utc_offset(utc(2024, Month::May, 1, 0, 0));
    assert_eq!(offset.whole_seconds(), 540 * 60);
}

#[test]
fn table_shape() {
    assert_eq!(ZONES.len(), 18);
    assert_eq!(ZONES[0].name, "UTC");
    // Accessor clamps out-of-range indices instead of panicking.
    assert_eq!(zone(usize::MAX).name, ZONES[ZONES.len() - 1].name);
}
