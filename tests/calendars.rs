//! Host-side checks for the calendar arithmetic: Rata Die conversion,
//! Easter, the Hebrew and Islamic calendars, and the season instants.

use gps_clock::calendar::{date_from_rata_die, easter, equinox, hebrew, islamic, rata_die};
use time::{Date, Month, Weekday};

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

// ======================================================================
// Rata Die
// ======================================================================

#[test]
fn rata_die_epoch_is_day_one() {
    assert_eq!(rata_die(date(1, Month::January, 1)), 1);
}

#[test]
fn rata_die_of_y2k() {
    // Reference value from Dershowitz & Reingold.
    assert_eq!(rata_die(date(2000, Month::January, 1)), 730_120);
}

#[test]
fn rata_die_round_trips() {
    for rd in [1, 600_000, 730_120, 738_956, 800_000] {
        assert_eq!(rata_die(date_from_rata_die(rd).unwrap()), rd);
    }
}

// ======================================================================
// Easter
// ======================================================================

#[test]
fn western_easter_known_years() {
    let cases = [
        (1999, Month::April, 4),
        (2000, Month::April, 23),
        (2024, Month::March, 31),
        (2025, Month::April, 20),
        (2038, Month::April, 25),
    ];
    for (year, month, day) in cases {
        assert_eq!(easter::gregorian(year).unwrap(), date(year, month, day));
    }
}

#[test]
fn western_easter_classical_exceptions() {
    // d = 29, e = 6: April 19 instead of April 26.
    assert_eq!(easter::gregorian(1981).unwrap(), date(1981, Month::April, 19));
    // d = 28, e = 6, golden number > 11: April 18 instead of April 25.
    assert_eq!(easter::gregorian(1954).unwrap(), date(1954, Month::April, 18));
}

#[test]
fn orthodox_easter_known_years() {
    let cases = [
        (2016, Month::May, 1),
        (2024, Month::May, 5),
        // 2025: both reckonings coincide.
        (2025, Month::April, 20),
    ];
    for (year, month, day) in cases {
        assert_eq!(
            easter::julian_in_gregorian(year).unwrap(),
            date(year, month, day)
        );
    }
}

#[test]
fn easter_is_always_a_sunday_in_range() {
    for year in 1950..2099 {
        assert_eq!(easter::gregorian(year).unwrap().weekday(), Weekday::Sunday);
        assert_eq!(
            easter::julian_in_gregorian(year).unwrap().weekday(),
            Weekday::Sunday
        );
    }
}

// ======================================================================
// Hebrew calendar
// ======================================================================

#[test]
fn hebrew_known_dates() {
    let heb = hebrew::from_gregorian(date(2000, Month::January, 1));
    assert_eq!(
        heb,
        hebrew::HebrewDate {
            year: 5760,
            month: 10,
            day: 23
        }
    );
    assert_eq!(heb.month_name(), "Tevet");

    // Rosh Hashanah 5784 fell on 2023-09-16.
    assert_eq!(
        hebrew::to_rata_die(hebrew::HebrewDate {
            year: 5784,
            month: 7,
            day: 1
        }),
        rata_die(date(2023, Month::September, 16))
    );
}

#[test]
fn hebrew_leap_years_follow_the_19_year_cycle() {
    assert!(hebrew::is_leap_year(5784));
    assert!(!hebrew::is_leap_year(5783));
    assert!(!hebrew::is_leap_year(5785));
}

#[test]
fn hebrew_year_lengths_are_valid() {
    for year in 5700..5800 {
        let len = hebrew::year_length(year);
        assert!(
            matches!(len, 353 | 354 | 355 | 383 | 384 | 385),
            "year {year} has length {len}"
        );
    }
}

#[test]
fn hebrew_new_year_never_falls_on_sun_wed_fri() {
    // The lo adu rosh postponement rule.
    for year in 5700..5800 {
        let weekday = date_from_rata_die(hebrew::new_year(year))
            .unwrap()
            .weekday();
        assert!(
            !matches!(
                weekday,
                Weekday::Sunday | Weekday::Wednesday | Weekday::Friday
            ),
            "year {year} starts on {weekday:?}"
        );
    }
}

#[test]
fn hebrew_round_trips() {
    let start = hebrew::new_year(5784);
    for rd in (start..start + 800).step_by(17) {
        let heb = hebrew::from_rata_die(rd);
        assert_eq!(hebrew::to_rata_die(heb), rd, "at {heb:?}");
        assert!(heb.day >= 1 && heb.day <= hebrew::month_length(heb.year, heb.month));
    }
}

#[test]
fn adar_naming_depends_on_leap_year() {
    // 5784 is leap: months 12 and 13 are Adar I / Adar II.
    let adar1 = hebrew::HebrewDate {
        year: 5784,
        month: 12,
        day: 1,
    };
    let adar2 = hebrew::HebrewDate {
        year: 5784,
        month: 13,
        day: 1,
    };
    assert_eq!(adar1.month_name(), "Adar I");
    assert_eq!(adar2.month_name(), "Adar II");
    // 5783 is common: month 12 is plain Adar.
    let adar = hebrew::HebrewDate {
        year: 5783,
        month: 12,
        day: 1,
    };
    assert_eq!(adar.month_name(), "Adar");
}

// ======================================================================
// Islamic calendar
// ======================================================================

#[test]
fn islamic_epoch_is_friday_622_07_19() {
    let epoch = islamic::to_rata_die(islamic::IslamicDate {
        year: 1,
        month: 1,
        day: 1,
    });
    let gregorian = date_from_rata_die(epoch).unwrap();
    assert_eq!(gregorian, date(622, Month::July, 19));
    assert_eq!(gregorian.weekday(), Weekday::Friday);
}

#[test]
fn islamic_known_dates() {
    // Civil-tabular 1 Ramadan 1445 = 2024-03-11.
    assert_eq!(
        islamic::from_gregorian(date(2024, Month::March, 11)),
        islamic::IslamicDate {
            year: 1445,
            month: 9,
            day: 1
        }
    );
    let new_year_day = islamic::from_gregorian(date(2024, Month::January, 1));
    assert_eq!(
        new_year_day,
        islamic::IslamicDate {
            year: 1445,
            month: 6,
            day: 19
        }
    );
    assert_eq!(new_year_day.month_name(), "Jumada II");
}

#[test]
fn islamic_round_trips() {
    let start = rata_die(date(2024, Month::January, 1));
    for rd in (start..start + 500).step_by(13) {
        let isl = islamic::from_rata_die(rd);
        assert_eq!(islamic::to_rata_die(isl), rd, "at {isl:?}");
        assert!((1..=12).contains(&isl.month));
        assert!((1..=30).contains(&isl.day));
    }
}

#[test]
fn islamic_leap_cycle() {
    // Years 2, 5, 7, ... of each 30-year cycle are leap.
    assert!(islamic::is_leap_year(2));
    assert!(islamic::is_leap_year(1445));
    assert!(!islamic::is_leap_year(1446));
}

#[test]
fn islamic_year_lengths() {
    for year in 1440..1460 {
        let start = islamic::to_rata_die(islamic::IslamicDate {
            year,
            month: 1,
            day: 1,
        });
        let next = islamic::to_rata_die(islamic::IslamicDate {
            year: year + 1,
            month: 1,
            day: 1,
        });
        let expected = if islamic::is_leap_year(year) { 355 } else { 354 };
        assert_eq!(next - start, expected, "year {year}");
    }
}

// ======================================================================
// Equinoxes and solstices
// ======================================================================

/// Minutes between the computed instant and a reference (year, month, day,
/// hour, minute) from the Astronomical Almanac.
fn minutes_off(
    event: equinox::SeasonEvent,
    year: i32,
    month: Month,
    day: u8,
    hour: u8,
    minute: u8,
) -> i64 {
    let instant = event.instant(year).unwrap();
    let reference = date(year, month, day).with_hms(hour, minute, 0).unwrap();
    (instant - reference).whole_minutes()
}

#[test]
fn season_events_2024_match_the_almanac() {
    use equinox::SeasonEvent::*;
    // The ignored TT-UTC difference contributes about a minute.
    let cases = [
        (MarchEquinox, Month::March, 20, 3, 6),
        (JuneSolstice, Month::June, 20, 20, 51),
        (SeptemberEquinox, Month::September, 22, 12, 44),
        (DecemberSolstice, Month::December, 21, 9, 20),
    ];
    for (event, month, day, hour, minute) in cases {
        let off = minutes_off(event, 2024, month, day, hour, minute);
        assert!(off.abs() <= 5, "{event:?} off by {off} minutes");
    }
}

#[test]
fn season_events_stay_in_their_windows() {
    for year in 2000..2050 {
        let march = equinox::SeasonEvent::MarchEquinox.instant(year).unwrap();
        assert_eq!(march.month(), Month::March);
        assert!((19..=21).contains(&march.day()), "{year}: {march:?}");

        let dec = equinox::SeasonEvent::DecemberSolstice.instant(year).unwrap();
        assert_eq!(dec.month(), Month::December);
        assert!((20..=22).contains(&dec.day()), "{year}: {dec:?}");
    }
}
