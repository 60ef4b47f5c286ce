//! Host-side checks for the astronomical code: sidereal time, the generic
//! rise/set scanner, and the sun/moon/planet ephemerides against almanac
//! values. Tolerances reflect the arc-minute accuracy of the formulas.

use core::f64::consts::TAU;

use gps_clock::astro::riseset::{scan_day, DayPath};
use gps_clock::astro::sun::Twilight;
use gps_clock::astro::{gmst_degrees, julian_day, moon, planets, sun, Horizontal};
use gps_clock::coords::LatLon;
use time::{Date, Month, OffsetDateTime, UtcOffset};

const LONDON: LatLon = LatLon::new(51.5074, -0.1278);
const TROMSO: LatLon = LatLon::new(69.65, 18.96);
const QUITO: LatLon = LatLon::new(0.0, -78.5);

fn utc(year: i32, month: Month, day: u8, hour: u8, minute: u8, second: u8) -> OffsetDateTime {
    Date::from_calendar_date(year, month, day)
        .unwrap()
        .with_hms(hour, minute, second)
        .unwrap()
        .assume_utc()
}

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

// ======================================================================
// Time scales
// ======================================================================

#[test]
fn julian_day_of_j2000() {
    let jd = julian_day(utc(2000, Month::January, 1, 12, 0, 0));
    assert!((jd - 2_451_545.0).abs() < 1e-9);
    let jd0 = julian_day(utc(2000, Month::January, 1, 0, 0, 0));
    assert!((jd0 - 2_451_544.5).abs() < 1e-9);
}

#[test]
fn julian_day_depends_on_the_instant_not_the_wall_clock() {
    // The same physical instant expressed in two zones must yield the same
    // Julian day; anything else shifts every rise/set by the zone offset.
    let t = utc(2024, Month::June, 21, 12, 0, 0);
    let bst = t.to_offset(UtcOffset::from_whole_seconds(3600).unwrap());
    assert_eq!(t, bst);
    assert!(
        (julian_day(t) - julian_day(bst)).abs() < 1e-12,
        "UTC {} vs +01:00 {}",
        julian_day(t),
        julian_day(bst)
    );
}

#[test]
fn gmst_at_j2000() {
    // 280.46061837 degrees by definition of the expansion.
    let gmst = gmst_degrees(utc(2000, Month::January, 1, 12, 0, 0));
    assert!((gmst - 280.460_618_37).abs() < 1e-6, "got {gmst}");
}

#[test]
fn gmst_advances_about_361_degrees_per_day() {
    let a = gmst_degrees(utc(2024, Month::June, 1, 0, 0, 0));
    let b = gmst_degrees(utc(2024, Month::June, 2, 0, 0, 0));
    let advance = (b - a).rem_euclid(360.0);
    assert!((advance - 0.9856).abs() < 0.01, "got {advance}");
}

// ======================================================================
// Generic rise/set scanner
// ======================================================================

#[test]
fn scan_finds_synthetic_crossings_to_the_minute() {
    // Altitude is a sine wave crossing zero upward at 06:00 and downward
    // at 18:00 local.
    let path = scan_day(0.0, |hours| Horizontal {
        altitude: 45.0 * libm::sin((hours - 6.0) / 24.0 * TAU),
        azimuth: 90.0,
    });
    let DayPath::Crossings { rise, set } = path else {
        panic!("expected crossings, got {path:?}");
    };
    let rise = rise.unwrap();
    let set = set.unwrap();
    assert!((i32::from(rise.minutes) - 360).abs() <= 1, "rise {rise:?}");
    assert!((i32::from(set.minutes) - 1080).abs() <= 1, "set {set:?}");
    assert_eq!(rise.hour(), 6);
    assert_eq!(set.hour(), 18);
}

#[test]
fn scan_reports_circumpolar_paths() {
    let up = scan_day(0.0, |_| Horizontal {
        altitude: 10.0,
        azimuth: 0.0,
    });
    assert_eq!(up, DayPath::AlwaysUp);

    let down = scan_day(0.0, |_| Horizontal {
        altitude: -10.0,
        azimuth: 0.0,
    });
    assert_eq!(down, DayPath::AlwaysDown);
}

// ======================================================================
// Sun
// ======================================================================

#[test]
fn london_midsummer_sunrise_and_sunset() {
    // 2024-06-21, BST: sunrise 04:43, sunset 21:21.
    let path = sun::day_path(date(2024, Month::June, 21), LONDON, 60, Twilight::Actual);
    let rise = path.rise().unwrap();
    let set = path.set().unwrap();
    assert!(
        (i32::from(rise.minutes) - (4 * 60 + 43)).abs() <= 10,
        "rise {:02}:{:02}",
        rise.hour(),
        rise.minute()
    );
    assert!(
        (i32::from(set.minutes) - (21 * 60 + 21)).abs() <= 10,
        "set {:02}:{:02}",
        set.hour(),
        set.minute()
    );
    // Midsummer sun rises in the northeast, sets in the northwest.
    assert!(rise.azimuth < 90.0, "rise azimuth {}", rise.azimuth);
    assert!(set.azimuth > 270.0, "set azimuth {}", set.azimuth);
}

#[test]
fn twilights_nest_around_sunrise() {
    let day = date(2024, Month::March, 20);
    let actual = sun::day_path(day, LONDON, 0, Twilight::Actual);
    let civil = sun::day_path(day, LONDON, 0, Twilight::Civil);
    let nautical = sun::day_path(day, LONDON, 0, Twilight::Nautical);
    let astronomical = sun::day_path(day, LONDON, 0, Twilight::Astronomical);

    let rises = [
        astronomical.rise().unwrap().minutes,
        nautical.rise().unwrap().minutes,
        civil.rise().unwrap().minutes,
        actual.rise().unwrap().minutes,
    ];
    assert!(rises.windows(2).all(|w| w[0] < w[1]), "rises {rises:?}");

    let sets = [
        actual.set().unwrap().minutes,
        civil.set().unwrap().minutes,
        nautical.set().unwrap().minutes,
        astronomical.set().unwrap().minutes,
    ];
    assert!(sets.windows(2).all(|w| w[0] < w[1]), "sets {sets:?}");
}

#[test]
fn polar_day_and_polar_night() {
    assert_eq!(
        sun::day_path(date(2024, Month::June, 21), TROMSO, 120, Twilight::Actual),
        DayPath::AlwaysUp
    );
    assert_eq!(
        sun::day_path(date(2024, Month::December, 21), TROMSO, 60, Twilight::Actual),
        DayPath::AlwaysDown
    );
}

#[test]
fn equatorial_day_is_about_twelve_hours() {
    // Quito on the equinox, zone UTC-5.
    let path = sun::day_path(date(2024, Month::March, 20), QUITO, -300, Twilight::Actual);
    let rise = path.rise().unwrap();
    let set = path.set().unwrap();
    let length = i32::from(set.minutes) - i32::from(rise.minutes);
    // Slightly over 12 h from refraction and the solar semidiameter.
    assert!((715..=740).contains(&length), "day length {length} min");
}

#[test]
fn london_solar_noon_midsummer() {
    let (minutes, elevation) = sun::solar_noon(date(2024, Month::June, 21), LONDON, 60);
    // About 13:02 BST; maximum elevation near 90 - 51.5 + 23.44.
    assert!(
        (i32::from(minutes) - (13 * 60 + 2)).abs() <= 8,
        "noon at {:02}:{:02}",
        minutes / 60,
        minutes % 60
    );
    assert!((60.0..64.0).contains(&elevation), "elevation {elevation}");
}

#[test]
fn sun_altitude_sign_matches_day_and_night() {
    let noon = sun::horizontal(utc(2024, Month::June, 21, 12, 0, 0), LONDON);
    assert!(noon.altitude > 55.0);
    let midnight = sun::horizontal(utc(2024, Month::June, 21, 0, 30, 0), LONDON);
    assert!(midnight.altitude < -10.0);
}

// ======================================================================
// Moon
// ======================================================================

#[test]
fn new_moon_2024_04_08() {
    // Instant of the total solar eclipse.
    let phase = moon::phase(utc(2024, Month::April, 8, 18, 21, 0));
    assert!(phase.illuminated < 0.02, "illuminated {}", phase.illuminated);
    assert!(
        phase.age_days < 1.0 || phase.age_days > moon::SYNODIC_MONTH - 1.0,
        "age {}",
        phase.age_days
    );
}

#[test]
fn full_moon_2024_04_23() {
    let phase = moon::phase(utc(2024, Month::April, 23, 23, 49, 0));
    assert!(phase.illuminated > 0.97, "illuminated {}", phase.illuminated);
    assert!(
        (13.8..15.8).contains(&phase.age_days),
        "age {}",
        phase.age_days
    );
}

#[test]
fn first_quarter_is_waxing_last_quarter_is_waning() {
    // 2024-04-15 19:13 UTC first quarter; 2024-05-01 11:27 UTC last quarter.
    let first = moon::phase(utc(2024, Month::April, 15, 19, 13, 0));
    assert!(first.waxing);
    assert!((0.35..0.65).contains(&first.illuminated));

    let last = moon::phase(utc(2024, Month::May, 1, 11, 27, 0));
    assert!(!last.waxing);
    assert!((0.35..0.65).contains(&last.illuminated));
}

#[test]
fn moon_distance_stays_in_orbit_range() {
    for day in 1..=28 {
        let sky = moon::sky(utc(2024, Month::February, day, 3, 0, 0), LONDON);
        assert!(
            (55.0..64.0).contains(&sky.distance_er),
            "day {day}: {} ER",
            sky.distance_er
        );
    }
}

#[test]
fn moon_next_events_are_ordered_and_in_range() {
    for day in [1, 8, 15, 22] {
        let events = moon::next_events(date(2024, Month::June, day), 600, LONDON, 60);
        assert!(!events.is_empty(), "day {day}");
        for event in &events {
            assert!(event.crossing.minutes < 1440);
            // Today's listings have not passed yet.
            assert!(event.tomorrow || event.crossing.minutes >= 600);
        }
        if events.len() == 2 {
            let key = |e: &moon::NextEvent| (e.tomorrow, e.crossing.minutes);
            assert!(key(&events[0]) <= key(&events[1]));
        }
    }
}

// ======================================================================
// Planets
// ======================================================================

#[test]
fn venus_and_jupiter_magnitudes_new_year_2024() {
    let when = utc(2024, Month::January, 1, 12, 0, 0);
    let venus = planets::view(planets::Planet::Venus, when, LONDON);
    assert!(
        (-4.8..-3.4).contains(&venus.magnitude),
        "Venus {}",
        venus.magnitude
    );
    assert!((0.2..1.8).contains(&venus.distance_au));

    let jupiter = planets::view(planets::Planet::Jupiter, when, LONDON);
    assert!(
        (-3.2..-1.8).contains(&jupiter.magnitude),
        "Jupiter {}",
        jupiter.magnitude
    );
    assert!((3.9..6.5).contains(&jupiter.distance_au));
}

#[test]
fn planet_phases_and_distances_are_physical() {
    let when = utc(2024, Month::March, 15, 22, 0, 0);
    for planet in planets::Planet::ALL {
        let view = planets::view(planet, when, LONDON);
        assert!(
            (0.0..=1.0).contains(&view.phase),
            "{} phase {}",
            planet.name(),
            view.phase
        );
        assert!(view.distance_au > 0.2, "{}", planet.name());
        assert!(view.horizontal.altitude.abs() <= 90.0);
        assert!((0.0..360.0).contains(&view.horizontal.azimuth));
    }
    // The outer planets always show a nearly full disc from Earth.
    let neptune = planets::view(planets::Planet::Neptune, when, LONDON);
    assert!(neptune.phase > 0.99, "Neptune phase {}", neptune.phase);
    assert!((28.0..32.0).contains(&neptune.distance_au));
}
