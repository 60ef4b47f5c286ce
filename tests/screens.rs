//! Host-side rendering checks: every screen draws into a [`Page`] buffer,
//! so the whole display pipeline short of the I2C bus is testable here.

use gps_clock::screens::{self, Context, Page, ScreenId, ALL_SCREENS};
use gps_clock::settings::{DateFormat, Settings};
use gps_clock::{FixTracker, GpsSnapshot, FIX_STALE_SECS};
use gps_clock::coords::LatLon;
use time::{Date, Month, OffsetDateTime, UtcOffset};

const HELSINKI_FIX: GpsSnapshot = GpsSnapshot {
    position: LatLon::new(60.17, 24.94),
    altitude_m: 24.0,
    satellites: 9,
    hdop: 1.1,
};

fn utc(year: i32, month: Month, day: u8, hour: u8, minute: u8, second: u8) -> OffsetDateTime {
    Date::from_calendar_date(year, month, day)
        .unwrap()
        .with_hms(hour, minute, second)
        .unwrap()
        .assume_utc()
}

/// Context with a Helsinki fix, local time = UTC+2 (EET in winter).
fn context<'a>(settings: &'a Settings, at: OffsetDateTime) -> Context<'a> {
    Context {
        utc: at,
        local: at.to_offset(UtcOffset::from_whole_seconds(2 * 3600).unwrap()),
        zone_abbrev: "EET",
        fix: Some(HELSINKI_FIX),
        settings,
    }
}

fn no_fix<'a>(settings: &'a Settings, at: OffsetDateTime) -> Context<'a> {
    Context {
        utc: at,
        local: at,
        zone_abbrev: "UTC",
        fix: None,
        settings,
    }
}

#[test]
fn page_write_clips_at_the_right_edge() {
    let mut page = Page::new();
    page.write_at(0, 15, "abcdefgh");
    assert_eq!(&page.row_text(0).as_str()[15..], "abcde");
    // Out-of-range rows are ignored.
    page.write_at(4, 0, "nope");
}

#[test]
fn page_center() {
    let mut page = Page::new();
    page.center(1, "abcd");
    assert_eq!(page.row_text(1).as_str(), "        abcd        ");
}

#[test]
fn local_utc_screen() {
    let settings = Settings::default();
    // 2024-01-01 10:20:30 UTC -> Monday 12:20:30 EET.
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::LocalUtc, &ctx);
    assert!(page.row_contains(0, "Monday"));
    assert!(page.row_contains(1, "2024-01-01"));
    assert!(page.row_contains(1, "12:20:30"));
    assert!(page.row_contains(2, "EET"));
    assert!(page.row_contains(3, "UTC"));
    assert!(page.row_contains(3, "10:20:30"));
}

#[test]
fn local_utc_respects_date_format_and_language() {
    let settings = Settings {
        date_format: DateFormat::Us,
        language: gps_clock::settings::Language::German,
        ..Settings::default()
    };
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::LocalUtc, &ctx);
    assert!(page.row_contains(0, "Montag"));
    assert!(page.row_contains(1, "01/01/2024"));
}

#[test]
fn before_first_fix_the_clock_flags_it() {
    let settings = Settings::default();
    let ctx = no_fix(&settings, OffsetDateTime::UNIX_EPOCH);
    let page = screens::render(ScreenId::LocalUtc, &ctx);
    assert!(page.row_contains(2, "no GPS time yet"));
}

#[test]
fn utc_locator_screen_shows_the_grid_square() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::UtcLocator, &ctx);
    assert!(page.row_contains(2, "Locator: KP20le"));
    assert!(page.row_contains(3, "60.17N"));
    assert!(page.row_contains(3, "24.94E"));
}

#[test]
fn position_screens_without_fix_say_so() {
    let settings = Settings::default();
    let ctx = no_fix(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    for id in [
        ScreenId::UtcLocator,
        ScreenId::UtcPosition,
        ScreenId::SolarRiseSet,
        ScreenId::MoonRiseSet,
        ScreenId::PlanetsInner,
        ScreenId::PlanetsOuter,
    ] {
        let page = screens::render(id, &ctx);
        let flagged = (0..4).any(|row| page.row_contains(row, "waiting for GPS fix"));
        assert!(flagged, "{id:?} did not flag the missing fix");
    }
}

#[test]
fn a_fix_ages_out_and_the_screens_fall_back_to_waiting() {
    let settings = Settings::default();
    let at = utc(2024, Month::January, 1, 10, 20, 30);

    let mut tracker = FixTracker::new();
    assert_eq!(tracker.current(at.unix_timestamp()), None);

    tracker.update(HELSINKI_FIX, at.unix_timestamp());
    let fresh = at.unix_timestamp() + FIX_STALE_SECS;
    assert_eq!(tracker.current(fresh), Some(HELSINKI_FIX));
    assert_eq!(tracker.current(fresh + 1), None);

    // Rendering with the aged-out fix shows the waiting row again.
    let later = at + time::Duration::seconds(FIX_STALE_SECS + 1);
    let ctx = Context {
        utc: later,
        local: later,
        zone_abbrev: "UTC",
        fix: tracker.current(later.unix_timestamp()),
        settings: &settings,
    };
    let page = screens::render(ScreenId::UtcLocator, &ctx);
    assert!(page.row_contains(2, "waiting for GPS fix"));
}

#[test]
fn time_zones_screen() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 15, 12, 0, 0));
    let page = screens::render(ScreenId::TimeZones, &ctx);
    assert!(page.row_contains(0, "UK"));
    assert!(page.row_contains(0, "12:00"));
    assert!(page.row_contains(0, "GMT"));
    assert!(page.row_contains(3, "Japan"));
    assert!(page.row_contains(3, "21:00"));
}

#[test]
fn sidereal_screen_has_both_rows() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 15, 12, 0, 0));
    let page = screens::render(ScreenId::Sidereal, &ctx);
    assert!(page.row_contains(1, "GMST"));
    assert!(page.row_contains(2, "LMST"));
    assert!(page.row_contains(3, "UTC"));
}

#[test]
fn gps_info_screen() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 15, 12, 0, 0));
    let page = screens::render(ScreenId::GpsInfo, &ctx);
    assert!(page.row_contains(1, "Sats  9"));
    assert!(page.row_contains(1, "HDOP  1.1"));
    assert!(page.row_contains(2, "KP20le"));
    assert!(page.row_contains(3, "Serial 9600 baud"));
}

#[test]
fn solar_rise_set_has_all_four_horizons() {
    let settings = Settings::default();
    // Mid-January Helsinki: all four twilights exist.
    let ctx = context(&settings, utc(2024, Month::January, 15, 10, 0, 0));
    let page = screens::render(ScreenId::SolarRiseSet, &ctx);
    assert!(page.row_contains(0, "Sun"));
    assert!(page.row_contains(1, "Civil"));
    assert!(page.row_contains(2, "Naut"));
    assert!(page.row_contains(3, "Astro"));
    // Each row carries an hh:mm rise time.
    for row in 0..4 {
        assert!(page.row_text(row).as_str().contains(':'), "row {row}");
    }
}

#[test]
fn calendar_screen_shows_all_three_calendars() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 0, 0));
    let page = screens::render(ScreenId::IsoHebIslam, &ctx);
    assert!(page.row_contains(0, "ISO 2024-W01-1"));
    assert!(page.row_contains(1, "Day of year"));
    assert!(page.row_contains(2, "Tevet 5784"));
    assert!(page.row_contains(3, "Jumada II 1445"));
}

#[test]
fn easter_screen_2024() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::February, 1, 10, 0, 0));
    let page = screens::render(ScreenId::EasterDates, &ctx);
    assert!(page.row_contains(0, "Easter 2024"));
    assert!(page.row_contains(1, "Mar 31"));
    assert!(page.row_contains(2, "May  5"));
    assert!(page.row_contains(3, "2025"));
    assert!(page.row_contains(3, "Apr 20"));
}

#[test]
fn equinox_screen_2024() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::February, 1, 10, 0, 0));
    let page = screens::render(ScreenId::Equinoxes, &ctx);
    assert!(page.row_contains(0, "Mar equ"));
    assert!(page.row_contains(0, "Mar 20"));
    assert!(page.row_contains(1, "Jun sol"));
    assert!(page.row_contains(2, "Sep equ"));
    assert!(page.row_contains(3, "Dec sol"));
    assert!(page.row_contains(3, "Dec 21"));
}

// ======================================================================
// Radio schedules
// ======================================================================

#[test]
fn ncdxf_slot_rotation() {
    use gps_clock::screens::radio::beacon_on_band;
    assert_eq!(beacon_on_band(0, 0), "4U1UN");
    assert_eq!(beacon_on_band(10, 0), "VE8AT");
    // On the next band each beacon follows one slot later.
    assert_eq!(beacon_on_band(10, 1), "4U1UN");
    assert_eq!(beacon_on_band(0, 1), "YV5B");
    // The cycle wraps every 180 s.
    assert_eq!(beacon_on_band(180, 0), beacon_on_band(0, 0));
    assert_eq!(beacon_on_band(179, 4), beacon_on_band(539, 4));
}

#[test]
fn ncdxf_screen_shows_slot_and_countdown() {
    let settings = Settings::default();
    // unix_timestamp of 1970-01-01 00:00:07 = 7 -> slot 1, 3 s left.
    let ctx = no_fix(&settings, OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(7));
    let page = screens::render(ScreenId::NcdxfBeacons, &ctx);
    assert!(page.row_contains(0, "slot  1/18"));
    assert!(page.row_contains(1, "14 4U1UN"));
    assert!(page.row_contains(3, " 3 s"));
}

#[test]
fn wspr_screen_transmit_and_idle() {
    let settings = Settings::default();
    let tx = no_fix(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::WsprSequence, &tx);
    assert!(page.row_contains(1, "TX"));
    assert!(page.row_contains(2, "next start :22:00"));

    let idle = no_fix(&settings, utc(2024, Month::January, 1, 10, 21, 55));
    let page = screens::render(ScreenId::WsprSequence, &idle);
    assert!(page.row_contains(1, "idle"));
}

// ======================================================================
// Novelty clocks
// ======================================================================

#[test]
fn binary_clock() {
    let settings = Settings::default();
    // Local time is 12:20:30.
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::Binary, &ctx);
    assert!(page.row_contains(1, "01100")); // 12
    assert!(page.row_contains(2, "010100")); // 20
    assert!(page.row_contains(3, "011110")); // 30
}

#[test]
fn bcd_clocks() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::BinaryHorBcd, &ctx);
    assert!(page.row_contains(1, "0001 0010")); // 1, 2
    assert!(page.row_contains(2, "0010 0000")); // 2, 0
    assert!(page.row_contains(3, "0011 0000")); // 3, 0

    let page = screens::render(ScreenId::BinaryVertBcd, &ctx);
    // Weight-1 row: digits 1,2,2,0,3,0 -> bits 1,0,0,0,1,0.
    assert!(page.row_contains(3, "1"));
}

#[test]
fn bar_clock_lengths() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::Bar, &ctx);
    // Blocks fold to '?' in row_text; s = 30 -> 9 blocks, m = 20 -> 6.
    assert!(page.row_contains(2, "??????"));
    assert!(!page.row_contains(2, "???????"));
    assert!(page.row_contains(3, "?????????"));
}

#[test]
fn radix_clocks() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    assert!(screens::render(ScreenId::Hex, &ctx).row_contains(2, "0C:14:1E"));
    assert!(screens::render(ScreenId::Octal, &ctx).row_contains(2, "14:24:36"));
    let both = screens::render(ScreenId::HexOctal, &ctx);
    assert!(both.row_contains(0, "hex 0C:14:1E"));
    assert!(both.row_contains(1, "oct 14:24:36"));
    assert!(both.row_contains(3, "dec 12:20:30"));
}

#[test]
fn roman_clock() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::Roman, &ctx);
    assert!(page.row_contains(1, "XII"));
    assert!(page.row_contains(2, "XX"));
    assert!(page.row_contains(3, "XXX"));

    // Midnight: Rome had no zero.
    let midnight = context(&settings, utc(2024, Month::January, 1, 22, 0, 0));
    let page = screens::render(ScreenId::Roman, &midnight);
    assert!(page.row_contains(2, "-"));
    assert!(page.row_contains(3, "-"));
}

#[test]
fn morse_clock() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::Morse, &ctx);
    assert!(page.row_contains(1, ".---- ..---")); // 12
    assert!(page.row_contains(2, "..--- -----")); // 20
    assert!(page.row_contains(3, "...-- -----")); // 30
}

#[test]
fn word_clock_phrases() {
    let settings = Settings::default();
    // 12:58 local -> "one o'clock".
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 58, 0));
    let page = screens::render(ScreenId::WordClock, &ctx);
    assert!(page.row_contains(0, "it is"));
    assert!(page.row_contains(1, "one"));
    assert!(page.row_contains(2, "o'clock"));

    // 12:52 local -> "ten to one".
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 52, 0));
    let page = screens::render(ScreenId::WordClock, &ctx);
    assert!(page.row_contains(1, "ten"));
    assert!(page.row_contains(2, "to"));
    assert!(page.row_contains(3, "one"));

    // 12:10 local -> "ten past twelve".
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 10, 0));
    let page = screens::render(ScreenId::WordClock, &ctx);
    assert!(page.row_contains(1, "ten"));
    assert!(page.row_contains(2, "past"));
    assert!(page.row_contains(3, "twelve"));
}

#[test]
fn chemical_clock() {
    let settings = Settings::default();
    // 12:20:30 -> magnesium, calcium, zinc.
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 20, 30));
    let page = screens::render(ScreenId::Chemical, &ctx);
    assert!(page.row_contains(1, "Mg magnesium"));
    assert!(page.row_contains(2, "Ca calcium"));
    assert!(page.row_contains(3, "Zn zinc"));

    // Zero has no element.
    let ctx = context(&settings, utc(2024, Month::January, 1, 22, 0, 0));
    let page = screens::render(ScreenId::Chemical, &ctx);
    assert!(page.row_contains(2, "0 --"));
}

#[test]
fn math_quiz_is_deterministic_within_a_bucket() {
    let settings = Settings::default();
    let at = utc(2024, Month::January, 1, 10, 20, 30);
    for id in [
        ScreenId::MathAdd,
        ScreenId::MathSub,
        ScreenId::MathMul,
        ScreenId::MathDiv,
    ] {
        let a = screens::render(id, &context(&settings, at));
        let b = screens::render(id, &context(&settings, at));
        assert_eq!(a, b, "{id:?}");
    }
    let page = screens::render(ScreenId::MathAdd, &context(&settings, at));
    assert!(page.row_contains(0, "addition quiz"));
    assert!(page.row_contains(1, "+"));
}

// ======================================================================
// Dispatch
// ======================================================================

#[test]
fn every_screen_renders_with_and_without_a_fix() {
    let settings = Settings::default();
    let at = utc(2024, Month::June, 21, 14, 30, 45);
    for &id in ALL_SCREENS {
        let _ = screens::render(id, &context(&settings, at));
        let _ = screens::render(id, &no_fix(&settings, at));
    }
}

#[test]
fn demo_mode_walks_the_screen_pool_deterministically() {
    let settings = Settings::default();
    let at = utc(2024, Month::June, 21, 14, 30, 45);
    let ctx = context(&settings, at);
    let dwell = i64::from(settings.dwell_secs);
    let pool = (ALL_SCREENS.len() - 1) as i64;
    let index = (at.unix_timestamp() / dwell).rem_euclid(pool) as usize;
    assert_eq!(
        screens::render(ScreenId::DemoMode, &ctx),
        screens::render(ALL_SCREENS[index], &ctx)
    );
}

#[test]
fn subsets_are_nonempty_and_within_the_full_set() {
    use gps_clock::settings::ScreenSubset;
    assert_eq!(screens::subset_screens(ScreenSubset::All).len(), 34);
    for subset in ScreenSubset::ALL {
        let list = screens::subset_screens(subset);
        assert!(!list.is_empty());
        for id in list {
            assert!(ALL_SCREENS.contains(id), "{id:?} missing from full set");
        }
    }
}

#[test]
fn internal_status_screen() {
    let settings = Settings::default();
    let ctx = context(&settings, utc(2024, Month::January, 1, 10, 0, 0));
    let page = screens::render(ScreenId::InternalStatus, &ctx);
    assert!(page.row_contains(0, "gps-clock"));
    assert!(page.row_contains(1, "Zone: UTC"));
    assert!(page.row_contains(3, "fix:yes"));
}
