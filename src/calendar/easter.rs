//! Easter Sunday by the Gauss computus, for both the Gregorian (western)
//! and Julian (orthodox) reckonings.

use time::{Date, Duration, Month};

use crate::Result;

// Calendar-specific computus constants, valid 1900..=2099.
const GREGORIAN_M: i32 = 24;
const GREGORIAN_N: i32 = 5;
const JULIAN_M: i32 = 15;
const JULIAN_N: i32 = 6;

/// Days to add to a Julian date to express it in the Gregorian calendar,
/// 1900-03-14 through 2100-02-28.
const JULIAN_TO_GREGORIAN_DAYS: i64 = 13;

fn computus(year: i32, m: i32, n: i32) -> i64 {
    let a = year % 19;
    let b = year % 4;
    let c = year % 7;
    let d = (19 * a + m) % 30;
    let e = (2 * b + 4 * c + 6 * d + n) % 7;

    // Offset from March 22, with the two classical exceptions.
    if d == 29 && e == 6 {
        // April 19 instead of April 26
        28
    } else if d == 28 && e == 6 && a > 10 {
        // April 18 instead of April 25
        27
    } else {
        i64::from(d + e)
    }
}

fn march_base(year: i32) -> Result<Date> {
    Ok(Date::from_calendar_date(year, Month::March, 22)?)
}

/// Western Easter Sunday for a Gregorian year, 1900..=2099.
pub fn gregorian(year: i32) -> Result<Date> {
    Ok(march_base(year)? + Duration::days(computus(year, GREGORIAN_M, GREGORIAN_N)))
}

/// Orthodox (Julian-reckoned) Easter Sunday expressed as a Gregorian date,
/// 1900..=2099.
pub fn julian_in_gregorian(year: i32) -> Result<Date> {
    let julian_offset = computus(year, JULIAN_M, JULIAN_N);
    Ok(march_base(year)? + Duration::days(julian_offset + JULIAN_TO_GREGORIAN_DAYS))
}
