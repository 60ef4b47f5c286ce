//! Calendar arithmetic: Easter, the Hebrew and Islamic calendars, and the
//! equinox/solstice instants.
//!
//! The Hebrew and Islamic converters work in Rata Die day numbers (days since
//! Gregorian 0001-01-01 = day 1), the frame the Dershowitz-Reingold
//! calendrical algorithms are stated in.

pub mod easter;
pub mod equinox;
pub mod hebrew;
pub mod islamic;

use time::Date;

use crate::Result;

/// Offset between a Julian day number and the same day's Rata Die number.
const JDN_TO_RD: i64 = 1_721_425;

/// Rata Die day number of a Gregorian date.
#[must_use]
pub fn rata_die(date: Date) -> i64 {
    i64::from(date.to_julian_day()) - JDN_TO_RD
}

/// Gregorian date of a Rata Die day number.
pub fn date_from_rata_die(rd: i64) -> Result<Date> {
    let jdn = i32::try_from(rd + JDN_TO_RD).map_err(|_| crate::Error::DateOutOfRange)?;
    Ok(Date::from_julian_day(jdn)?)
}
