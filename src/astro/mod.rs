//! Low-precision astronomical ephemerides (Schlyter's formulas) and the
//! shared coordinate frames they produce.
//!
//! Accuracy targets are arc-minutes, which is far below what a 20x4 character
//! display can show. All angles cross module boundaries in degrees.

pub mod moon;
pub mod planets;
pub mod riseset;
pub mod sun;

use libm::{acos, asin, atan2, cos, sin, sqrt, tan};
use time::OffsetDateTime;

/// Position on the celestial sphere, degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Equatorial {
    /// Right ascension, 0..360.
    pub ra: f64,
    /// Declination, -90..90.
    pub dec: f64,
}

/// Position in the observer's sky, degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Horizontal {
    /// Altitude above the horizon, -90..90.
    pub altitude: f64,
    /// Azimuth measured from north through east, 0..360.
    pub azimuth: f64,
}

// ======================================================================
// Degree-based trig helpers
// ======================================================================

pub(crate) fn sind(deg: f64) -> f64 {
    sin(deg.to_radians())
}

pub(crate) fn cosd(deg: f64) -> f64 {
    cos(deg.to_radians())
}

pub(crate) fn tand(deg: f64) -> f64 {
    tan(deg.to_radians())
}

pub(crate) fn asind(x: f64) -> f64 {
    asin(x.clamp(-1.0, 1.0)).to_degrees()
}

pub(crate) fn acosd(x: f64) -> f64 {
    acos(x.clamp(-1.0, 1.0)).to_degrees()
}

pub(crate) fn atan2d(y: f64, x: f64) -> f64 {
    atan2(y, x).to_degrees()
}

/// Normalize an angle to 0..360 degrees.
pub(crate) fn rev(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

pub(crate) fn hypot3(x: f64, y: f64, z: f64) -> f64 {
    sqrt(x * x + y * y + z * z)
}

// ======================================================================
// Time scales
// ======================================================================

/// Julian day number (fractional) for an instant. The calendar components
/// are read after normalizing to UTC, so instants carrying a zone offset
/// (as the rise/set scan produces) map to the correct physical time.
#[must_use]
pub fn julian_day(instant: OffsetDateTime) -> f64 {
    let utc = instant.to_offset(time::UtcOffset::UTC);
    let noon_jdn = f64::from(utc.date().to_julian_day());
    let seconds = f64::from(utc.time().hour()) * 3600.0
        + f64::from(utc.time().minute()) * 60.0
        + f64::from(utc.time().second());
    noon_jdn - 0.5 + seconds / 86400.0
}

/// Days since 2000 Jan 0.0 TT, the epoch the orbital-element polynomials
/// are referred to.
#[must_use]
pub fn epoch_day(utc: OffsetDateTime) -> f64 {
    julian_day(utc) - 2_451_543.5
}

/// Mean obliquity of the ecliptic, degrees.
#[must_use]
pub fn obliquity(epoch_day: f64) -> f64 {
    23.4393 - 3.563e-7 * epoch_day
}

/// Greenwich mean sidereal time, degrees.
#[must_use]
pub fn gmst_degrees(utc: OffsetDateTime) -> f64 {
    rev(280.460_618_37 + 360.985_647_366_29 * (julian_day(utc) - 2_451_545.0))
}

/// Local mean sidereal time, degrees (east longitude positive).
#[must_use]
pub fn lst_degrees(utc: OffsetDateTime, lon: f64) -> f64 {
    rev(gmst_degrees(utc) + lon)
}

// ======================================================================
// Frame conversions
// ======================================================================

/// Rotate ecliptic rectangular coordinates into the equatorial frame and
/// express them as spherical coordinates.
pub(crate) fn ecliptic_to_equatorial(x: f64, y: f64, z: f64, epoch_day: f64) -> Equatorial {
    let ecl = obliquity(epoch_day);
    let xe = x;
    let ye = y * cosd(ecl) - z * sind(ecl);
    let ze = y * sind(ecl) + z * cosd(ecl);
    Equatorial {
        ra: rev(atan2d(ye, xe)),
        dec: atan2d(ze, sqrt(xe * xe + ye * ye)),
    }
}

/// Convert an equatorial position to the observer's horizontal frame.
#[must_use]
pub fn to_horizontal(eq: Equatorial, lst_deg: f64, lat: f64) -> Horizontal {
    let hour_angle = rev(lst_deg - eq.ra);

    let x = cosd(hour_angle) * cosd(eq.dec);
    let y = sind(hour_angle) * cosd(eq.dec);
    let z = sind(eq.dec);

    let x_hor = x * sind(lat) - z * cosd(lat);
    let z_hor = x * cosd(lat) + z * sind(lat);

    Horizontal {
        altitude: asind(z_hor),
        // atan2 of this frame measures from south; shift to north-referenced.
        azimuth: rev(atan2d(y, x_hor) + 180.0),
    }
}

/// UTC instant for a fractional local hour (0..=24) of a calendar date in a
/// zone `offset_minutes` east of Greenwich.
pub(crate) fn local_instant(
    date: time::Date,
    hours: f64,
    offset_minutes: i32,
) -> OffsetDateTime {
    let offset = time::UtcOffset::from_whole_seconds(offset_minutes * 60)
        .unwrap_or(time::UtcOffset::UTC);
    date.midnight().assume_offset(offset) + time::Duration::seconds((hours * 3600.0) as i64)
}

/// Solve Kepler's equation for the eccentric anomaly, degrees.
pub(crate) fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = rev(mean_anomaly);
    let mut e = m + eccentricity.to_degrees() * sind(m) * (1.0 + eccentricity * cosd(m));
    // Newton iteration; converges in 2-3 steps for e < 0.1.
    for _ in 0..10 {
        let delta = (e - eccentricity.to_degrees() * sind(e) - m) / (1.0 - eccentricity * cosd(e));
        e -= delta;
        if delta.abs() < 1e-6 {
            break;
        }
    }
    e
}
