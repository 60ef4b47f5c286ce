//! Low-precision solar ephemeris: position in the sky, rise/set at the four
//! standard horizon definitions, and solar noon.

use libm::sqrt;
use time::{Date, OffsetDateTime};

use super::riseset::{
    self, DayPath, HORIZON_ACTUAL, HORIZON_ASTRONOMICAL, HORIZON_CIVIL, HORIZON_NAUTICAL,
};
use super::{
    atan2d, cosd, eccentric_anomaly, ecliptic_to_equatorial, epoch_day, local_instant,
    lst_degrees, rev, sind, to_horizontal, Equatorial, Horizontal,
};
use crate::coords::LatLon;

/// Which horizon a sun rise/set query refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Twilight {
    /// Upper limb touches the visible horizon.
    Actual,
    Civil,
    Nautical,
    Astronomical,
}

impl Twilight {
    #[must_use]
    pub const fn horizon(self) -> f64 {
        match self {
            Self::Actual => HORIZON_ACTUAL,
            Self::Civil => HORIZON_CIVIL,
            Self::Nautical => HORIZON_NAUTICAL,
            Self::Astronomical => HORIZON_ASTRONOMICAL,
        }
    }
}

/// Sun's ecliptic longitude (degrees) and distance (AU).
#[must_use]
pub fn ecliptic(epoch_day: f64) -> (f64, f64) {
    let w = 282.9404 + 4.70935e-5 * epoch_day;
    let e = 0.016709 - 1.151e-9 * epoch_day;
    let m = rev(356.0470 + 0.985_600_258_5 * epoch_day);

    let ea = eccentric_anomaly(m, e);
    let xv = cosd(ea) - e;
    let yv = sqrt(1.0 - e * e) * sind(ea);

    let true_anomaly = atan2d(yv, xv);
    let r = sqrt(xv * xv + yv * yv);
    (rev(true_anomaly + w), r)
}

/// Sun's equatorial position for a UTC instant.
#[must_use]
pub fn equatorial(utc: OffsetDateTime) -> Equatorial {
    let d = epoch_day(utc);
    let (lon, r) = ecliptic(d);
    ecliptic_to_equatorial(r * cosd(lon), r * sind(lon), 0.0, d)
}

/// Sun's altitude and azimuth for an observer at a UTC instant.
#[must_use]
pub fn horizontal(utc: OffsetDateTime, observer: LatLon) -> Horizontal {
    to_horizontal(equatorial(utc), lst_degrees(utc, observer.lon), observer.lat)
}

/// Rise and set of the sun (or start/end of a twilight) over one local day.
#[must_use]
pub fn day_path(
    date: Date,
    observer: LatLon,
    offset_minutes: i32,
    twilight: Twilight,
) -> DayPath {
    riseset::scan_day(twilight.horizon(), |hours| {
        horizontal(local_instant(date, hours, offset_minutes), observer)
    })
}

/// Local solar noon: minutes past local midnight and the elevation reached.
#[must_use]
pub fn solar_noon(date: Date, observer: LatLon, offset_minutes: i32) -> (u16, f64) {
    // Start from clock noon and pull the hour angle to zero; the sun's RA
    // moves about a degree a day so two corrections are plenty.
    let mut hours = 12.0;
    for _ in 0..3 {
        let utc = local_instant(date, hours, offset_minutes);
        let eq = equatorial(utc);
        let mut diff = rev(eq.ra - lst_degrees(utc, observer.lon));
        if diff > 180.0 {
            diff -= 360.0;
        }
        hours += diff / 15.0;
    }
    let hours = hours.clamp(0.0, 23.99);
    let elevation = horizontal(local_instant(date, hours, offset_minutes), observer).altitude;
    ((hours * 60.0 + 0.5) as u16, elevation)
}
