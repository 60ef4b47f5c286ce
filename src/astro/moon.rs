//! Lunar ephemeris with the principal perturbation terms, topocentric
//! parallax, phase, and rise/set ordering across day boundaries.

use heapless::Vec;
use libm::sqrt;
use time::{Date, OffsetDateTime};

use super::riseset::{self, Crossing, DayPath, HORIZON_ACTUAL};
use super::{
    acosd, asind, atan2d, cosd, eccentric_anomaly, ecliptic_to_equatorial, epoch_day,
    local_instant, lst_degrees, rev, sind, sun, to_horizontal, Equatorial, Horizontal,
};
use crate::coords::LatLon;

/// Mean length of the synodic month, days.
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Moon's position in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoonSky {
    /// Topocentric altitude/azimuth (parallax applied to the altitude).
    pub horizontal: Horizontal,
    pub equatorial: Equatorial,
    /// Geocentric distance in Earth radii.
    pub distance_er: f64,
}

/// Phase of the moon at an instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Phase {
    /// Days since new moon, 0..29.53.
    pub age_days: f64,
    /// Illuminated fraction of the disc, 0..1.
    pub illuminated: f64,
    pub waxing: bool,
}

/// Geocentric ecliptic longitude, latitude (degrees) and distance (Earth
/// radii), with the major solar perturbations applied.
#[must_use]
pub fn ecliptic(epoch_day: f64) -> (f64, f64, f64) {
    let n = rev(125.1228 - 0.052_953_808_3 * epoch_day);
    let i = 5.1454;
    let w = rev(318.0634 + 0.164_357_322_3 * epoch_day);
    let a = 60.2666;
    let e = 0.054900;
    let m = rev(115.3654 + 13.064_992_950_9 * epoch_day);

    let ea = eccentric_anomaly(m, e);
    let xv = a * (cosd(ea) - e);
    let yv = a * sqrt(1.0 - e * e) * sind(ea);
    let v = atan2d(yv, xv);
    let r = sqrt(xv * xv + yv * yv);

    let u = v + w; // argument of latitude
    let x = r * (cosd(n) * cosd(u) - sind(n) * sind(u) * cosd(i));
    let y = r * (sind(n) * cosd(u) + cosd(n) * sind(u) * cosd(i));
    let z = r * sind(u) * sind(i);

    let mut lon = rev(atan2d(y, x));
    let mut lat = asind(z / r);
    let mut dist = r;

    // Perturbation arguments.
    let ms = rev(356.0470 + 0.985_600_258_5 * epoch_day); // sun mean anomaly
    let ws = 282.9404 + 4.70935e-5 * epoch_day;
    let ls = rev(ms + ws); // sun mean longitude
    let lm = rev(m + w + n); // moon mean longitude
    let d = rev(lm - ls); // mean elongation
    let f = rev(lm - n); // argument of latitude

    lon += -1.274 * sind(m - 2.0 * d)
        + 0.658 * sind(2.0 * d)
        - 0.186 * sind(ms)
        - 0.059 * sind(2.0 * m - 2.0 * d)
        - 0.057 * sind(m - 2.0 * d + ms)
        + 0.053 * sind(m + 2.0 * d)
        + 0.046 * sind(2.0 * d - ms)
        + 0.041 * sind(m - ms)
        - 0.035 * sind(d)
        - 0.031 * sind(m + ms)
        - 0.015 * sind(2.0 * f - 2.0 * d)
        + 0.011 * sind(m - 4.0 * d);

    lat += -0.173 * sind(f - 2.0 * d)
        - 0.055 * sind(m - f - 2.0 * d)
        - 0.046 * sind(m + f - 2.0 * d)
        + 0.033 * sind(f + 2.0 * d)
        + 0.017 * sind(2.0 * m + f);

    dist += -0.58 * cosd(m - 2.0 * d) - 0.46 * cosd(2.0 * d);

    (rev(lon), lat, dist)
}

/// Moon's sky position for an observer at a UTC instant.
#[must_use]
pub fn sky(utc: OffsetDateTime, observer: LatLon) -> MoonSky {
    let day = epoch_day(utc);
    let (lon, lat, dist) = ecliptic(day);

    let x = dist * cosd(lon) * cosd(lat);
    let y = dist * sind(lon) * cosd(lat);
    let z = dist * sind(lat);

    let equatorial = ecliptic_to_equatorial(x, y, z, day);
    let geocentric = to_horizontal(equatorial, lst_degrees(utc, observer.lon), observer.lat);

    // Topocentric parallax flattens the altitude by up to about a degree.
    let parallax = asind(1.0 / dist);
    let horizontal = Horizontal {
        altitude: geocentric.altitude - parallax * cosd(geocentric.altitude),
        azimuth: geocentric.azimuth,
    };

    MoonSky {
        horizontal,
        equatorial,
        distance_er: dist,
    }
}

/// Phase from the sun-moon elongation.
#[must_use]
pub fn phase(utc: OffsetDateTime) -> Phase {
    let day = epoch_day(utc);
    let (sun_lon, _) = sun::ecliptic(day);
    let (moon_lon, moon_lat, _) = ecliptic(day);

    let age_days = rev(moon_lon - sun_lon) / 360.0 * SYNODIC_MONTH;
    let elongation = acosd(cosd(moon_lon - sun_lon) * cosd(moon_lat));
    Phase {
        age_days,
        illuminated: (1.0 - cosd(elongation)) / 2.0,
        waxing: age_days < SYNODIC_MONTH / 2.0,
    }
}

/// Moonrise and moonset over one local day (topocentric altitude).
#[must_use]
pub fn day_path(date: Date, observer: LatLon, offset_minutes: i32) -> DayPath {
    riseset::scan_day(HORIZON_ACTUAL, |hours| {
        sky(local_instant(date, hours, offset_minutes), observer).horizontal
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Rise,
    Set,
}

/// An upcoming moon event, possibly carried over from tomorrow's scan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NextEvent {
    pub kind: EventKind,
    pub crossing: Crossing,
    /// True when today's event already passed and tomorrow's is shown.
    pub tomorrow: bool,
}

/// The next rise and next set seen from `now_minutes` past local midnight,
/// in the order they will occur. Empty during polar day/night.
#[must_use]
pub fn next_events(
    date: Date,
    now_minutes: u16,
    observer: LatLon,
    offset_minutes: i32,
) -> Vec<NextEvent, 2> {
    let today = day_path(date, observer, offset_minutes);
    let tomorrow = date.next_day().map(|d| day_path(d, observer, offset_minutes));

    let mut events: Vec<NextEvent, 2> = Vec::new();
    for kind in [EventKind::Rise, EventKind::Set] {
        let pick = |path: &DayPath| match kind {
            EventKind::Rise => path.rise(),
            EventKind::Set => path.set(),
        };
        let next = match pick(&today) {
            Some(crossing) if crossing.minutes >= now_minutes => Some(NextEvent {
                kind,
                crossing,
                tomorrow: false,
            }),
            _ => tomorrow.as_ref().and_then(|path| {
                pick(path).map(|crossing| NextEvent {
                    kind,
                    crossing,
                    tomorrow: true,
                })
            }),
        };
        if let Some(event) = next {
            let _ = events.push(event);
        }
    }

    events.sort_unstable_by_key(|e| (e.tomorrow, e.crossing.minutes));
    events
}
