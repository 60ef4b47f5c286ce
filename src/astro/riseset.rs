//! Generic rise/set search: scan an altitude function across one local day
//! and refine the horizon crossings by bisection.
//!
//! This is shared by the sun (at four horizon definitions), the moon, and the
//! planet screens. The altitude function is sampled every 15 minutes; each
//! sign change of `altitude - horizon` is refined to well under a minute.

use super::Horizontal;

/// Horizon angle for true rise/set: 34' refraction plus the solar
/// semidiameter of 16'.
pub const HORIZON_ACTUAL: f64 = -0.833;
/// Civil twilight.
pub const HORIZON_CIVIL: f64 = -6.0;
/// Nautical twilight.
pub const HORIZON_NAUTICAL: f64 = -12.0;
/// Astronomical twilight.
pub const HORIZON_ASTRONOMICAL: f64 = -18.0;

const SAMPLES_PER_DAY: usize = 96;
const SAMPLE_HOURS: f64 = 24.0 / SAMPLES_PER_DAY as f64;
const BISECTION_STEPS: usize = 12;

/// One horizon crossing within the scanned day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crossing {
    /// Minutes past local midnight, 0..1440.
    pub minutes: u16,
    /// Azimuth at the crossing, degrees from north.
    pub azimuth: f64,
}

impl Crossing {
    #[must_use]
    pub const fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    #[must_use]
    pub const fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }
}

/// What the body does relative to the horizon over one local day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DayPath {
    /// The body crosses the horizon; a day can lack one of the two
    /// crossings (common for the moon, whose period exceeds 24 h).
    Crossings {
        rise: Option<Crossing>,
        set: Option<Crossing>,
    },
    /// Above the horizon all day (polar day).
    AlwaysUp,
    /// Below the horizon all day (polar night).
    AlwaysDown,
}

impl DayPath {
    #[must_use]
    pub const fn rise(&self) -> Option<Crossing> {
        match self {
            Self::Crossings { rise, .. } => *rise,
            _ => None,
        }
    }

    #[must_use]
    pub const fn set(&self) -> Option<Crossing> {
        match self {
            Self::Crossings { set, .. } => *set,
            _ => None,
        }
    }
}

/// Scan one local day (hours 0..=24) of the given altitude function and
/// report its crossings of `horizon` in time order.
pub fn scan_day<F>(horizon: f64, mut sky_position: F) -> DayPath
where
    F: FnMut(f64) -> Horizontal,
{
    let mut rise: Option<Crossing> = None;
    let mut set: Option<Crossing> = None;
    let mut any_above = false;

    let mut prev = sky_position(0.0);
    any_above |= prev.altitude > horizon;

    for step in 1..=SAMPLES_PER_DAY {
        let hours = step as f64 * SAMPLE_HOURS;
        let here = sky_position(hours);
        any_above |= here.altitude > horizon;

        let was_up = prev.altitude > horizon;
        let is_up = here.altitude > horizon;
        if was_up != is_up {
            let crossing = refine(horizon, hours - SAMPLE_HOURS, hours, &mut sky_position);
            if is_up {
                rise.get_or_insert(crossing);
            } else {
                set.get_or_insert(crossing);
            }
        }
        prev = here;
    }

    match (rise, set) {
        (None, None) if any_above => DayPath::AlwaysUp,
        (None, None) => DayPath::AlwaysDown,
        (rise, set) => DayPath::Crossings { rise, set },
    }
}

fn refine<F>(horizon: f64, mut lo: f64, mut hi: f64, sky_position: &mut F) -> Crossing
where
    F: FnMut(f64) -> Horizontal,
{
    let lo_up = sky_position(lo).altitude > horizon;
    for _ in 0..BISECTION_STEPS {
        let mid = (lo + hi) / 2.0;
        if (sky_position(mid).altitude > horizon) == lo_up {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let at = (lo + hi) / 2.0;
    let minutes = ((at * 60.0) + 0.5) as u16;
    Crossing {
        minutes: minutes.min(1439),
        azimuth: sky_position(at).azimuth,
    }
}
