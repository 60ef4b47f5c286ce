//! Snapshot of the most recent GPS fix, shared between the GPS device and the
//! pure screen renderers.

use crate::coords::LatLon;

/// Position and quality data from the latest valid GPS fix.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "pico1", derive(defmt::Format))]
pub struct GpsSnapshot {
    /// Observer position, degrees (north/east positive).
    pub position: LatLon,
    /// Altitude above mean sea level, meters.
    pub altitude_m: f32,
    /// Satellites used in the fix.
    pub satellites: u8,
    /// Horizontal dilution of precision.
    pub hdop: f32,
}

impl GpsSnapshot {
    /// A snapshot with no position information (pre-fix placeholder).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            position: LatLon { lat: 0.0, lon: 0.0 },
            altitude_m: 0.0,
            satellites: 0,
            hdop: 0.0,
        }
    }
}

/// A fix older than this (seconds) no longer represents the receiver's
/// position; screens fall back to the waiting-for-fix row.
pub const FIX_STALE_SECS: i64 = 120;

/// Latest fix plus the Unix second it arrived, so readers can discard it
/// once the receiver goes quiet.
#[derive(Debug, Default)]
pub struct FixTracker {
    latest: Option<(GpsSnapshot, i64)>,
}

impl FixTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { latest: None }
    }

    /// Record a fix received at Unix second `at_unix`.
    pub fn update(&mut self, snapshot: GpsSnapshot, at_unix: i64) {
        self.latest = Some((snapshot, at_unix));
    }

    /// The latest fix, or `None` if there is none or it has gone stale.
    #[must_use]
    pub fn current(&self, now_unix: i64) -> Option<GpsSnapshot> {
        let (snapshot, at_unix) = self.latest?;
        (now_unix.saturating_sub(at_unix) <= FIX_STALE_SECS).then_some(snapshot)
    }
}
