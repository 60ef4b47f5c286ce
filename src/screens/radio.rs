//! Amateur-radio schedule screens: the NCDXF/IARU beacon network and the
//! WSPR transmission windows.

use core::fmt::Write as _;

use super::{Context, Page};

/// The 18 beacons of the NCDXF/IARU network, in slot order.
pub const BEACONS: [&str; 18] = [
    "4U1UN", "VE8AT", "W6WX", "KH6RS", "ZL6B", "VK6RBP", "JA2IGY", "RR9O", "VR2B", "4S7B",
    "ZS6DN", "5Z4B", "4X6TU", "OH2B", "CS3B", "LU4AA", "OA4B", "YV5B",
];

/// Beacon band frequencies, MHz (20 m through 10 m).
pub const BAND_MHZ: [&str; 5] = ["14.100", "18.110", "21.150", "24.930", "28.200"];

/// Cycle of 18 ten-second slots across all five bands.
const CYCLE_SECONDS: i64 = 180;
const SLOT_SECONDS: i64 = 10;

/// WSPR: even-minute starts, 110.6 s transmissions.
const WSPR_CYCLE_SECONDS: f64 = 120.0;
const WSPR_TX_SECONDS: f64 = 110.6;

/// Beacon transmitting on a band (0 = 20 m .. 4 = 10 m) at a second within
/// the 180 s cycle.
#[must_use]
pub fn beacon_on_band(cycle_second: i64, band: usize) -> &'static str {
    let slot = (cycle_second.rem_euclid(CYCLE_SECONDS)) / SLOT_SECONDS;
    let index = (slot - band as i64).rem_euclid(BEACONS.len() as i64);
    BEACONS[index as usize]
}

pub(super) fn ncdxf_beacons(ctx: &Context<'_>) -> Page {
    let cycle_second = ctx.utc.unix_timestamp().rem_euclid(CYCLE_SECONDS);

    let mut page = Page::new();
    let mut w = page.writer(0, 0);
    let _ = write!(
        w,
        "NCDXF    slot {:2}/18",
        cycle_second / SLOT_SECONDS + 1
    );

    // Two bands per row, the highest band sharing the slot countdown.
    let calls: [&str; 5] = core::array::from_fn(|band| beacon_on_band(cycle_second, band));
    let mut w = page.writer(1, 0);
    let _ = write!(w, "14 {:<6} 18 {:<6}", calls[0], calls[1]);
    let mut w = page.writer(2, 0);
    let _ = write!(w, "21 {:<6} 24 {:<6}", calls[2], calls[3]);
    let mut w = page.writer(3, 0);
    let _ = write!(
        w,
        "28 {:<6}    {:2} s",
        calls[4],
        SLOT_SECONDS - cycle_second % SLOT_SECONDS
    );
    page
}

pub(super) fn wspr_sequence(ctx: &Context<'_>) -> Page {
    let second_of_cycle =
        f64::from(u32::from(ctx.utc.minute() % 2) * 60 + u32::from(ctx.utc.second()));

    let mut page = Page::new();
    page.write_at(0, 0, "WSPR  2 min cycle");
    let mut w = page.writer(1, 0);
    if second_of_cycle < WSPR_TX_SECONDS {
        let _ = write!(w, "TX {:5.1} s left", WSPR_TX_SECONDS - second_of_cycle);
    } else {
        let _ = write!(
            w,
            "idle, next in {:2.0} s",
            WSPR_CYCLE_SECONDS - second_of_cycle
        );
    }

    let next_start_minute = (ctx.utc.minute() + 2 - ctx.utc.minute() % 2) % 60;
    let mut w = page.writer(2, 0);
    let _ = write!(w, "next start :{next_start_minute:02}:00");

    let mut w = page.writer(3, 0);
    let _ = write!(
        w,
        "UTC {:02}:{:02}:{:02}",
        ctx.utc.hour(),
        ctx.utc.minute(),
        ctx.utc.second()
    );
    page
}
