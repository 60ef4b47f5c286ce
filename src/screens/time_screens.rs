//! Time, position, and status screens.

use core::fmt::Write as _;

use time::{OffsetDateTime, Time};

use super::{Context, Page};
use crate::astro;
use crate::coords::{self, LatLon};
use crate::zones;

/// Write `hh:mm:ss`.
pub(super) fn write_hms(page: &mut Page, row: usize, col: usize, time: Time) {
    let mut w = page.writer(row, col);
    let _ = write!(
        w,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
}

/// Write `hh:mm`.
pub(super) fn write_hm(page: &mut Page, row: usize, col: usize, hour: u8, minute: u8) {
    let mut w = page.writer(row, col);
    let _ = write!(w, "{hour:02}:{minute:02}");
}

/// Write a position as `60.17N  24.94E`.
pub(super) fn write_position(page: &mut Page, row: usize, col: usize, pos: LatLon) {
    let mut w = page.writer(row, col);
    let ns = if pos.lat < 0.0 { 'S' } else { 'N' };
    let ew = if pos.lon < 0.0 { 'W' } else { 'E' };
    let _ = write!(w, "{:5.2}{} {:6.2}{}", pos.lat.abs(), ns, pos.lon.abs(), ew);
}

pub(super) fn waiting_for_fix(page: &mut Page, row: usize) {
    page.center(row, "waiting for GPS fix");
}

/// Main screen: weekday, local date and time, zone, UTC.
pub(super) fn local_utc(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.center(0, ctx.settings.language.day_name(ctx.local.weekday()));

    let date_text = ctx.settings.date_format.format(ctx.local.date());
    page.write_at(1, 0, date_text.as_str());
    write_hms(&mut page, 1, 12, ctx.local.time());

    if clock_is_unset(ctx.utc) {
        page.write_at(2, 0, "no GPS time yet");
    } else {
        page.write_at(2, 0, ctx.zone_abbrev);
    }

    page.write_at(3, 0, "UTC");
    write_hms(&mut page, 3, 12, ctx.utc.time());
    page
}

/// UTC with the Maidenhead locator of the current fix.
pub(super) fn utc_locator(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.write_at(0, 0, "UTC");
    write_hms(&mut page, 0, 12, ctx.utc.time());
    let date_text = ctx.settings.date_format.format(ctx.utc.date());
    page.write_at(1, 0, date_text.as_str());

    match ctx.position() {
        Some(pos) => {
            let locator = coords::maidenhead(pos);
            let mut w = page.writer(2, 0);
            let _ = write!(w, "Locator: {locator}");
            write_position(&mut page, 3, 0, pos);
        }
        None => waiting_for_fix(&mut page, 2),
    }
    page
}

/// Wall time in a sample of other zones.
pub(super) fn time_zones(ctx: &Context<'_>) -> Page {
    // UK, central Europe, US east coast, Japan.
    const SHOWN: [usize; 4] = [1, 2, 15, 7];

    let mut page = Page::new();
    for (row, &index) in SHOWN.iter().enumerate() {
        let zone = zones::zone(index);
        let there = ctx.utc.to_offset(zone.utc_offset(ctx.utc));
        let mut w = page.writer(row, 0);
        let _ = write!(
            w,
            "{:<9}{:02}:{:02} {}",
            zone.name,
            there.hour(),
            there.minute(),
            zone.abbrev(ctx.utc)
        );
    }
    page
}

/// UTC plus raw position and altitude.
pub(super) fn utc_position(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.write_at(0, 0, "UTC");
    write_hms(&mut page, 0, 12, ctx.utc.time());

    match ctx.fix {
        Some(fix) => {
            write_position(&mut page, 1, 0, fix.position);
            let mut w = page.writer(2, 0);
            let _ = write!(w, "Alt {:6.0} m", fix.altitude_m);
            let mut w = page.writer(3, 0);
            let _ = write!(w, "Sats {:2}  HDOP {:4.1}", fix.satellites, fix.hdop);
        }
        None => waiting_for_fix(&mut page, 2),
    }
    page
}

/// Greenwich and local mean sidereal time.
pub(super) fn sidereal(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.center(0, "Sidereal time");

    let gmst = astro::gmst_degrees(ctx.utc);
    write_sidereal_row(&mut page, 1, "GMST", gmst);

    match ctx.position() {
        Some(pos) => {
            let lmst = astro::lst_degrees(ctx.utc, pos.lon);
            write_sidereal_row(&mut page, 2, "LMST", lmst);
        }
        None => waiting_for_fix(&mut page, 2),
    }
    write_hms(&mut page, 3, 0, ctx.utc.time());
    page.write_at(3, 9, "UTC");
    page
}

fn write_sidereal_row(page: &mut Page, row: usize, label: &str, degrees: f64) {
    let total_seconds = (degrees / 15.0 * 3600.0) as u32;
    let mut w = page.writer(row, 0);
    let _ = write!(
        w,
        "{label} {:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60
    );
}

/// Receiver health: satellites, HDOP, altitude, serial rate.
pub(super) fn gps_info(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.center(0, "GPS receiver");
    match ctx.fix {
        Some(fix) => {
            let mut w = page.writer(1, 0);
            let _ = write!(w, "Sats {:2}  HDOP {:4.1}", fix.satellites, fix.hdop);
            let mut w = page.writer(2, 0);
            let _ = write!(
                w,
                "Alt {:5.0} m  {}",
                fix.altitude_m,
                coords::maidenhead(fix.position)
            );
        }
        None => waiting_for_fix(&mut page, 1),
    }
    let mut w = page.writer(3, 0);
    let _ = write!(w, "Serial {} baud", ctx.settings.baud());
    page
}

/// Firmware build and active configuration.
pub(super) fn internal_status(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    let mut w = page.writer(0, 0);
    let _ = write!(w, "gps-clock {}", env!("CARGO_PKG_VERSION"));

    let mut w = page.writer(1, 0);
    let _ = write!(w, "Zone: {}", ctx.settings.zone().name);
    let mut w = page.writer(2, 0);
    let _ = write!(w, "Set:  {}", ctx.settings.subset.label());
    let mut w = page.writer(3, 0);
    let _ = write!(
        w,
        "UTC{:+}  fix:{}",
        ctx.offset_minutes() / 60,
        if ctx.fix.is_some() { "yes" } else { "no" }
    );
    page
}

/// Epoch display guard: screens that show absolute time render normally
/// even before the first fix (the clock reports the Unix epoch), so this
/// helper lets status rows flag the condition.
pub(super) fn clock_is_unset(utc: OffsetDateTime) -> bool {
    utc.year() <= 1970
}
