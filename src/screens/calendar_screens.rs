//! Calendar conversion screens.

use core::fmt::Write as _;

use time::{Date, Month};

use super::{Context, Page};
use crate::calendar::{easter, equinox, hebrew, islamic};

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn write_short_date(page: &mut Page, row: usize, col: usize, date: Date) {
    let mut w = page.writer(row, col);
    let _ = write!(w, "{} {:2}", month_abbrev(date.month()), date.day());
}

/// ISO week date, day of year, and the Hebrew and Islamic dates.
pub(super) fn iso_heb_islam(ctx: &Context<'_>) -> Page {
    let date = ctx.local.date();
    let mut page = Page::new();

    let (iso_year, iso_week, weekday) = date.to_iso_week_date();
    let mut w = page.writer(0, 0);
    let _ = write!(
        w,
        "ISO {iso_year}-W{iso_week:02}-{}",
        weekday.number_from_monday()
    );
    let mut w = page.writer(1, 0);
    let _ = write!(w, "Day of year {:3}", date.ordinal());

    let heb = hebrew::from_gregorian(date);
    let mut w = page.writer(2, 0);
    let _ = write!(w, "{:2} {} {}", heb.day, heb.month_name(), heb.year);

    let isl = islamic::from_gregorian(date);
    let mut w = page.writer(3, 0);
    let _ = write!(w, "{:2} {} {}", isl.day, isl.month_name(), isl.year);
    page
}

/// Western and orthodox Easter for this year and next.
pub(super) fn easter_dates(ctx: &Context<'_>) -> Page {
    let year = ctx.local.year();
    let mut page = Page::new();
    let mut w = page.writer(0, 0);
    let _ = write!(w, "Easter {year}");

    if let Ok(western) = easter::gregorian(year) {
        page.write_at(1, 0, " western ");
        write_short_date(&mut page, 1, 10, western);
    }
    if let Ok(orthodox) = easter::julian_in_gregorian(year) {
        page.write_at(2, 0, " orthodox");
        write_short_date(&mut page, 2, 10, orthodox);
    }
    if let Ok(next_western) = easter::gregorian(year + 1) {
        let mut w = page.writer(3, 0);
        let _ = write!(w, "{} west ", year + 1);
        write_short_date(&mut page, 3, 11, next_western);
    }
    page
}

/// The four season events of the current year, UTC.
pub(super) fn equinoxes(ctx: &Context<'_>) -> Page {
    let year = ctx.local.year();
    let mut page = Page::new();
    for (row, event) in equinox::SeasonEvent::ALL.into_iter().enumerate() {
        let Ok(instant) = event.instant(year) else {
            continue;
        };
        page.write_at(row, 0, event.label());
        write_short_date(&mut page, row, 8, instant.date());
        let mut w = page.writer(row, 15);
        let _ = write!(w, "{:02}:{:02}", instant.hour(), instant.minute());
    }
    page
}
