//! Sun, moon, and planet screens.

use core::fmt::Write as _;

use super::time_screens::waiting_for_fix;
use super::{glyph, Context, Page};
use crate::astro::riseset::DayPath;
use crate::astro::sun::Twilight;
use crate::astro::{moon, planets, sun};

fn write_day_path(page: &mut Page, row: usize, label: &str, path: &DayPath) {
    page.write_at(row, 0, label);
    match path {
        DayPath::AlwaysUp => page.write_at(row, 6, "up all day"),
        DayPath::AlwaysDown => page.write_at(row, 6, "down all day"),
        DayPath::Crossings { rise, set } => {
            match rise {
                Some(c) => {
                    let mut w = page.writer(row, 6);
                    let _ = write!(w, "{:02}:{:02}", c.hour(), c.minute());
                }
                None => page.write_at(row, 6, "--:--"),
            }
            match set {
                Some(c) => {
                    let mut w = page.writer(row, 13);
                    let _ = write!(w, "{:02}:{:02}", c.hour(), c.minute());
                }
                None => page.write_at(row, 13, "--:--"),
            }
        }
    }
}

/// Sunrise/sunset plus the three twilights for today.
pub(super) fn solar_rise_set(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    let Some(pos) = ctx.position() else {
        page.center(0, "Sun rise / set");
        waiting_for_fix(&mut page, 2);
        return page;
    };

    let rows = [
        ("Sun", Twilight::Actual),
        ("Civil", Twilight::Civil),
        ("Naut", Twilight::Nautical),
        ("Astro", Twilight::Astronomical),
    ];
    for (row, (label, twilight)) in rows.iter().enumerate() {
        let path = sun::day_path(ctx.local.date(), pos, ctx.offset_minutes(), *twilight);
        write_day_path(&mut page, row, label, &path);
    }
    // Arrow markers over the columns.
    page.set(0, 5, glyph::UP);
    page.set(0, 12, glyph::DOWN);
    page
}

/// Current sun and moon positions plus solar noon.
pub(super) fn sun_moon(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    let Some(pos) = ctx.position() else {
        page.center(0, "Sun & moon");
        waiting_for_fix(&mut page, 2);
        return page;
    };

    let sun_now = sun::horizontal(ctx.utc, pos);
    let mut w = page.writer(0, 0);
    let _ = write!(
        w,
        "Sun  alt {:4.0}",
        sun_now.altitude,
    );
    page.set(0, 13, glyph::DEGREE);
    let mut w = page.writer(0, 14);
    let _ = write!(w, "az {:3.0}", sun_now.azimuth);

    let (noon_minutes, noon_alt) = sun::solar_noon(ctx.local.date(), pos, ctx.offset_minutes());
    let mut w = page.writer(1, 0);
    let _ = write!(
        w,
        "noon {:02}:{:02}  alt {:3.0}",
        noon_minutes / 60,
        noon_minutes % 60,
        noon_alt
    );
    page.set(1, 19, glyph::DEGREE);

    let moon_now = moon::sky(ctx.utc, pos);
    let mut w = page.writer(2, 0);
    let _ = write!(w, "Moon alt {:4.0}", moon_now.horizontal.altitude);
    page.set(2, 13, glyph::DEGREE);
    let mut w = page.writer(2, 14);
    let _ = write!(w, "az {:3.0}", moon_now.horizontal.azimuth);

    let phase = moon::phase(ctx.utc);
    let mut w = page.writer(3, 0);
    let _ = write!(
        w,
        "illum {:3.0}%  {:4.1} d",
        phase.illuminated * 100.0,
        phase.age_days
    );
    page
}

fn phase_name(age_days: f64) -> &'static str {
    const NAMES: [&str; 8] = [
        "new moon",
        "waxing crescent",
        "first quarter",
        "waxing gibbous",
        "full moon",
        "waning gibbous",
        "last quarter",
        "waning crescent",
    ];
    let eighth = ((age_days / moon::SYNODIC_MONTH * 8.0) + 0.5) as usize % 8;
    NAMES[eighth]
}

/// Moon phase screen. Works without a fix; distance needs no observer.
pub(super) fn moon(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    let phase = moon::phase(ctx.utc);

    let mut w = page.writer(0, 0);
    let _ = write!(w, "Moon age {:4.1} days", phase.age_days);
    let mut w = page.writer(1, 0);
    let _ = write!(w, "illuminated {:3.0}%", phase.illuminated * 100.0);
    page.center(2, phase_name(phase.age_days));

    if let Some(pos) = ctx.position() {
        let sky = moon::sky(ctx.utc, pos);
        let mut w = page.writer(3, 0);
        let _ = write!(w, "dist {:4.1} Earth rad", sky.distance_er);
    }
    page
}

/// Next moonrise and moonset with azimuths.
pub(super) fn moon_rise_set(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.center(0, "Moon rise / set");
    let Some(pos) = ctx.position() else {
        waiting_for_fix(&mut page, 2);
        return page;
    };

    let events = moon::next_events(
        ctx.local.date(),
        ctx.local_minutes(),
        pos,
        ctx.offset_minutes(),
    );
    if events.is_empty() {
        let path = moon::day_path(ctx.local.date(), pos, ctx.offset_minutes());
        let text = if matches!(path, DayPath::AlwaysUp) {
            "up all day"
        } else {
            "down all day"
        };
        page.center(2, text);
        return page;
    }

    for (i, event) in events.iter().enumerate() {
        let row = i + 1;
        let arrow = match event.kind {
            moon::EventKind::Rise => glyph::UP,
            moon::EventKind::Set => glyph::DOWN,
        };
        page.set(row, 0, arrow);
        let mut w = page.writer(row, 2);
        let _ = write!(
            w,
            "{:02}:{:02}{} az {:3.0}",
            event.crossing.hour(),
            event.crossing.minute(),
            if event.tomorrow { '+' } else { ' ' },
            event.crossing.azimuth
        );
    }
    page
}

fn planet_row(page: &mut Page, row: usize, planet: planets::Planet, ctx: &Context<'_>) {
    let Some(pos) = ctx.position() else {
        return;
    };
    let view = planets::view(planet, ctx.utc, pos);
    let mut w = page.writer(row, 0);
    let _ = write!(
        w,
        "{} {:4.0}  {:3.0}  {:5.1}",
        planet.tag(),
        view.horizontal.altitude,
        view.horizontal.azimuth,
        view.magnitude
    );
}

/// Mercury, Venus, Mars: altitude, azimuth, magnitude.
pub(super) fn planets_inner(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    page.write_at(0, 0, "    alt   az    mag");
    if ctx.position().is_none() {
        waiting_for_fix(&mut page, 2);
        return page;
    }
    for (i, planet) in [
        planets::Planet::Mercury,
        planets::Planet::Venus,
        planets::Planet::Mars,
    ]
    .into_iter()
    .enumerate()
    {
        planet_row(&mut page, i + 1, planet, ctx);
    }
    page
}

/// Jupiter through Neptune: altitude, azimuth, magnitude.
pub(super) fn planets_outer(ctx: &Context<'_>) -> Page {
    let mut page = Page::new();
    if ctx.position().is_none() {
        page.center(0, "Outer planets");
        waiting_for_fix(&mut page, 2);
        return page;
    }
    for (i, planet) in [
        planets::Planet::Jupiter,
        planets::Planet::Saturn,
        planets::Planet::Uranus,
        planets::Planet::Neptune,
    ]
    .into_iter()
    .enumerate()
    {
        planet_row(&mut page, i, planet, ctx);
    }
    page
}
