//! Screen rendering. Every screen is a pure function from a [`Context`]
//! (current time, GPS fix, settings) to a [`Page`], the in-memory image of
//! the 20x4 character LCD. The hardware LCD task only ships finished pages,
//! which keeps all of this host-testable.

mod astro_screens;
mod calendar_screens;
mod fancy;
mod math_quiz;
pub mod radio;
mod time_screens;

use core::fmt;

use heapless::String;
use time::OffsetDateTime;

use crate::coords::LatLon;
use crate::settings::{ScreenSubset, Settings};
use crate::GpsSnapshot;

pub const COLS: usize = 20;
pub const ROWS: usize = 4;

/// CGRAM glyph codes uploaded by the LCD task, plus the one useful ROM
/// character outside ASCII.
pub mod glyph {
    /// Solid up arrow (rising).
    pub const UP: u8 = 0x00;
    /// Solid down arrow (setting).
    pub const DOWN: u8 = 0x01;
    /// Hollow up arrow (twilight start).
    pub const UP_HOLLOW: u8 = 0x02;
    /// Hollow down arrow (twilight end).
    pub const DOWN_HOLLOW: u8 = 0x03;
    /// Degree sign in the HD44780 A00 character ROM.
    pub const DEGREE: u8 = 0xDF;
}

// ======================================================================
// Page buffer
// ======================================================================

/// One full 20x4 frame.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Page {
    cells: [[u8; COLS]; ROWS],
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
        }
    }

    /// Write text starting at (row, col), clipped at the right edge.
    pub fn write_at(&mut self, row: usize, col: usize, text: &str) {
        if row >= ROWS {
            return;
        }
        for (i, byte) in text.bytes().enumerate() {
            let c = col + i;
            if c >= COLS {
                break;
            }
            self.cells[row][c] = byte;
        }
    }

    /// Place a single raw byte (e.g. a CGRAM glyph).
    pub fn set(&mut self, row: usize, col: usize, byte: u8) {
        if row < ROWS && col < COLS {
            self.cells[row][col] = byte;
        }
    }

    /// Write text centered in a row.
    pub fn center(&mut self, row: usize, text: &str) {
        let col = (COLS.saturating_sub(text.len())) / 2;
        self.write_at(row, col, text);
    }

    /// A `core::fmt::Write` adapter starting at (row, col).
    pub fn writer(&mut self, row: usize, col: usize) -> PageWriter<'_> {
        PageWriter {
            page: self,
            row,
            col,
        }
    }

    #[must_use]
    pub const fn row(&self, row: usize) -> &[u8; COLS] {
        &self.cells[row]
    }

    /// Row as printable text, custom glyphs folded to ASCII stand-ins.
    /// Used by tests and the defmt status logging.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String<COLS> {
        let mut out = String::new();
        for &byte in &self.cells[row] {
            let ch = match byte {
                glyph::UP => '^',
                glyph::DOWN => 'v',
                glyph::UP_HOLLOW => '\'',
                glyph::DOWN_HOLLOW => ',',
                glyph::DEGREE => '*',
                b' '..=b'~' => byte as char,
                _ => '?',
            };
            let _ = out.push(ch);
        }
        out
    }

    /// Does a row contain the given ASCII text?
    #[must_use]
    pub fn row_contains(&self, row: usize, needle: &str) -> bool {
        self.row_text(row).as_str().contains(needle)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            writeln!(f, "|{}|", self.row_text(row))?;
        }
        Ok(())
    }
}

/// Writes formatted text into a page, advancing along the row.
pub struct PageWriter<'a> {
    page: &'a mut Page,
    row: usize,
    col: usize,
}

impl fmt::Write for PageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.page.write_at(self.row, self.col, s);
        self.col += s.len();
        Ok(())
    }
}

// ======================================================================
// Context and dispatch
// ======================================================================

/// Everything a screen needs to draw itself.
pub struct Context<'a> {
    /// Current instant in UTC.
    pub utc: OffsetDateTime,
    /// Same instant in the selected zone.
    pub local: OffsetDateTime,
    /// Zone abbreviation in force (e.g. "CEST").
    pub zone_abbrev: &'static str,
    /// Latest fix, if the GPS has delivered one.
    pub fix: Option<GpsSnapshot>,
    pub settings: &'a Settings,
}

impl Context<'_> {
    #[must_use]
    pub fn position(&self) -> Option<LatLon> {
        self.fix.map(|f| f.position)
    }

    /// Minutes past local midnight.
    #[must_use]
    pub fn local_minutes(&self) -> u16 {
        u16::from(self.local.hour()) * 60 + u16::from(self.local.minute())
    }

    /// Offset of local time from UTC, whole minutes.
    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.local.offset().whole_seconds() / 60
    }
}

/// Every screen the clock can show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "pico1", derive(defmt::Format))]
pub enum ScreenId {
    LocalUtc,
    UtcLocator,
    SolarRiseSet,
    SunMoon,
    Moon,
    MoonRiseSet,
    PlanetsInner,
    PlanetsOuter,
    IsoHebIslam,
    EasterDates,
    Equinoxes,
    TimeZones,
    UtcPosition,
    Sidereal,
    GpsInfo,
    NcdxfBeacons,
    WsprSequence,
    Binary,
    BinaryHorBcd,
    BinaryVertBcd,
    Bar,
    Hex,
    Octal,
    HexOctal,
    MathAdd,
    MathSub,
    MathMul,
    MathDiv,
    Roman,
    Morse,
    WordClock,
    Chemical,
    InternalStatus,
    DemoMode,
}

use ScreenId::*;

/// Cycle order of the full screen set.
pub const ALL_SCREENS: &[ScreenId] = &[
    LocalUtc,
    UtcLocator,
    SolarRiseSet,
    SunMoon,
    Moon,
    MoonRiseSet,
    PlanetsInner,
    PlanetsOuter,
    IsoHebIslam,
    EasterDates,
    Equinoxes,
    TimeZones,
    UtcPosition,
    Sidereal,
    GpsInfo,
    NcdxfBeacons,
    WsprSequence,
    Binary,
    BinaryHorBcd,
    BinaryVertBcd,
    Bar,
    Hex,
    Octal,
    HexOctal,
    MathAdd,
    MathSub,
    MathMul,
    MathDiv,
    Roman,
    Morse,
    WordClock,
    Chemical,
    InternalStatus,
    DemoMode,
];

const FAVORITE_SCREENS: &[ScreenId] = &[LocalUtc, SolarRiseSet, Moon, IsoHebIslam, GpsInfo];

const CALENDAR_SCREENS: &[ScreenId] = &[LocalUtc, IsoHebIslam, EasterDates, Equinoxes];

const CLOCK_SCREENS: &[ScreenId] = &[
    LocalUtc,
    Binary,
    BinaryHorBcd,
    BinaryVertBcd,
    Bar,
    Hex,
    Octal,
    HexOctal,
    Roman,
    Morse,
    WordClock,
    Chemical,
    MathAdd,
    MathSub,
    MathMul,
    MathDiv,
];

const ASTRO_SCREENS: &[ScreenId] = &[
    SolarRiseSet,
    SunMoon,
    Moon,
    MoonRiseSet,
    PlanetsInner,
    PlanetsOuter,
    Sidereal,
    Equinoxes,
];

const RADIO_SCREENS: &[ScreenId] = &[LocalUtc, UtcLocator, NcdxfBeacons, WsprSequence, GpsInfo];

/// The screens the encoder cycles through for a subset choice.
#[must_use]
pub const fn subset_screens(subset: ScreenSubset) -> &'static [ScreenId] {
    match subset {
        ScreenSubset::All => ALL_SCREENS,
        ScreenSubset::Favorites => FAVORITE_SCREENS,
        ScreenSubset::Calendar => CALENDAR_SCREENS,
        ScreenSubset::Clocks => CLOCK_SCREENS,
        ScreenSubset::Astro => ASTRO_SCREENS,
        ScreenSubset::Radio => RADIO_SCREENS,
    }
}

/// Render one screen.
#[must_use]
pub fn render(id: ScreenId, ctx: &Context<'_>) -> Page {
    match id {
        LocalUtc => time_screens::local_utc(ctx),
        UtcLocator => time_screens::utc_locator(ctx),
        TimeZones => time_screens::time_zones(ctx),
        UtcPosition => time_screens::utc_position(ctx),
        Sidereal => time_screens::sidereal(ctx),
        GpsInfo => time_screens::gps_info(ctx),
        InternalStatus => time_screens::internal_status(ctx),
        SolarRiseSet => astro_screens::solar_rise_set(ctx),
        SunMoon => astro_screens::sun_moon(ctx),
        Moon => astro_screens::moon(ctx),
        MoonRiseSet => astro_screens::moon_rise_set(ctx),
        PlanetsInner => astro_screens::planets_inner(ctx),
        PlanetsOuter => astro_screens::planets_outer(ctx),
        IsoHebIslam => calendar_screens::iso_heb_islam(ctx),
        EasterDates => calendar_screens::easter_dates(ctx),
        Equinoxes => calendar_screens::equinoxes(ctx),
        NcdxfBeacons => radio::ncdxf_beacons(ctx),
        WsprSequence => radio::wspr_sequence(ctx),
        Binary => fancy::binary(ctx),
        BinaryHorBcd => fancy::binary_hor_bcd(ctx),
        BinaryVertBcd => fancy::binary_vert_bcd(ctx),
        Bar => fancy::bar(ctx),
        Hex => fancy::hex(ctx),
        Octal => fancy::octal(ctx),
        HexOctal => fancy::hex_octal(ctx),
        Roman => fancy::roman(ctx),
        Morse => fancy::morse(ctx),
        WordClock => fancy::word_clock(ctx),
        Chemical => fancy::chemical(ctx),
        MathAdd => math_quiz::add(ctx),
        MathSub => math_quiz::subtract(ctx),
        MathMul => math_quiz::multiply(ctx),
        MathDiv => math_quiz::divide(ctx),
        DemoMode => demo(ctx),
    }
}

/// Demo mode: walk the full screen set, changing every `dwell_secs`.
/// Deterministic in the current time, so it needs no stored cursor.
fn demo(ctx: &Context<'_>) -> Page {
    // Everything except DemoMode itself.
    let pool_len = (ALL_SCREENS.len() - 1) as i64;
    let dwell = i64::from(ctx.settings.dwell_secs.max(1));
    let index = (ctx.utc.unix_timestamp() / dwell).rem_euclid(pool_len) as usize;
    render(ALL_SCREENS[index], ctx)
}
