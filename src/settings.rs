//! User-adjustable settings: the menu edits them, the flash store persists
//! them, the screens consume them.

use core::fmt::Write as _;

use heapless::String;
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

use crate::zones;

/// Baud rates offered for the GPS serial port.
pub const GPS_BAUD_RATES: [u32; 6] = [4800, 9600, 19200, 38400, 57600, 115_200];

pub const DWELL_SECS_RANGE: (u8, u8) = (5, 60);
pub const QUIZ_SECS_RANGE: (u8, u8) = (1, 60);

/// Which group of screens the encoder cycles through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenSubset {
    All,
    Favorites,
    Calendar,
    Clocks,
    Astro,
    Radio,
}

impl ScreenSubset {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Favorites,
        Self::Calendar,
        Self::Clocks,
        Self::Astro,
        Self::Radio,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Favorites => "Favorites",
            Self::Calendar => "Calendar",
            Self::Clocks => "Clocks",
            Self::Astro => "Astronomy",
            Self::Radio => "Radio",
        }
    }
}

/// Date rendering conventions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// 31.12.2024
    Eu,
    /// 12/31/2024
    Us,
    /// 2024-12-31
    Iso,
    /// 31/12/2024
    French,
    /// 12.31.2024
    Period,
}

impl DateFormat {
    pub const ALL: [Self; 5] = [Self::Eu, Self::Us, Self::Iso, Self::French, Self::Period];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eu => "EU 31.12.",
            Self::Us => "US 12/31",
            Self::Iso => "ISO -12-31",
            Self::French => "FR 31/12",
            Self::Period => "US 12.31.",
        }
    }

    /// Render a date per the convention; always exactly 10 characters.
    #[must_use]
    pub fn format(self, date: Date) -> String<10> {
        let mut out = String::new();
        let (y, m, d) = (date.year(), date.month() as u8, date.day());
        let result = match self {
            Self::Eu => write!(out, "{d:02}.{m:02}.{y:04}"),
            Self::Us => write!(out, "{m:02}/{d:02}/{y:04}"),
            Self::Iso => write!(out, "{y:04}-{m:02}-{d:02}"),
            Self::French => write!(out, "{d:02}/{m:02}/{y:04}"),
            Self::Period => write!(out, "{m:02}.{d:02}.{y:04}"),
        };
        debug_assert!(result.is_ok());
        out
    }
}

/// Language for weekday names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
    French,
    Spanish,
    Italian,
    Dutch,
    Norwegian,
    Swedish,
}

impl Language {
    pub const ALL: [Self; 8] = [
        Self::English,
        Self::German,
        Self::French,
        Self::Spanish,
        Self::Italian,
        Self::Dutch,
        Self::Norwegian,
        Self::Swedish,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "Deutsch",
            Self::French => "Francais",
            Self::Spanish => "Espanol",
            Self::Italian => "Italiano",
            Self::Dutch => "Nederlands",
            Self::Norwegian => "Norsk",
            Self::Swedish => "Svenska",
        }
    }

    /// Weekday name, ASCII-folded for the HD44780 character set.
    #[must_use]
    pub const fn day_name(self, weekday: Weekday) -> &'static str {
        let names: &[&'static str; 7] = match self {
            Self::English => &[
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ],
            Self::German => &[
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
                "Sonntag",
            ],
            Self::French => &[
                "Lundi",
                "Mardi",
                "Mercredi",
                "Jeudi",
                "Vendredi",
                "Samedi",
                "Dimanche",
            ],
            Self::Spanish => &[
                "Lunes",
                "Martes",
                "Miercoles",
                "Jueves",
                "Viernes",
                "Sabado",
                "Domingo",
            ],
            Self::Italian => &[
                "Lunedi",
                "Martedi",
                "Mercoledi",
                "Giovedi",
                "Venerdi",
                "Sabato",
                "Domenica",
            ],
            Self::Dutch => &[
                "Maandag",
                "Dinsdag",
                "Woensdag",
                "Donderdag",
                "Vrijdag",
                "Zaterdag",
                "Zondag",
            ],
            Self::Norwegian => &[
                "Mandag",
                "Tirsdag",
                "Onsdag",
                "Torsdag",
                "Fredag",
                "Lordag",
                "Sondag",
            ],
            Self::Swedish => &[
                "Mandag",
                "Tisdag",
                "Onsdag",
                "Torsdag",
                "Fredag",
                "Lordag",
                "Sondag",
            ],
        };
        names[weekday.number_days_from_monday() as usize]
    }
}

/// Everything the setup menu can change. Persisted to flash on commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub subset: ScreenSubset,
    pub backlight: bool,
    pub date_format: DateFormat,
    pub zone_index: u8,
    pub language: Language,
    /// Index into [`GPS_BAUD_RATES`].
    pub baud_index: u8,
    /// Demo-mode dwell per screen, seconds.
    pub dwell_secs: u8,
    /// Math quiz: seconds per problem.
    pub quiz_secs: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            subset: ScreenSubset::All,
            backlight: true,
            date_format: DateFormat::Iso,
            zone_index: 0,
            language: Language::English,
            baud_index: 1, // 9600, the NMEA default
            dwell_secs: 10,
            quiz_secs: 15,
        }
    }
}

impl Settings {
    /// Force every field into its valid range. Applied after loading from
    /// flash so a stale layout cannot drive indices out of bounds.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.zone_index = self.zone_index.min(zones::ZONES.len() as u8 - 1);
        self.baud_index = self.baud_index.min(GPS_BAUD_RATES.len() as u8 - 1);
        self.dwell_secs = self.dwell_secs.clamp(DWELL_SECS_RANGE.0, DWELL_SECS_RANGE.1);
        self.quiz_secs = self.quiz_secs.clamp(QUIZ_SECS_RANGE.0, QUIZ_SECS_RANGE.1);
        self
    }

    #[must_use]
    pub fn baud(&self) -> u32 {
        GPS_BAUD_RATES[self.baud_index as usize]
    }

    #[must_use]
    pub fn zone(&self) -> &'static zones::Zone {
        zones::zone(self.zone_index as usize)
    }
}
