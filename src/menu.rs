//! Setup-menu state machine. Pure: encoder events come in, screen choices
//! and settings edits come out, and the hardware layer decides when to
//! persist. A 30 s silence while in the menu abandons it.

use core::fmt::Write as _;

use heapless::String;

use crate::screens::{self, Page, ScreenId};
use crate::settings::{
    DateFormat, Language, ScreenSubset, Settings, DWELL_SECS_RANGE, GPS_BAUD_RATES,
    QUIZ_SECS_RANGE,
};
use crate::zones;

/// Seconds of inactivity after which the menu gives up.
pub const MENU_TIMEOUT_SECS: u64 = 30;

/// Decoded input events, produced by the rotary-encoder device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "pico1", derive(defmt::Format))]
pub enum NavEvent {
    /// Clockwise detent.
    Cw,
    /// Counter-clockwise detent.
    Ccw,
    /// Short button press.
    Press,
    /// Long button press.
    LongPress,
    /// No input for [`MENU_TIMEOUT_SECS`].
    Timeout,
}

/// What the orchestrator must do after an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "pico1", derive(defmt::Format))]
pub enum NavAction {
    None,
    /// Re-render the display.
    Redraw,
    /// Settings were committed; persist them and re-render.
    Commit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MenuItem {
    Subset,
    Backlight,
    DateFormat,
    TimeZone,
    Language,
    GpsBaud,
    DwellSecs,
    QuizSecs,
    Exit,
}

impl MenuItem {
    const ALL: [Self; 9] = [
        Self::Subset,
        Self::Backlight,
        Self::DateFormat,
        Self::TimeZone,
        Self::Language,
        Self::GpsBaud,
        Self::DwellSecs,
        Self::QuizSecs,
        Self::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Subset => "Screen set",
            Self::Backlight => "Backlight",
            Self::DateFormat => "Date format",
            Self::TimeZone => "Time zone",
            Self::Language => "Language",
            Self::GpsBaud => "GPS baud",
            Self::DwellSecs => "Demo dwell",
            Self::QuizSecs => "Quiz period",
            Self::Exit => "Save & exit",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Clock,
    Menu { cursor: usize },
    Edit { item: MenuItem },
}

/// Tracks the active screen and drives the setup menu.
pub struct Navigator {
    mode: Mode,
    screen_cursor: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: Mode::Clock,
            screen_cursor: 0,
        }
    }

    /// The screen to render when the menu is not open.
    #[must_use]
    pub fn active_screen(&self, settings: &Settings) -> ScreenId {
        let subset = screens::subset_screens(settings.subset);
        subset[self.screen_cursor.min(subset.len() - 1)]
    }

    #[must_use]
    pub const fn in_menu(&self) -> bool {
        !matches!(self.mode, Mode::Clock)
    }

    /// Feed one event through the state machine, editing `settings` in
    /// place. Edits only become durable when the caller sees
    /// [`NavAction::Commit`].
    pub fn handle(&mut self, event: NavEvent, settings: &mut Settings) -> NavAction {
        match (self.mode, event) {
            // Normal operation: the encoder cycles screens.
            (Mode::Clock, NavEvent::Cw) => {
                let len = screens::subset_screens(settings.subset).len();
                self.screen_cursor = (self.screen_cursor + 1) % len;
                NavAction::Redraw
            }
            (Mode::Clock, NavEvent::Ccw) => {
                let len = screens::subset_screens(settings.subset).len();
                self.screen_cursor = (self.screen_cursor + len - 1) % len;
                NavAction::Redraw
            }
            (Mode::Clock, NavEvent::Press | NavEvent::LongPress) => {
                self.mode = Mode::Menu { cursor: 0 };
                NavAction::Redraw
            }
            (Mode::Clock, NavEvent::Timeout) => NavAction::None,

            // Item selection.
            (Mode::Menu { cursor }, NavEvent::Cw) => {
                self.mode = Mode::Menu {
                    cursor: (cursor + 1) % MenuItem::ALL.len(),
                };
                NavAction::Redraw
            }
            (Mode::Menu { cursor }, NavEvent::Ccw) => {
                self.mode = Mode::Menu {
                    cursor: (cursor + MenuItem::ALL.len() - 1) % MenuItem::ALL.len(),
                };
                NavAction::Redraw
            }
            (Mode::Menu { cursor }, NavEvent::Press) => match MenuItem::ALL[cursor] {
                MenuItem::Exit => {
                    self.mode = Mode::Clock;
                    NavAction::Commit
                }
                item => {
                    self.mode = Mode::Edit { item };
                    NavAction::Redraw
                }
            },

            // Value editing.
            (Mode::Edit { item }, NavEvent::Cw) => {
                self.step_value(settings, item, 1);
                NavAction::Redraw
            }
            (Mode::Edit { item }, NavEvent::Ccw) => {
                self.step_value(settings, item, -1);
                NavAction::Redraw
            }
            (Mode::Edit { item }, NavEvent::Press) => {
                self.mode = Mode::Menu {
                    cursor: MenuItem::ALL.iter().position(|i| *i == item).unwrap_or(0),
                };
                NavAction::Redraw
            }

            // Long press anywhere in the menu saves and leaves.
            (Mode::Menu { .. } | Mode::Edit { .. }, NavEvent::LongPress) => {
                self.mode = Mode::Clock;
                NavAction::Commit
            }
            // Inactivity abandons the menu without persisting.
            (Mode::Menu { .. } | Mode::Edit { .. }, NavEvent::Timeout) => {
                self.mode = Mode::Clock;
                NavAction::Redraw
            }
        }
    }

    fn step_value(&mut self, settings: &mut Settings, item: MenuItem, dir: i32) {
        match item {
            MenuItem::Subset => {
                settings.subset = cycle(&ScreenSubset::ALL, settings.subset, dir);
                // The new subset may be shorter than the old cursor.
                self.screen_cursor = 0;
            }
            MenuItem::Backlight => settings.backlight = !settings.backlight,
            MenuItem::DateFormat => {
                settings.date_format = cycle(&DateFormat::ALL, settings.date_format, dir);
            }
            MenuItem::TimeZone => {
                settings.zone_index =
                    cycle_index(settings.zone_index, zones::ZONES.len() as u8, dir);
            }
            MenuItem::Language => {
                settings.language = cycle(&Language::ALL, settings.language, dir);
            }
            MenuItem::GpsBaud => {
                settings.baud_index =
                    cycle_index(settings.baud_index, GPS_BAUD_RATES.len() as u8, dir);
            }
            MenuItem::DwellSecs => {
                settings.dwell_secs = step_clamped(settings.dwell_secs, 5, DWELL_SECS_RANGE, dir);
            }
            MenuItem::QuizSecs => {
                settings.quiz_secs = step_clamped(settings.quiz_secs, 1, QUIZ_SECS_RANGE, dir);
            }
            MenuItem::Exit => {}
        }
    }

    /// The menu display, when open.
    #[must_use]
    pub fn overlay(&self, settings: &Settings) -> Option<Page> {
        match self.mode {
            Mode::Clock => None,
            Mode::Menu { cursor } => {
                let item = MenuItem::ALL[cursor];
                let mut page = Page::new();
                page.center(0, "- setup -");
                let mut w = page.writer(1, 0);
                let _ = write!(w, "> {}", item.label());
                page.write_at(2, 2, value_text(settings, item).as_str());
                page.write_at(3, 0, "turn:item press:edit");
                Some(page)
            }
            Mode::Edit { item } => {
                let mut page = Page::new();
                let mut w = page.writer(0, 0);
                let _ = write!(w, "{}", item.label());
                let mut w = page.writer(2, 0);
                let _ = write!(w, "< {} >", value_text(settings, item));
                page.write_at(3, 0, "turn:change press:ok");
                Some(page)
            }
        }
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, dir: i32) -> T {
    let len = options.len() as i32;
    let at = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
    options[(at + dir).rem_euclid(len) as usize]
}

fn cycle_index(current: u8, len: u8, dir: i32) -> u8 {
    (i32::from(current) + dir).rem_euclid(i32::from(len)) as u8
}

fn step_clamped(current: u8, step: u8, range: (u8, u8), dir: i32) -> u8 {
    let next = i32::from(current) + dir * i32::from(step);
    next.clamp(i32::from(range.0), i32::from(range.1)) as u8
}

fn value_text(settings: &Settings, item: MenuItem) -> String<18> {
    let mut out = String::new();
    let _ = match item {
        MenuItem::Subset => write!(out, "{}", settings.subset.label()),
        MenuItem::Backlight => write!(out, "{}", if settings.backlight { "on" } else { "off" }),
        MenuItem::DateFormat => write!(out, "{}", settings.date_format.label()),
        MenuItem::TimeZone => write!(out, "{}", settings.zone().name),
        MenuItem::Language => write!(out, "{}", settings.language.label()),
        MenuItem::GpsBaud => write!(out, "{}", settings.baud()),
        MenuItem::DwellSecs => write!(out, "{} s", settings.dwell_secs),
        MenuItem::QuizSecs => write!(out, "{} s", settings.quiz_secs),
        MenuItem::Exit => write!(out, "save"),
    };
    out
}
