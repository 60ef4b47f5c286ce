//! GPS-synchronized multi-function clock for the Raspberry Pi Pico.
//!
//! The pure core (astronomy, calendars, screen rendering, menu navigation) is
//! `no_std` but host-buildable, and is exercised by the integration tests under
//! `tests/`. The hardware device abstractions (GPS UART, HD44780 LCD, rotary
//! encoder, flash persistence) are gated behind the `pico1` feature so the core
//! can be tested without an RP2040 toolchain.
#![no_std]

pub mod astro;
pub mod calendar;
pub mod coords;
mod error;
mod fix;
pub mod menu;
pub mod screens;
pub mod settings;
mod unix_seconds;
pub mod zones;

#[cfg(feature = "pico1")]
mod char_lcd;
#[cfg(feature = "pico1")]
mod clock;
#[cfg(feature = "pico1")]
mod flash_store;
#[cfg(feature = "pico1")]
mod gps;
#[cfg(feature = "pico1")]
mod rotary;

// Re-export commonly used items
pub use error::{Error, Result};
pub use fix::{FixTracker, GpsSnapshot, FIX_STALE_SECS};
pub use unix_seconds::UnixSeconds;

#[cfg(feature = "pico1")]
pub use char_lcd::{CharLcd, CharLcdStatic};
#[cfg(feature = "pico1")]
pub use clock::{Clock, ClockStatic, ONE_MINUTE, ONE_SECOND};
#[cfg(feature = "pico1")]
pub use flash_store::{FlashStore, SETTINGS_BLOCK_ID};
#[cfg(feature = "pico1")]
pub use gps::{Gps, GpsStatic, GpsUpdate};
#[cfg(feature = "pico1")]
pub use rotary::{Rotary, RotaryEvent, RotaryStatic};
