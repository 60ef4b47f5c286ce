//! A device abstraction for the serial NMEA GPS receiver. Reads sentences
//! from a buffered UART, parses them with the `nmea` crate, and signals a
//! [`GpsUpdate`] whenever a valid fix with date and time is available.

use chrono::{Datelike, Timelike};
use core::convert::Infallible;
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::uart::BufferedUartRx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_io_async::Read;
use heapless::Vec;
use nmea::Nmea;
use time::{Date, Month, Time};

use crate::coords::LatLon;
use crate::fix::GpsSnapshot;
use crate::unix_seconds::UnixSeconds;
use crate::{Error, Result};

/// NMEA 0183 caps a sentence at 82 bytes; leave slack for sloppy
/// receivers.
const LINE_CAPACITY: usize = 128;

/// One complete fix: the UTC instant and where we are.
#[derive(Copy, Clone, Debug, defmt::Format)]
pub struct GpsUpdate {
    pub unix_seconds: UnixSeconds,
    pub snapshot: GpsSnapshot,
}

type GpsFixes = Signal<CriticalSectionRawMutex, GpsUpdate>;

/// Resources needed by the Gps device.
pub struct GpsStatic {
    fixes: GpsFixes,
}

/// A device abstraction for the GPS receiver.
pub struct Gps {
    fixes: &'static GpsFixes,
}

impl Gps {
    /// Create Gps resources
    #[must_use]
    pub const fn new_static() -> GpsStatic {
        GpsStatic {
            fixes: Signal::new(),
        }
    }

    /// Create a new Gps device and spawn its task. The caller constructs
    /// the buffered UART (it owns the interrupt binding).
    pub fn new(
        gps_static: &'static GpsStatic,
        rx: BufferedUartRx<'static>,
        spawner: Spawner,
    ) -> Result<Self> {
        spawner
            .spawn(gps_device_loop(rx, &gps_static.fixes))
            .map_err(Error::TaskSpawn)?;
        Ok(Self {
            fixes: &gps_static.fixes,
        })
    }

    /// Wait for the next valid fix.
    pub async fn wait(&self) -> GpsUpdate {
        self.fixes.wait().await
    }
}

#[embassy_executor::task]
async fn gps_device_loop(rx: BufferedUartRx<'static>, fixes: &'static GpsFixes) -> ! {
    let err = inner_gps_device_loop(rx, fixes).await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_gps_device_loop(
    mut rx: BufferedUartRx<'static>,
    fixes: &'static GpsFixes,
) -> Result<Infallible> {
    info!("GPS device started");
    let mut parser = Nmea::default();
    let mut line: Vec<u8, LINE_CAPACITY> = Vec::new();
    let mut chunk = [0u8; 64];

    loop {
        let read = match rx.read(&mut chunk).await {
            Ok(n) => n,
            Err(e) => {
                // Framing/overrun errors happen during baud changes; drop
                // the partial line and resynchronize on the next '$'.
                warn!("GPS UART read error: {:?}", e);
                line.clear();
                continue;
            }
        };

        for &byte in &chunk[..read] {
            match byte {
                b'\n' => {
                    handle_sentence(&mut parser, &line, fixes);
                    line.clear();
                }
                b'\r' => {}
                _ => {
                    if line.push(byte).is_err() {
                        // Garbage with no terminator; start over.
                        line.clear();
                    }
                }
            }
        }
    }
}

fn handle_sentence(parser: &mut Nmea, line: &[u8], fixes: &'static GpsFixes) {
    let Ok(sentence) = core::str::from_utf8(line) else {
        return;
    };
    if sentence.is_empty() {
        return;
    }
    // Bad checksums and unsupported sentence types are routine; skip them.
    if parser.parse(sentence).is_err() {
        return;
    }
    if let Some(update) = snapshot_from(parser) {
        trace!("GPS fix: {:?}", update);
        fixes.signal(update);
    }
}

/// Assemble an update once the parser has accumulated a dated, positioned
/// fix. Returns `None` while any part is still missing.
fn snapshot_from(parser: &Nmea) -> Option<GpsUpdate> {
    let date = parser.fix_date?;
    let time = parser.fix_time?;
    let lat = parser.latitude?;
    let lon = parser.longitude?;

    let month = Month::try_from(date.month() as u8).ok()?;
    let date = Date::from_calendar_date(date.year(), month, date.day() as u8).ok()?;
    let time = Time::from_hms(time.hour() as u8, time.minute() as u8, time.second() as u8).ok()?;

    Some(GpsUpdate {
        unix_seconds: UnixSeconds::from_date_time(date, time),
        snapshot: GpsSnapshot {
            position: LatLon::new(lat, lon),
            altitude_m: parser.altitude().unwrap_or(0.0),
            satellites: parser.fix_satellites().unwrap_or(0) as u8,
            hdop: parser.hdop().unwrap_or(0.0),
        },
    })
}
