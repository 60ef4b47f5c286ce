//! GPS-synchronized multi-function clock.
//!
//! Architecture:
//! - Gps task: parses NMEA from the UART, signals dated fixes
//! - Clock task: GPS-disciplined timekeeping, ticks on second boundaries
//! - Rotary task: quadrature decoding plus debounced short/long presses
//! - Lcd task: ships finished 20x4 frames over I2C
//! - Main orchestrator: owns the settings and the navigator, renders screens
//!
//! Wiring: LCD backpack on I2C0 (GP4=SDA, GP5=SCL), GPS RX on UART0 (GP1),
//! encoder A/B on GP10/GP11, encoder button on GP12.

#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{Either3, select3};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, Config as UartConfig};
use embassy_time::{Duration, Instant};
use gps_clock::menu::{MENU_TIMEOUT_SECS, NavAction, NavEvent, Navigator};
use gps_clock::screens::{self, Context};
use gps_clock::settings::Settings;
use gps_clock::{
    CharLcd, CharLcdStatic, Clock, ClockStatic, FixTracker, FlashStore, Gps, GpsSnapshot,
    GpsStatic, Result, Rotary, RotaryEvent, RotaryStatic, ONE_MINUTE, ONE_SECOND,
    SETTINGS_BLOCK_ID,
};
use panic_probe as _;
use static_cell::StaticCell;
use time::{OffsetDateTime, UtcOffset};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<core::convert::Infallible> {
    info!("Starting GPS clock");
    let p = embassy_rp::init(Default::default());

    let mut store = FlashStore::<Settings>::new(p.FLASH, SETTINGS_BLOCK_ID);
    let mut settings = store.load_settings();
    info!("Settings loaded (zone {})", settings.zone().name);

    static LCD_STATIC: CharLcdStatic = CharLcd::new_static();
    let lcd = CharLcd::new(&LCD_STATIC, p.I2C0, p.PIN_5, p.PIN_4, spawner)?;
    lcd.backlight(settings.backlight).await;

    static ROTARY_STATIC: RotaryStatic = Rotary::new_static();
    let rotary = Rotary::new(&ROTARY_STATIC, p.PIN_10, p.PIN_11, p.PIN_12, spawner)?;

    static GPS_RX_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = settings.baud();
    let rx = BufferedUartRx::new(
        p.UART0,
        Irqs,
        p.PIN_1,
        GPS_RX_BUFFER.init([0; 256]),
        uart_config,
    );
    static GPS_STATIC: GpsStatic = Gps::new_static();
    let gps = Gps::new(&GPS_STATIC, rx, spawner)?;

    static CLOCK_STATIC: ClockStatic = Clock::new_static();
    let clock = Clock::new(&CLOCK_STATIC, 0, spawner);

    let mut navigator = Navigator::new();
    let mut fix = FixTracker::new();
    let mut last_input = Instant::now();
    let mut tick_interval = ONE_SECOND;

    info!("Entering main event loop");
    loop {
        // The menu gives up after a silence; the one-second clock tick
        // guarantees this check runs often enough.
        if navigator.in_menu()
            && last_input.elapsed() >= Duration::from_secs(MENU_TIMEOUT_SECS)
        {
            info!("Menu timed out; discarding edits");
            settings = store.load_settings();
            let _ = navigator.handle(NavEvent::Timeout, &mut settings);
        }

        match select3(clock.wait(), gps.wait(), rotary.wait()).await {
            Either3::First(_local) => {}
            Either3::Second(update) => {
                clock.set_time(update.unix_seconds).await;
                fix.update(update.snapshot, update.unix_seconds.as_i64());
            }
            Either3::Third(event) => {
                last_input = Instant::now();
                let action = navigator.handle(nav_event(event), &mut settings);
                if action == NavAction::Commit {
                    settings = settings.clamped();
                    match store.save(&settings) {
                        Ok(()) => info!("Settings saved"),
                        Err(e) => error!("Settings save failed: {}", Debug2Format(&e)),
                    }
                    lcd.backlight(settings.backlight).await;
                    // The UART is configured at startup; a baud change
                    // takes effect on the next power-up.
                }
            }
        }

        // Track zone and DST changes as time advances.
        let utc = clock.now_utc();
        let zone = settings.zone();
        let offset_minutes = i32::from(zone.offset_minutes(utc));
        if offset_minutes != clock.offset_minutes() {
            clock.set_offset_minutes(offset_minutes).await;
        }

        // A fix that stopped refreshing ages out; the screens go back to
        // showing the waiting-for-fix row.
        let page = render(
            &navigator,
            &settings,
            utc,
            offset_minutes,
            zone.abbrev(utc),
            fix.current(utc.unix_timestamp()),
        );
        lcd.show(page).await;

        // The word clock only changes once a minute; everything else wants
        // second resolution.
        let interval = match navigator.active_screen(&settings) {
            screens::ScreenId::WordClock if !navigator.in_menu() => ONE_MINUTE,
            _ => ONE_SECOND,
        };
        if interval != tick_interval {
            tick_interval = interval;
            clock.set_tick_interval(interval).await;
        }
    }
}

fn nav_event(event: RotaryEvent) -> NavEvent {
    match event {
        RotaryEvent::Clockwise => NavEvent::Cw,
        RotaryEvent::CounterClockwise => NavEvent::Ccw,
        RotaryEvent::ShortPress => NavEvent::Press,
        RotaryEvent::LongPress => NavEvent::LongPress,
    }
}

fn render(
    navigator: &Navigator,
    settings: &Settings,
    utc: OffsetDateTime,
    offset_minutes: i32,
    zone_abbrev: &'static str,
    fix: Option<GpsSnapshot>,
) -> screens::Page {
    let offset = UtcOffset::from_whole_seconds(offset_minutes.saturating_mul(60))
        .unwrap_or(UtcOffset::UTC);
    let ctx = Context {
        utc,
        local: utc.to_offset(offset),
        zone_abbrev,
        fix,
        settings,
    };
    navigator
        .overlay(settings)
        .unwrap_or_else(|| screens::render(navigator.active_screen(settings), &ctx))
}
