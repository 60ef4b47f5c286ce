//! A device abstraction that manages GPS-disciplined timekeeping and emits
//! tick events.

#![allow(clippy::future_not_send, reason = "single-threaded")]

use core::convert::Infallible;
use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use time::{OffsetDateTime, UtcOffset};

use crate::Result;
use crate::unix_seconds::UnixSeconds;

// ============================================================================
// Constants
// ============================================================================

/// Duration representing one second.
pub const ONE_SECOND: Duration = Duration::from_secs(1);
/// Duration representing one minute (60 seconds).
pub const ONE_MINUTE: Duration = Duration::from_secs(60);

// ============================================================================
// Types
// ============================================================================

/// Commands sent to the clock device.
enum ClockCommand {
    /// Discipline the clock to a GPS-reported Unix timestamp.
    SetTime { unix_seconds: UnixSeconds },
    /// Change the zone offset applied to local-time reads, minutes.
    SetOffset { minutes: i32 },
    /// Change the tick cadence (ONE_SECOND or ONE_MINUTE).
    SetTickInterval { interval: Duration },
}

// ============================================================================
// Clock Virtual Device
// ============================================================================

type ClockCommands = Channel<CriticalSectionRawMutex, ClockCommand, 4>;
type ClockTicks = Signal<CriticalSectionRawMutex, ()>;

/// Static resources backing the clock device.
pub struct ClockStatic {
    commands: ClockCommands,
    ticks: ClockTicks,
    offset_minutes: AtomicI32,
    tick_interval_ms: AtomicU32,
    // Unix timestamp when the processor booted (0 = not set).
    // 32 bits keeps it a native RP2040 atomic; good through 2038.
    boot_unix_seconds: AtomicI32,
}

impl ClockStatic {
    fn set_offset_minutes(&self, offset_minutes: i32) {
        self.offset_minutes.store(offset_minutes, Ordering::Relaxed);
    }

    fn set_tick_interval_ms(&self, tick_interval_ms: u32) {
        self.tick_interval_ms
            .store(tick_interval_ms, Ordering::Relaxed);
    }

    fn set_boot_unix_seconds(&self, boot_unix_seconds: i32) {
        self.boot_unix_seconds
            .store(boot_unix_seconds, Ordering::Relaxed);
    }
}

/// GPS-disciplined wall clock: holds the boot-time Unix timestamp and the
/// zone offset, ticks on second (or minute) boundaries.
pub struct Clock {
    commands: &'static ClockCommands,
    ticks: &'static ClockTicks,
    offset_minutes: &'static AtomicI32,
    boot_unix_seconds: &'static AtomicI32,
}

impl Clock {
    #[must_use]
    pub const fn new_static() -> ClockStatic {
        ClockStatic {
            commands: Channel::new(),
            ticks: Signal::new(),
            offset_minutes: AtomicI32::new(0),
            tick_interval_ms: AtomicU32::new(1000),
            boot_unix_seconds: AtomicI32::new(0),
        }
    }

    /// Spawn the clock task. The clock reports the Unix epoch until the
    /// first `set_time`.
    pub fn new(clock_static: &'static ClockStatic, offset_minutes: i32, spawner: Spawner) -> Self {
        clock_static.set_offset_minutes(offset_minutes);
        clock_static.set_tick_interval_ms(ONE_SECOND.as_millis() as u32);
        unwrap!(spawner.spawn(clock_device_loop(clock_static)));
        Self {
            commands: &clock_static.commands,
            ticks: &clock_static.ticks,
            offset_minutes: &clock_static.offset_minutes,
            boot_unix_seconds: &clock_static.boot_unix_seconds,
        }
    }

    /// Wait for and return the next clock tick event (local time).
    pub async fn wait(&self) -> OffsetDateTime {
        self.ticks.wait().await;
        self.now_local()
    }

    /// Has the clock been set from a GPS fix yet?
    pub fn has_time(&self) -> bool {
        self.boot_unix_seconds.load(Ordering::Relaxed) != 0
    }

    /// Current UTC time. Before the first fix this is the Unix epoch.
    pub fn now_utc(&self) -> OffsetDateTime {
        let boot_unix = self.boot_unix_seconds.load(Ordering::Relaxed);
        if boot_unix == 0 {
            // Time not set - report the epoch; screens show placeholders.
            return OffsetDateTime::UNIX_EPOCH;
        }

        let elapsed_secs = Instant::now().as_secs();
        let unix_seconds = UnixSeconds(i64::from(boot_unix).saturating_add(elapsed_secs as i64));
        unix_seconds
            .to_offset_datetime(UtcOffset::UTC)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    /// Current local time (UTC plus the configured offset).
    pub fn now_local(&self) -> OffsetDateTime {
        let offset_minutes = self.offset_minutes.load(Ordering::Relaxed);
        let offset =
            UtcOffset::from_whole_seconds(offset_minutes.saturating_mul(60)).unwrap_or(UtcOffset::UTC);
        self.now_utc().to_offset(offset)
    }

    /// Discipline the clock to a GPS timestamp.
    pub async fn set_time(&self, unix_seconds: UnixSeconds) {
        self.commands
            .send(ClockCommand::SetTime { unix_seconds })
            .await;
    }

    /// Change the zone offset used for subsequent local-time reads.
    pub async fn set_offset_minutes(&self, minutes: i32) {
        self.commands
            .send(ClockCommand::SetOffset { minutes })
            .await;
    }

    /// Zone offset currently in force, minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes.load(Ordering::Relaxed)
    }

    /// Set the tick interval. The clock emits events aligned to boundaries
    /// (top of second, top of minute, etc.).
    pub async fn set_tick_interval(&self, interval: Duration) {
        self.commands
            .send(ClockCommand::SetTickInterval { interval })
            .await;
    }
}

#[embassy_executor::task]
async fn clock_device_loop(resources: &'static ClockStatic) -> ! {
    let err = inner_clock_device_loop(resources).await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_clock_device_loop(resources: &'static ClockStatic) -> Result<Infallible> {
    let mut tick_interval_ms = resources.tick_interval_ms.load(Ordering::Relaxed);
    let offset_minutes = resources.offset_minutes.load(Ordering::Relaxed);

    info!(
        "Clock device started (offset {} min, tick {} ms)",
        offset_minutes, tick_interval_ms
    );

    // Sleep so the next tick lands on an interval boundary (top of second
    // or top of minute), not a fixed period after the previous one.
    let sleep_until_boundary = |interval_ms: u32| -> Duration {
        let now_ticks = Instant::now().as_ticks();
        let interval_ticks = u64::from(interval_ms) * 1000; // ms to microseconds
        let ticks_until_next = interval_ticks - (now_ticks % interval_ticks);
        Duration::from_micros(ticks_until_next)
    };

    loop {
        resources.ticks.signal(());

        let sleep_duration = sleep_until_boundary(tick_interval_ms);
        match select(Timer::after(sleep_duration), resources.commands.receive()).await {
            Either::First(_) => {}
            Either::Second(cmd) => match cmd {
                ClockCommand::SetTime { unix_seconds } => {
                    // boot_time = gps_time - uptime
                    let uptime_secs = Instant::now().as_secs();
                    let boot_unix = unix_seconds.as_i64().saturating_sub(uptime_secs as i64);
                    resources.set_boot_unix_seconds(boot_unix as i32);

                    info!(
                        "Clock set from GPS: {} (boot at {})",
                        unix_seconds.as_i64(),
                        boot_unix
                    );

                    // Tick immediately so the display jumps to the new time.
                    resources.ticks.signal(());
                }
                ClockCommand::SetOffset { minutes } => {
                    resources.set_offset_minutes(minutes);
                    info!("Clock zone offset now {} min", minutes);
                }
                ClockCommand::SetTickInterval { interval } => {
                    tick_interval_ms = interval.as_millis() as u32;
                    resources.set_tick_interval_ms(tick_interval_ms);
                    info!("Clock tick interval now {} ms", tick_interval_ms);
                }
            },
        }
    }
}
