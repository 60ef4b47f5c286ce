//! A device abstraction for a quadrature rotary encoder with push button.
//! Quadrature decoding comes from `rotary-encoder-hal`; the push button is
//! debounced and classified as a short or long press.

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};
use rotary_encoder_hal::{Direction, Rotary as Quadrature};

use crate::Result;

pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(10);
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(500);
/// Quadrature poll interval; mechanical encoders produce edges no faster.
const POLL_INTERVAL: Duration = Duration::from_millis(1);
/// Quadrature transitions per mechanical detent on the usual EC11 part.
const STEPS_PER_DETENT: i8 = 4;

/// Events produced by the encoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
pub enum RotaryEvent {
    Clockwise,
    CounterClockwise,
    ShortPress,
    LongPress,
}

type RotaryEvents = Channel<CriticalSectionRawMutex, RotaryEvent, 8>;

/// Resources needed by the Rotary device.
pub struct RotaryStatic {
    events: RotaryEvents,
}

/// A device abstraction for the rotary encoder and its push button.
pub struct Rotary {
    events: &'static RotaryEvents,
}

impl Rotary {
    /// Create Rotary resources
    #[must_use]
    pub const fn new_static() -> RotaryStatic {
        RotaryStatic {
            events: Channel::new(),
        }
    }

    /// Create a new Rotary device and spawn its tasks. All three pins are
    /// pulled up; the button is active low.
    pub fn new(
        rotary_static: &'static RotaryStatic,
        pin_a: Peri<'static, impl Pin>,
        pin_b: Peri<'static, impl Pin>,
        pin_button: Peri<'static, impl Pin>,
        spawner: Spawner,
    ) -> Result<Self> {
        let a = Input::new(pin_a, Pull::Up);
        let b = Input::new(pin_b, Pull::Up);
        let button = Input::new(pin_button, Pull::Up);

        spawner.spawn(encoder_loop(a, b, &rotary_static.events))?;
        spawner.spawn(button_loop(button, &rotary_static.events))?;
        Ok(Self {
            events: &rotary_static.events,
        })
    }

    /// Wait for the next encoder event.
    pub async fn wait(&self) -> RotaryEvent {
        self.events.receive().await
    }
}

#[embassy_executor::task]
async fn encoder_loop(a: Input<'static>, b: Input<'static>, events: &'static RotaryEvents) -> ! {
    info!("Rotary encoder task started");
    let mut quadrature = Quadrature::new(a, b);
    // Running sum of quadrature steps; one user event per detent.
    let mut steps: i8 = 0;

    loop {
        Timer::after(POLL_INTERVAL).await;
        // Infallible: embassy-rp GPIO reads cannot fail.
        let direction = match quadrature.update() {
            Ok(direction) => direction,
            Err(_) => Direction::None,
        };
        match direction {
            Direction::Clockwise => steps += 1,
            Direction::CounterClockwise => steps -= 1,
            Direction::None => continue,
        }
        if steps >= STEPS_PER_DETENT {
            steps = 0;
            events.send(RotaryEvent::Clockwise).await;
        } else if steps <= -STEPS_PER_DETENT {
            steps = 0;
            events.send(RotaryEvent::CounterClockwise).await;
        }
    }
}

#[embassy_executor::task]
async fn button_loop(mut button: Input<'static>, events: &'static RotaryEvents) -> ! {
    info!("Rotary button task started");
    loop {
        // Wait for a stable released state, then a press.
        button.wait_for_high().await;
        Timer::after(BUTTON_DEBOUNCE_DELAY).await;
        button.wait_for_low().await;

        // The start of a press can be noisy as the contacts settle
        // ("bouncing"); ignore the state until it has.
        Timer::after(BUTTON_DEBOUNCE_DELAY).await;

        // Released before the long-press threshold means a short press.
        let event = match select(
            button.wait_for_rising_edge(),
            Timer::after(LONG_PRESS_DURATION),
        )
        .await
        {
            Either::First(_) => RotaryEvent::ShortPress,
            Either::Second(()) => RotaryEvent::LongPress,
        };
        info!("Button press: {:?}", event);
        events.send(event).await;
    }
}
