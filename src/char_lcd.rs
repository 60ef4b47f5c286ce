//! A device abstraction for the 20x4 HD44780 character LCD behind a PCF8574
//! I2C backpack. Consumes whole [`Page`] frames rendered by the pure screen
//! code and owns the custom CGRAM glyphs.

use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::i2c::{self, Config as I2cConfig, SclPin, SdaPin};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;

use crate::screens::{Page, ROWS};
use crate::{Error, Result};

/// Messages sent to the character LCD device.
enum LcdMessage {
    /// Replace the whole display contents.
    Frame(Page),
    /// Switch the backlight.
    Backlight(bool),
}

type LcdFrames = Channel<CriticalSectionRawMutex, LcdMessage, 4>;

/// Resources needed by the CharLcd device.
pub struct CharLcdStatic {
    frames: LcdFrames,
}

/// A device abstraction for an HD44780-compatible character LCD.
pub struct CharLcd {
    frames: &'static LcdFrames,
}

impl CharLcd {
    /// Create CharLcd resources
    #[must_use]
    pub const fn new_static() -> CharLcdStatic {
        CharLcdStatic {
            frames: Channel::new(),
        }
    }

    /// Create a new CharLcd device
    ///
    /// Note: Hardcoded to the I2C0 peripheral. SCL and SDA can be any pins
    /// compatible with I2C0.
    pub fn new<SCL, SDA>(
        lcd_static: &'static CharLcdStatic,
        i2c_peripheral: Peri<'static, I2C0>,
        scl: Peri<'static, SCL>,
        sda: Peri<'static, SDA>,
        spawner: Spawner,
    ) -> Result<Self>
    where
        SCL: SclPin<I2C0>,
        SDA: SdaPin<I2C0>,
    {
        // Create the I2C instance and pass it to the task
        let i2c = i2c::I2c::new_blocking(i2c_peripheral, scl, sda, I2cConfig::default());
        spawner
            .spawn(lcd_task(i2c, &lcd_static.frames))
            .map_err(Error::TaskSpawn)?;
        Ok(Self {
            frames: &lcd_static.frames,
        })
    }

    /// Ship a finished frame to the display (async, waits until queued).
    pub async fn show(&self, page: Page) {
        self.frames.send(LcdMessage::Frame(page)).await;
    }

    /// Switch the backlight on or off.
    pub async fn backlight(&self, on: bool) {
        self.frames.send(LcdMessage::Backlight(on)).await;
    }
}

// Internal LCD driver implementation (used by the background task)
struct LcdDriver {
    i2c: i2c::I2c<'static, I2C0, i2c::Blocking>,
    address: u8,
    backlight: bool,
}

// PCF8574 pin mapping: P0=RS, P1=RW, P2=E, P3=Backlight, P4-P7=Data
const LCD_BACKLIGHT: u8 = 0x08;
const LCD_ENABLE: u8 = 0x04;
const LCD_RS: u8 = 0x01;

/// 5x8 CGRAM patterns for the arrow glyphs the astro screens use.
const GLYPHS: [[u8; 8]; 4] = [
    // solid up arrow
    [0b00100, 0b01110, 0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000],
    // solid down arrow
    [0b00100, 0b00100, 0b00100, 0b00100, 0b11111, 0b01110, 0b00100, 0b00000],
    // hollow up arrow
    [0b00100, 0b01010, 0b10001, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000],
    // hollow down arrow
    [0b00100, 0b00100, 0b00100, 0b00100, 0b10001, 0b01010, 0b00100, 0b00000],
];

impl LcdDriver {
    fn new(i2c: i2c::I2c<'static, I2C0, i2c::Blocking>) -> Self {
        Self {
            i2c,
            address: 0x27,
            backlight: true,
        }
    }

    async fn init(&mut self) {
        Timer::after_millis(50).await;

        // Initialize in 4-bit mode
        self.write_nibble(0x03, false).await;
        Timer::after_millis(5).await;
        self.write_nibble(0x03, false).await;
        Timer::after_micros(150).await;
        self.write_nibble(0x03, false).await;
        self.write_nibble(0x02, false).await;

        // Function set: 4-bit, 2 lines, 5x8 font
        self.write_byte_internal(0x28, false).await;
        // Display control: display on, cursor off, blink off
        self.write_byte_internal(0x0C, false).await;
        // Clear display
        self.write_byte_internal(0x01, false).await;
        Timer::after_millis(2).await;
        // Entry mode: increment cursor, no shift
        self.write_byte_internal(0x06, false).await;

        self.load_glyphs().await;
    }

    /// Upload the custom characters to CGRAM slots 0..4.
    async fn load_glyphs(&mut self) {
        for (slot, pattern) in GLYPHS.iter().enumerate() {
            // Set CGRAM address for this slot
            self.write_byte_internal(0x40 | ((slot as u8) << 3), false).await;
            for &row in pattern {
                self.write_byte_internal(row, true).await;
            }
        }
        // Back to DDRAM addressing
        self.write_byte_internal(0x80, false).await;
    }

    async fn write_nibble(&mut self, nibble: u8, rs: bool) {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let backlight_bit = if self.backlight { LCD_BACKLIGHT } else { 0 };
        let data = (nibble << 4) | backlight_bit | rs_bit;

        // Write with enable high
        let _ = self.i2c.blocking_write(self.address, &[data | LCD_ENABLE]);
        Timer::after_micros(1).await;

        // Write with enable low
        let _ = self.i2c.blocking_write(self.address, &[data]);
        Timer::after_micros(50).await;
    }

    async fn write_byte_internal(&mut self, byte: u8, rs: bool) {
        self.write_nibble((byte >> 4) & 0x0F, rs).await;
        self.write_nibble(byte & 0x0F, rs).await;
    }

    async fn set_cursor(&mut self, row: u8, col: u8) {
        let address = match row {
            0 => col,
            1 => 0x40 + col,
            2 => 0x14 + col,
            3 => 0x54 + col,
            _ => 0x00,
        };
        self.write_byte_internal(0x80 | address, false).await;
    }

    async fn write_frame(&mut self, page: &Page) {
        // Full-row rewrites; no clear, so there is no visible flicker.
        for row in 0..ROWS {
            self.set_cursor(row as u8, 0).await;
            for &byte in page.row(row) {
                self.write_byte_internal(byte, true).await;
            }
        }
    }

    async fn set_backlight(&mut self, on: bool) {
        self.backlight = on;
        // Any write latches the new backlight bit; a harmless cursor-home
        // command does the job.
        self.write_byte_internal(0x80, false).await;
    }
}

#[embassy_executor::task]
async fn lcd_task(i2c: i2c::I2c<'static, I2C0, i2c::Blocking>, frames: &'static LcdFrames) -> ! {
    let mut lcd = LcdDriver::new(i2c);
    lcd.init().await;

    let mut shown: Option<Page> = None;
    loop {
        match frames.receive().await {
            LcdMessage::Frame(page) => {
                // Skip identical frames; one frame is 80 slow I2C writes.
                if shown.as_ref() != Some(&page) {
                    lcd.write_frame(&page).await;
                    shown = Some(page);
                }
            }
            LcdMessage::Backlight(on) => lcd.set_backlight(on).await,
        }
    }
}
