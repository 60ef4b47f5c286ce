//! Persistent settings storage in the last 4 KB sectors of internal flash,
//! using postcard serialization with a magic/type-hash/CRC32 header.
//!
//! Each block lives in its own erase sector, allocated from the end of
//! flash backwards so it never collides with the firmware image. Reading a
//! block written by an older firmware with a different payload type fails
//! the type hash and reads as "no data", not garbage.

use core::marker::PhantomData;

use crc32fast::Hasher;
use defmt::{error, info};
use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash};
use embassy_rp::peripherals::FLASH;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::{Error, Result};

/// Internal flash size for the Raspberry Pi Pico (2 MB).
pub const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Sector used for the persisted [`Settings`].
pub const SETTINGS_BLOCK_ID: u32 = 0;

const MAGIC: u32 = 0x4750_5343; // 'GPSC'
const HEADER_SIZE: usize = 4 + 4 + 2; // Magic + TypeHash + PayloadLen
const CRC_SIZE: usize = 4;
const MAX_PAYLOAD_SIZE: usize = ERASE_SIZE - HEADER_SIZE - CRC_SIZE;

/// Type-safe persistent storage for one serde value in one flash sector.
pub struct FlashStore<T, const N: usize = INTERNAL_FLASH_SIZE> {
    flash: Flash<'static, FLASH, Blocking, N>,
    block_id: u32,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, const N: usize> FlashStore<T, N>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    /// Take ownership of the flash peripheral for one storage block.
    #[must_use]
    pub fn new(flash: Peri<'static, FLASH>, block_id: u32) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
            block_id,
            _phantom: PhantomData,
        }
    }

    /// Load the stored value.
    ///
    /// `Ok(None)` means the sector is empty or was written with a
    /// different type; `Err` means the data is present but corrupt.
    pub fn load(&mut self) -> Result<Option<T>> {
        let offset = self.block_offset();
        let mut buffer = [0u8; ERASE_SIZE];
        self.flash.blocking_read(offset, &mut buffer)?;

        let magic = u32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
        if magic != MAGIC {
            info!("FlashStore: no data at block {}", self.block_id);
            return Ok(None);
        }

        let stored_type_hash = u32::from_le_bytes([buffer[4], buffer[5], buffer[6], buffer[7]]);
        if stored_type_hash != type_hash::<T>() {
            info!("FlashStore: type mismatch at block {}", self.block_id);
            return Ok(None);
        }

        let payload_len = usize::from(u16::from_le_bytes([buffer[8], buffer[9]]));
        if payload_len > MAX_PAYLOAD_SIZE {
            error!(
                "FlashStore: invalid payload length {} at block {}",
                payload_len, self.block_id
            );
            return Err(Error::SettingsCorrupted);
        }

        let crc_offset = HEADER_SIZE + payload_len;
        let stored_crc = u32::from_le_bytes([
            buffer[crc_offset],
            buffer[crc_offset + 1],
            buffer[crc_offset + 2],
            buffer[crc_offset + 3],
        ]);
        if stored_crc != crc32(&buffer[..crc_offset]) {
            error!("FlashStore: CRC mismatch at block {}", self.block_id);
            return Err(Error::SettingsCorrupted);
        }

        let payload = &buffer[HEADER_SIZE..HEADER_SIZE + payload_len];
        let value = postcard::from_bytes(payload).map_err(|_| {
            error!("FlashStore: deserialization failed at block {}", self.block_id);
            Error::SettingsCorrupted
        })?;

        info!("FlashStore: loaded block {}", self.block_id);
        Ok(Some(value))
    }

    /// Save a value, erasing the sector first (typically 100-200 ms).
    pub fn save(&mut self, value: &T) -> Result<()> {
        let mut payload_buffer = [0u8; MAX_PAYLOAD_SIZE];
        let payload_len = postcard::to_slice(value, &mut payload_buffer)
            .map_err(|_| {
                error!(
                    "FlashStore: serialization failed or data too large (max {} bytes)",
                    MAX_PAYLOAD_SIZE
                );
                Error::FormatError
            })?
            .len();

        let mut buffer = [0xFFu8; ERASE_SIZE];
        buffer[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buffer[4..8].copy_from_slice(&type_hash::<T>().to_le_bytes());
        buffer[8..10].copy_from_slice(&(payload_len as u16).to_le_bytes());
        buffer[HEADER_SIZE..HEADER_SIZE + payload_len]
            .copy_from_slice(&payload_buffer[..payload_len]);

        let crc_offset = HEADER_SIZE + payload_len;
        let crc = crc32(&buffer[..crc_offset]);
        buffer[crc_offset..crc_offset + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());

        let offset = self.block_offset();
        self.flash.blocking_erase(offset, offset + ERASE_SIZE as u32)?;
        self.flash.blocking_write(offset, &buffer)?;

        info!(
            "FlashStore: saved {} bytes to block {}",
            payload_len, self.block_id
        );
        Ok(())
    }

    /// Erase the sector; subsequent loads return `Ok(None)`.
    pub fn clear(&mut self) -> Result<()> {
        let offset = self.block_offset();
        self.flash.blocking_erase(offset, offset + ERASE_SIZE as u32)?;
        info!("FlashStore: cleared block {}", self.block_id);
        Ok(())
    }

    // Blocks are allocated from the end of flash backwards.
    fn block_offset(&self) -> u32 {
        let capacity = self.flash.capacity() as u32;
        capacity - (self.block_id + 1) * ERASE_SIZE as u32
    }
}

impl<const N: usize> FlashStore<Settings, N> {
    /// Stored settings, range-clamped; defaults when the sector is empty
    /// or unreadable.
    pub fn load_settings(&mut self) -> Settings {
        match self.load() {
            Ok(Some(settings)) => settings.clamped(),
            Ok(None) => Settings::default(),
            Err(_) => {
                error!("FlashStore: settings corrupt, using defaults");
                Settings::default()
            }
        }
    }
}

/// FNV-1a hash of the payload type name.
fn type_hash<T>() -> u32 {
    const FNV_PRIME: u32 = 16_777_619;
    const FNV_OFFSET: u32 = 2_166_136_261;

    let mut hash = FNV_OFFSET;
    for byte in core::any::type_name::<T>().bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// CRC32 checksum.
fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
