//! 24C32 EEPROM Driver
//!
//! Block storage for the persisted tuning state. The part takes a
//! two-byte big-endian word address; writes land in 32-byte pages and
//! need a few milliseconds of commit time each. Pages whose content
//! already matches are skipped to save write cycles.

use embassy_time::Timer;

use crate::config::{EEPROM_PAGE_SIZE, EEPROM_WRITE_CYCLE_MS};
use crate::hal::i2c::{I2cAddress, I2cBus, I2cResult};

/// 24C32 driver
///
/// Shares the I2C bus with the synthesizer and the display, so every
/// operation borrows the bus instead of owning it.
pub struct Eeprom;

impl Eeprom {
    /// Create a new EEPROM driver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read a block starting at `address`
    pub async fn read_block(
        &mut self,
        bus: &mut I2cBus<'_>,
        address: u16,
        out: &mut [u8],
    ) -> I2cResult<()> {
        bus.write_read(I2cAddress::EEPROM, &address.to_be_bytes(), out)
            .await
    }

    /// Write a block starting at `address`
    ///
    /// Splits the block on page boundaries; each page waits out the
    /// device's internal write cycle before the next begins.
    pub async fn write_block(
        &mut self,
        bus: &mut I2cBus<'_>,
        address: u16,
        data: &[u8],
    ) -> I2cResult<()> {
        let mut offset = 0;
        while offset < data.len() {
            let page_addr = address as usize + offset;
            let room = EEPROM_PAGE_SIZE - page_addr % EEPROM_PAGE_SIZE;
            let len = room.min(data.len() - offset);

            self.write_page(bus, page_addr as u16, &data[offset..offset + len])
                .await?;
            offset += len;
        }
        Ok(())
    }

    /// Write within a single page, skipping if the content matches
    async fn write_page(
        &mut self,
        bus: &mut I2cBus<'_>,
        address: u16,
        data: &[u8],
    ) -> I2cResult<()> {
        // Matching content skips the write and its wear
        let mut current = [0u8; EEPROM_PAGE_SIZE];
        let current = &mut current[..data.len()];
        self.read_block(bus, address, current).await?;
        if current == data {
            return Ok(());
        }

        let mut frame = [0u8; 2 + EEPROM_PAGE_SIZE];
        frame[..2].copy_from_slice(&address.to_be_bytes());
        frame[2..2 + data.len()].copy_from_slice(data);
        bus.write(I2cAddress::EEPROM, &frame[..2 + data.len()]).await?;

        Timer::after_millis(EEPROM_WRITE_CYCLE_MS).await;
        Ok(())
    }
}

impl Default for Eeprom {
    fn default() -> Self {
        Self::new()
    }
}
