//! I2C Bus Abstractions
//!
//! Async I2C access for the three devices sharing the bus: `Si5351A`,
//! SSD1306 display and 24C32 EEPROM. Uses the embassy-stm32 async I2C
//! driver with DMA. All drivers borrow the one [`I2cBus`] per
//! operation; the control task serializes access by construction.

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Async;

use crate::config::{DISPLAY_I2C_ADDR, EEPROM_I2C_ADDR, SI5351_I2C_ADDR};

/// I2C operation result
pub type I2cResult<T> = Result<T, I2cError>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// `Si5351A` clock synthesizer address
    pub const SI5351: Self = Self(SI5351_I2C_ADDR);

    /// SSD1306 OLED display address
    pub const SSD1306: Self = Self(DISPLAY_I2C_ADDR);

    /// 24C32 EEPROM address
    pub const EEPROM: Self = Self(EEPROM_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper for shared access
pub struct I2cBus<'d> {
    i2c: I2c<'d, Async>,
}

impl<'d> I2cBus<'d> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self { i2c }
    }

    /// Write bytes to a device
    pub async fn write(&mut self, addr: I2cAddress, data: &[u8]) -> I2cResult<()> {
        self.i2c.write(addr.addr(), data).await
    }

    /// Write then read (combined transaction)
    pub async fn write_read(
        &mut self,
        addr: I2cAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> I2cResult<()> {
        self.i2c.write_read(addr.addr(), write, read).await
    }

    /// Write a single register
    pub async fn write_reg(&mut self, addr: I2cAddress, reg: u8, value: u8) -> I2cResult<()> {
        self.i2c.write(addr.addr(), &[reg, value]).await
    }

    /// Read a single register
    pub async fn read_reg(&mut self, addr: I2cAddress, reg: u8) -> I2cResult<u8> {
        let mut buf = [0u8];
        self.i2c.write_read(addr.addr(), &[reg], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write multiple registers starting at base address
    pub async fn write_regs(&mut self, addr: I2cAddress, base_reg: u8, values: &[u8]) -> I2cResult<()> {
        // Build buffer with register address prefix
        // For small writes, use stack buffer
        if values.len() <= 16 {
            let mut buf = [0u8; 17];
            buf[0] = base_reg;
            buf[1..=values.len()].copy_from_slice(values);
            self.i2c.write(addr.addr(), &buf[..=values.len()]).await
        } else {
            // For larger writes, do individual register writes
            for (i, &value) in values.iter().enumerate() {
                self.write_reg(addr, base_reg + i as u8, value).await?;
            }
            Ok(())
        }
    }
}
