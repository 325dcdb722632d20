//! Peripheral Drivers
//!
//! High-level drivers for the external ICs: the `Si5351A` synthesizer,
//! the SSD1306 panel and the 24C32 EEPROM. All three share one I2C bus,
//! so the drivers borrow it per operation instead of owning it.

pub mod display;
pub mod eeprom;
pub mod si5351;
