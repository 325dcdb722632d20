//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the VFO hardware.
//! All pin mappings, timing windows, and device parameters are centralized here.

use crate::types::StepSize;

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// I2C bus frequency for `Si5351A`, display and EEPROM
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// `Si5351A` I2C address
pub const SI5351_I2C_ADDR: u8 = 0x60;

/// SSD1306 OLED I2C address
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// 24C32 EEPROM I2C address
pub const EEPROM_I2C_ADDR: u8 = 0x50;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// `Si5351A` crystal frequency (25 MHz standard)
pub const SI5351_XTAL_FREQ: u32 = 25_000_000;

/// Number of band slots in the band table
pub const BAND_COUNT: usize = 5;

/// Band index substituted when the stored index is out of range
pub const FALLBACK_BAND_INDEX: usize = 0;

/// Default tuning step for factory-fresh or sanitized band slots
pub const DEFAULT_STEP: StepSize = StepSize::KHz1;

/// Intermediate-frequency offset between dial and VFO output
pub const IF_OFFSET_HZ: u32 = 5_172_400;

/// Dial frequency at or above which the VFO output is dial minus IF
///
/// Below this the output is dial plus IF. The comparison is made on the
/// live dial value every cycle, never on the band index, because tuning
/// can carry a band's dial across this boundary.
pub const IF_CROSSOVER_HZ: u32 = 10_000_000;

/// Control loop tick period in milliseconds
///
/// Also the button ladder inter-sample spacing: one ADC sample is taken
/// per tick.
pub const CONTROL_TICK_MS: u64 = 2;

/// Quiescence window before dirty state is written to EEPROM
pub const AUTOSAVE_WINDOW_MS: u32 = 10_000;

/// How long the startup banner stays on screen
pub const BANNER_HOLD_MS: u64 = 2_000;

/// Consecutive identical samples required to accept a button code
pub const DEBOUNCE_DEPTH: u8 = 12;

/// Full scale of the button ladder reading
pub const LADDER_SCALE_MAX: u16 = 1023;

/// Ladder window (inclusive) for the band-up button
pub const BAND_UP_WINDOW: (u16, u16) = (60, 160);

/// Ladder window (inclusive) for the band-down button
pub const BAND_DOWN_WINDOW: (u16, u16) = (280, 400);

/// Ladder window (inclusive) for the step-select button
pub const STEP_SELECT_WINDOW: (u16, u16) = (560, 720);

/// Capacity of the encoder-to-controller event queue
pub const TUNE_QUEUE_DEPTH: usize = 16;

/// EEPROM address of the persisted tuning state
pub const EEPROM_STATE_ADDR: u16 = 0x0000;

/// 24C32 capacity in bytes
pub const EEPROM_SIZE_BYTES: usize = 4096;

/// 24C32 write page size in bytes
pub const EEPROM_PAGE_SIZE: usize = 32;

/// 24C32 internal write cycle time in milliseconds
pub const EEPROM_WRITE_CYCLE_MS: u64 = 5;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// I2C1 SCL (Si5351, display, EEPROM)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (Si5351, display, EEPROM)
    pub const I2C1_SDA: &str = "PB9";

    /// Encoder A input (EXTI0)
    pub const ENCODER_A: &str = "PA0";

    /// Encoder B input (EXTI1)
    pub const ENCODER_B: &str = "PA1";

    /// Button ladder ADC input (ADC1_IN15)
    pub const BUTTON_LADDER: &str = "PB0";
}
