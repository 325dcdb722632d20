//! Hardware Abstraction Layer
//!
//! Thin safe wrappers over the STM32G474 peripherals this firmware
//! uses: the shared I2C bus and the button-ladder ADC.

pub mod adc;
pub mod i2c;
