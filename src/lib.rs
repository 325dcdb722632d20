//! VFO Firmware Library
//!
//! This library provides the core functionality for an STM32G474-based
//! external VFO and signal source for a vintage crystal-controlled
//! transmitter. An `Si5351A` synthesizer generates the output, offset
//! from the dial frequency by the receiver IF so the station tunes as
//! one unit.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     CONTROL LOOP                     │
//! │  band select  │  dial tuning  │  autosave  │  panel  │
//! ├──────────────────────────────────────────────────────┤
//! │                     TUNING CORE                      │
//! │  band table  │  IF arithmetic  │  snapshot codec     │
//! ├──────────────────────────────────────────────────────┤
//! │                  HAL / DRIVER LAYER                  │
//! │  ADC  │  EXTI  │  I2C  │  Si5351  │  SSD1306  │ 24C32│
//! ├──────────────────────────────────────────────────────┤
//! │                   RTOS / SCHEDULER                   │
//! │           embassy-rs (async/await executor)          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **One state object**: the whole tuning state lives in a single
//!   [`tuner::state::Tuner`] value owned by the control task, never in globals
//! - **Message passing at the interrupt boundary**: encoder edges are
//!   decoded into events and queued; only the control task mutates state
//! - **Functional core, imperative shell**: tuning, debounce, formatting
//!   and the snapshot codec are pure and host-tested
//! - **Explicit error handling**: I2C faults are logged and absorbed at
//!   the control loop, never propagated into tuning state

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Provides safe abstractions over STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// High-level drivers for external ICs (Si5351, display, EEPROM).
#[cfg(feature = "embedded")]
pub mod drivers;

/// Tuning Core
///
/// Band table, tuning commands, IF arithmetic and persistence policy.
pub mod tuner;

/// Input Decoding
///
/// Button ladder classification and quadrature decoding.
pub mod input;

/// Display Projection
///
/// Frequency formatting, cursor placement and redraw diffing.
pub mod ui;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal_async::i2c::I2c;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
