//! Shared types used across the VFO firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Dial frequency in Hertz
///
/// A plain wrapper over u32 Hz with no range validation: the tuning
/// rules deliberately allow the dial to be driven past any band edge,
/// so every u32 value is representable and arithmetic wraps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Create a new Frequency from Hz
    #[must_use]
    pub const fn from_hz(hz: u32) -> Self {
        Self(hz)
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Self {
        Self(khz * 1000)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Whole-MHz digit group (for MHz.kHz.Hz display)
    #[must_use]
    pub const fn mhz_group(self) -> u32 {
        self.0 / 1_000_000
    }

    /// kHz digit group, 0-999 (for MHz.kHz.Hz display)
    #[must_use]
    pub const fn khz_group(self) -> u32 {
        (self.0 / 1000) % 1000
    }

    /// Hz digit group, 0-999 (for MHz.kHz.Hz display)
    #[must_use]
    pub const fn hz_group(self) -> u32 {
        self.0 % 1000
    }

    /// Tune up by a step amount, wrapping on overflow
    #[must_use]
    pub const fn tune_up(self, step: StepSize) -> Self {
        Self(self.0.wrapping_add(step.as_hz()))
    }

    /// Tune down by a step amount, wrapping on underflow
    #[must_use]
    pub const fn tune_down(self, step: StepSize) -> Self {
        Self(self.0.wrapping_sub(step.as_hz()))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// Tuning step size
///
/// Only the four canonical magnitudes are representable; anything else
/// read back from storage is rejected at the decode boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepSize {
    /// 10 Hz step
    Hz10,
    /// 100 Hz step
    Hz100,
    /// 1 kHz step
    #[default]
    KHz1,
    /// 10 kHz step
    KHz10,
}

impl StepSize {
    /// Get the step size in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        match self {
            Self::Hz10 => 10,
            Self::Hz100 => 100,
            Self::KHz1 => 1_000,
            Self::KHz10 => 10_000,
        }
    }

    /// Advance to the next step in the front-panel cycle
    ///
    /// The cycle jumps from the smallest step straight to the largest
    /// and then walks back down: 10 -> 10k -> 1k -> 100 -> 10.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hz10 => Self::KHz10,
            Self::KHz10 => Self::KHz1,
            Self::KHz1 => Self::Hz100,
            Self::Hz100 => Self::Hz10,
        }
    }

    /// Reconstruct a step from its Hz magnitude
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            10 => Some(Self::Hz10),
            100 => Some(Self::Hz100),
            1_000 => Some(Self::KHz1),
            10_000 => Some(Self::KHz10),
            _ => None,
        }
    }

    /// Short legend text for the display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hz10 => "10Hz",
            Self::Hz100 => "100Hz",
            Self::KHz1 => "1kHz",
            Self::KHz10 => "10kHz",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for StepSize {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Hz10 => defmt::write!(f, "10 Hz"),
            Self::Hz100 => defmt::write!(f, "100 Hz"),
            Self::KHz1 => defmt::write!(f, "1 kHz"),
            Self::KHz10 => defmt::write!(f, "10 kHz"),
        }
    }
}

/// Amateur radio band slot
///
/// The five selectable bands, ordered low to high. The slot order is
/// also the band-table index order, so `from_index`/`as_index` convert
/// between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// 80 meters
    M80,
    /// 40 meters
    M40,
    /// 20 meters
    M20,
    /// 15 meters
    M15,
    /// 10 meters
    M10,
}

impl Band {
    /// All bands in table order
    pub const ALL: [Self; 5] = [Self::M80, Self::M40, Self::M20, Self::M15, Self::M10];

    /// Get the band for a table index
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::M80),
            1 => Some(Self::M40),
            2 => Some(Self::M20),
            3 => Some(Self::M15),
            4 => Some(Self::M10),
            _ => None,
        }
    }

    /// Get the table index for this band
    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            Self::M80 => 0,
            Self::M40 => 1,
            Self::M20 => 2,
            Self::M15 => 3,
            Self::M10 => 4,
        }
    }

    /// Fixed front-panel label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::M80 => "80m",
            Self::M40 => "40m",
            Self::M20 => "20m",
            Self::M15 => "15m",
            Self::M10 => "10m",
        }
    }

    /// Factory-default dial frequency (QRP CW calling frequency)
    #[must_use]
    pub const fn default_frequency(self) -> Frequency {
        match self {
            Self::M80 => Frequency::from_hz(3_560_000),
            Self::M40 => Frequency::from_hz(7_030_000),
            Self::M20 => Frequency::from_hz(14_060_000),
            Self::M15 => Frequency::from_hz(21_060_000),
            Self::M10 => Frequency::from_hz(28_060_000),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.label());
    }
}

/// Rotation direction from the tuning encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise rotation (tune up)
    Clockwise,
    /// Counter-clockwise rotation (tune down)
    CounterClockwise,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Clockwise => defmt::write!(f, "CW"),
            Self::CounterClockwise => defmt::write!(f, "CCW"),
        }
    }
}
