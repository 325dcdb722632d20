//! ADC Driver
//!
//! Single-channel sampling of the front-panel button ladder. One sample
//! per control tick is plenty; the debounce depth lives in the
//! classifier, not here.

use embassy_stm32::adc::{Adc, AdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;

/// One button-ladder reading
#[derive(Clone, Copy, Debug)]
pub struct LadderReading {
    /// Raw 12-bit ADC value (0-4095)
    raw: u16,
}

impl LadderReading {
    /// Create a new reading from the raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Scale to the classifier's 10-bit range (0-1023)
    #[must_use]
    pub const fn scaled(self) -> u16 {
        self.raw >> 2
    }
}

impl defmt::Format for LadderReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Ladder({})", self.scaled());
    }
}

/// Button ladder ADC driver
pub struct ButtonAdc<'d> {
    adc: Adc<'d, ADC1>,
}

impl ButtonAdc<'_> {
    /// Create a new button ladder driver
    #[must_use]
    pub fn new(adc: ADC1) -> Self {
        let adc = Adc::new(adc);
        Self { adc }
    }

    /// Configure the sample time for the high-impedance ladder
    pub fn configure(&mut self) {
        self.adc.set_sample_time(SampleTime::CYCLES247_5);
    }

    /// Read one instantaneous ladder sample
    pub fn read<T: AdcChannel<ADC1>>(&mut self, channel: &mut T) -> LadderReading {
        let raw = self.adc.blocking_read(channel);
        LadderReading::from_raw(raw)
    }
}
