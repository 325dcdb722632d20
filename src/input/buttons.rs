//! Button Bank Classification
//!
//! The three front-panel buttons share one ADC pin through a resistor
//! ladder, so a press shows up as a voltage window rather than a logic
//! level. This module maps raw ladder readings to button identities and
//! debounces them: a button is reported only after enough consecutive
//! identical samples, and a debounced release must be observed before
//! the next press can be accepted.

use crate::config::{BAND_DOWN_WINDOW, BAND_UP_WINDOW, DEBOUNCE_DEPTH, STEP_SELECT_WINDOW};

/// Front-panel button identity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Select the next band
    BandUp,
    /// Select the previous band
    BandDown,
    /// Cycle the tuning step
    StepSelect,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Button {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::BandUp => defmt::write!(f, "BandUp"),
            Self::BandDown => defmt::write!(f, "BandDown"),
            Self::StepSelect => defmt::write!(f, "StepSelect"),
        }
    }
}

/// Map one instantaneous ladder reading (0..=1023) to a button
///
/// The three windows approximate the ladder's divider taps. Everything
/// outside them, including the idle reading, is no button.
#[must_use]
pub const fn classify_raw(raw: u16) -> Option<Button> {
    if raw >= BAND_UP_WINDOW.0 && raw <= BAND_UP_WINDOW.1 {
        Some(Button::BandUp)
    } else if raw >= BAND_DOWN_WINDOW.0 && raw <= BAND_DOWN_WINDOW.1 {
        Some(Button::BandDown)
    } else if raw >= STEP_SELECT_WINDOW.0 && raw <= STEP_SELECT_WINDOW.1 {
        Some(Button::StepSelect)
    } else {
        None
    }
}

/// Debouncing classifier for the button ladder
///
/// Feed one raw sample per poll tick. A candidate code must repeat for
/// the full debounce depth before it is reported; any mismatching sample
/// replaces the candidate and restarts the count at one. After a report
/// the classifier stays latched until a debounced release, so holding a
/// button yields exactly one report.
pub struct ButtonClassifier {
    depth: u8,
    candidate: Option<Button>,
    count: u8,
    latched: bool,
}

impl ButtonClassifier {
    /// Create a classifier requiring `depth` consecutive identical samples
    #[must_use]
    pub const fn new(depth: u8) -> Self {
        Self {
            depth,
            candidate: None,
            count: 0,
            latched: false,
        }
    }

    /// Feed one raw ladder sample, returns a button on confirmed press
    pub fn feed(&mut self, raw: u16) -> Option<Button> {
        let code = classify_raw(raw);

        if code == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = code;
            self.count = 1;
        }

        if self.count < self.depth {
            return None;
        }

        match self.candidate {
            None => {
                // Debounced release: ready for the next press
                self.latched = false;
                None
            }
            Some(button) if !self.latched => {
                self.latched = true;
                Some(button)
            }
            Some(_) => None,
        }
    }
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new(DEBOUNCE_DEPTH)
    }
}
