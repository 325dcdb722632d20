//! Tuning Encoder Decoding
//!
//! Gray-code quadrature decoding for the tuning knob. One knob detent is
//! a full four-phase cycle on the A/B lines; the decoder accumulates
//! signed quarter steps and reports a direction only when the lines are
//! back at rest with a whole cycle behind them, so contact bounce and
//! partial motion never tune.

use crate::types::Direction;

/// Resting phase of the A/B lines between detents
const REST: u8 = 0b00;

/// Quadrature decoder for the tuning knob
///
/// Feed it the instantaneous A/B levels whenever either line changes.
pub struct QuadratureDecoder {
    /// Last observed 2-bit phase (A high bit, B low bit)
    prev: u8,
    /// Signed quarter steps accumulated since the last rest
    travel: i8,
}

impl QuadratureDecoder {
    /// Create a decoder assuming the knob starts at rest
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prev: REST,
            travel: 0,
        }
    }

    /// Update with new A/B levels, returns a direction on a completed detent
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        let phase = (u8::from(a) << 1) | u8::from(b);
        if phase == self.prev {
            return None;
        }

        // One Gray-code step is +1 (CW) or -1 (CCW); both lines changing
        // at once means we lost track, so the detent in progress is
        // discarded.
        let delta: i8 = match (self.prev, phase) {
            (0b00, 0b01) | (0b01, 0b11) | (0b11, 0b10) | (0b10, 0b00) => 1,
            (0b00, 0b10) | (0b10, 0b11) | (0b11, 0b01) | (0b01, 0b00) => -1,
            _ => {
                self.prev = phase;
                self.travel = 0;
                return None;
            }
        };

        self.prev = phase;
        self.travel += delta;

        if phase != REST {
            return None;
        }

        let travel = self.travel;
        self.travel = 0;
        match travel {
            4 => Some(Direction::Clockwise),
            -4 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}
