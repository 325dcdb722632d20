//! Input Conditioning
//!
//! Debounce and decode for the two mechanical inputs: the button bank
//! behind one ADC pin and the quadrature tuning encoder.

pub mod buttons;
pub mod encoder;
