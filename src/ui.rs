//! Display Projection
//!
//! Pure model of what the front panel shows: band label, grouped
//! frequency, step legend and the cursor hint. The embedded renderer in
//! `drivers::display` draws from this model; keeping the formatting and
//! the change detection here keeps both host-testable.

use core::fmt::Write;

use heapless::String;

use crate::types::{Frequency, StepSize};

/// Characters in the nominal formatted frequency, `MM.kkk.hhh`
pub const FREQUENCY_WIDTH: usize = 10;

/// Render buffer for a formatted frequency
///
/// Wider than the nominal layout because the dial is unclamped and the
/// MHz group can outgrow two digits.
pub type FrequencyString = String<16>;

/// Format a frequency as grouped MHz.kHz.Hz
///
/// Two space-padded MHz digits, then the kHz and Hz groups zero-padded
/// to three digits each: 7_030_000 renders as `" 7.030.000"` and
/// 14_063_000 as `"14.063.000"`.
#[must_use]
pub fn format_frequency(frequency: Frequency) -> FrequencyString {
    let mut out = FrequencyString::new();
    // Capacity always suffices: the MHz group of a u32 is at most four digits
    let _ = write!(
        out,
        "{:2}.{:03}.{:03}",
        frequency.mhz_group(),
        frequency.khz_group(),
        frequency.hz_group()
    );
    out
}

/// Column of the digit a step size increments, in the nominal layout
///
/// Used to underline the active digit: `" 7.030.000"` has the 10 kHz
/// digit at column 4, 1 kHz at 5, 100 Hz at 7 and 10 Hz at 8.
#[must_use]
pub const fn cursor_column(step: StepSize) -> u8 {
    match step {
        StepSize::KHz10 => 4,
        StepSize::KHz1 => 5,
        StepSize::Hz100 => 7,
        StepSize::Hz10 => 8,
    }
}

/// Per-field change flags for one redraw pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDiff {
    /// Band label changed
    pub band: bool,
    /// Frequency readout changed
    pub frequency: bool,
    /// Step legend or cursor changed
    pub step: bool,
}

impl FieldDiff {
    /// True when at least one field needs a redraw
    #[must_use]
    pub const fn any(self) -> bool {
        self.band || self.frequency || self.step
    }
}

/// Shadow of the last values drawn to the panel
///
/// The renderer redraws only the fields whose backing value changed
/// since the previous pass; this is what keeps the display flicker-free
/// and the I2C traffic bounded, not an optimization to drop.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanelState {
    last: Option<(usize, Frequency, StepSize)>,
}

impl PanelState {
    /// Create a panel state that has drawn nothing yet
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Compare against the shadows and take the new values as drawn
    ///
    /// The first call reports every field changed.
    pub fn diff(&mut self, index: usize, frequency: Frequency, step: StepSize) -> FieldDiff {
        let diff = match self.last {
            None => FieldDiff {
                band: true,
                frequency: true,
                step: true,
            },
            Some((last_index, last_frequency, last_step)) => FieldDiff {
                band: index != last_index,
                frequency: frequency != last_frequency,
                step: step != last_step,
            },
        };
        self.last = Some((index, frequency, step));
        diff
    }
}
