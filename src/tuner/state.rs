//! Tuner State Machine
//!
//! Owns the band table and the current-band selection, and applies
//! front-panel commands and encoder tune events to them. All mutations
//! stamp a millisecond timestamp and set a dirty flag; the persistence
//! policy in [`super::store`] consumes both.

use crate::config::{BAND_COUNT, DEFAULT_STEP, FALLBACK_BAND_INDEX, IF_CROSSOVER_HZ, IF_OFFSET_HZ};
use crate::input::buttons::Button;
use crate::types::{Band, Direction, Frequency, StepSize};

/// Per-band tuning settings (one band-table slot)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandSettings {
    /// Reserved enable flag
    ///
    /// Persisted alongside the other fields but never consulted by any
    /// transition; band up/down walks every slot regardless.
    pub active: bool,
    /// Dial frequency for this band
    pub frequency: Frequency,
    /// Tuning step for this band
    pub step: StepSize,
}

impl BandSettings {
    /// Create settings with the active flag set
    #[must_use]
    pub const fn new(frequency: Frequency, step: StepSize) -> Self {
        Self {
            active: true,
            frequency,
            step,
        }
    }

    /// Factory-fresh settings for a band slot
    #[must_use]
    pub const fn factory(band: Band) -> Self {
        Self::new(band.default_frequency(), DEFAULT_STEP)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BandSettings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} @ {}", self.frequency, self.step);
    }
}

/// Front-panel command decoded from the button bank
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Select the next band, wrapping past the last slot
    BandUp,
    /// Select the previous band, wrapping past the first slot
    BandDown,
    /// Advance the current band's step through the step cycle
    CycleStep,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::BandUp => Self::BandUp,
            Button::BandDown => Self::BandDown,
            Button::StepSelect => Self::CycleStep,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::BandUp => defmt::write!(f, "BandUp"),
            Self::BandDown => defmt::write!(f, "BandDown"),
            Self::CycleStep => defmt::write!(f, "CycleStep"),
        }
    }
}

/// Band/frequency controller state
///
/// The single owner of all tuning state. Collaborators (display,
/// synthesizer path, persistence) borrow it; nothing here lives in a
/// global.
#[derive(Clone, Debug)]
pub struct Tuner {
    /// The band table, one slot per selectable band
    bands: [BandSettings; BAND_COUNT],
    /// Index of the current band, always within the table
    current: usize,
    /// True when a mutation has not yet been persisted
    dirty: bool,
    /// Millisecond timestamp of the most recent mutation
    last_change_ms: u32,
}

impl Tuner {
    /// Create a tuner with factory defaults for every band
    #[must_use]
    pub fn new() -> Self {
        let mut bands = [BandSettings::factory(Band::M80); BAND_COUNT];
        for (slot, band) in bands.iter_mut().zip(Band::ALL) {
            *slot = BandSettings::factory(band);
        }
        Self {
            bands,
            current: FALLBACK_BAND_INDEX,
            dirty: false,
            last_change_ms: 0,
        }
    }

    /// Rebuild a tuner from persisted parts
    ///
    /// An out-of-range index falls back to [`FALLBACK_BAND_INDEX`] so the
    /// tuner always starts on a valid band. The rebuilt state is clean.
    #[must_use]
    pub fn from_parts(bands: [BandSettings; BAND_COUNT], current: usize) -> Self {
        let current = if current < BAND_COUNT {
            current
        } else {
            FALLBACK_BAND_INDEX
        };
        Self {
            bands,
            current,
            dirty: false,
            last_change_ms: 0,
        }
    }

    /// Get the current band index
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Get the current band identity (for labels and logs)
    #[must_use]
    pub fn current_band(&self) -> Band {
        Band::from_index(self.current).unwrap_or(Band::M80)
    }

    /// Get the current band's settings
    #[must_use]
    pub const fn current_settings(&self) -> &BandSettings {
        &self.bands[self.current]
    }

    /// Get a band slot by index
    #[must_use]
    pub fn band(&self, index: usize) -> Option<&BandSettings> {
        self.bands.get(index)
    }

    /// Get the whole band table
    #[must_use]
    pub const fn bands(&self) -> &[BandSettings; BAND_COUNT] {
        &self.bands
    }

    /// Replace a band slot, returns false if the index is out of range
    pub fn set_band(&mut self, index: usize, settings: BandSettings, now_ms: u32) -> bool {
        if let Some(slot) = self.bands.get_mut(index) {
            *slot = settings;
            self.touch(now_ms);
            true
        } else {
            false
        }
    }

    /// Check whether unpersisted mutations exist
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Millisecond timestamp of the most recent mutation
    #[must_use]
    pub const fn last_change_ms(&self) -> u32 {
        self.last_change_ms
    }

    /// Select the next band, wrapping at the top
    pub fn band_up(&mut self, now_ms: u32) {
        self.current = (self.current + 1) % BAND_COUNT;
        self.touch(now_ms);
    }

    /// Select the previous band, wrapping at the bottom
    pub fn band_down(&mut self, now_ms: u32) {
        self.current = (self.current + BAND_COUNT - 1) % BAND_COUNT;
        self.touch(now_ms);
    }

    /// Advance the current band's step through the step cycle
    pub fn cycle_step(&mut self, now_ms: u32) {
        let slot = &mut self.bands[self.current];
        slot.step = slot.step.next();
        self.touch(now_ms);
    }

    /// Move the current band's dial by one step in the given direction
    ///
    /// The dial is never clamped: repeated tuning can carry it past any
    /// band edge, across the IF crossover, and around the u32 range.
    pub fn nudge(&mut self, direction: Direction, now_ms: u32) {
        let slot = &mut self.bands[self.current];
        slot.frequency = match direction {
            Direction::Clockwise => slot.frequency.tune_up(slot.step),
            Direction::CounterClockwise => slot.frequency.tune_down(slot.step),
        };
        self.touch(now_ms);
    }

    /// Apply a front-panel command
    pub fn apply(&mut self, command: Command, now_ms: u32) {
        match command {
            Command::BandUp => self.band_up(now_ms),
            Command::BandDown => self.band_down(now_ms),
            Command::CycleStep => self.cycle_step(now_ms),
        }
    }

    /// Compute the VFO output frequency for the current dial value
    ///
    /// The dial and the synthesizer differ by the transmitter's fixed IF
    /// offset: at or above the crossover the output is dial minus IF,
    /// below it dial plus IF. Decided from the live dial value on every
    /// call.
    #[must_use]
    pub const fn vfo_frequency(&self) -> Frequency {
        let dial = self.bands[self.current].frequency.as_hz();
        if dial >= IF_CROSSOVER_HZ {
            Frequency::from_hz(dial.wrapping_sub(IF_OFFSET_HZ))
        } else {
            Frequency::from_hz(dial.wrapping_add(IF_OFFSET_HZ))
        }
    }

    /// Mark all state persisted
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn touch(&mut self, now_ms: u32) {
        self.dirty = true;
        self.last_change_ms = now_ms;
    }
}

impl Default for Tuner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Tuner {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Tuner({}, {})",
            self.current_band(),
            self.bands[self.current]
        );
    }
}
