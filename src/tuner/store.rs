//! Persisted Tuning State
//!
//! The EEPROM image of the band table plus the write-coalescing policy
//! that decides when a dirty tuner is worth a write cycle. The codec is
//! pure so the layout and the policy are both host-testable; the actual
//! EEPROM traffic lives in the embedded shell.

use super::state::{BandSettings, Tuner};
use crate::config::{AUTOSAVE_WINDOW_MS, BAND_COUNT, DEFAULT_STEP, FALLBACK_BAND_INDEX};
use crate::types::{Frequency, StepSize};

/// Serialized size of one band-table slot: active flag + two u32 fields
pub const BAND_RECORD_LEN: usize = 9;

/// Serialized size of the whole tuning state: index byte + all slots
pub const SNAPSHOT_LEN: usize = 1 + BAND_COUNT * BAND_RECORD_LEN;

/// A point-in-time copy of everything worth persisting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Current band index
    pub current: u8,
    /// The whole band table
    pub bands: [BandSettings; BAND_COUNT],
}

impl Snapshot {
    /// Serialize to the storage image
    ///
    /// Byte 0 is the current index; each slot follows as a packed record
    /// of active flag, frequency and step, both u32 little-endian.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SNAPSHOT_LEN] {
        let mut bytes = [0u8; SNAPSHOT_LEN];
        bytes[0] = self.current;
        for (i, slot) in self.bands.iter().enumerate() {
            let base = 1 + i * BAND_RECORD_LEN;
            bytes[base] = u8::from(slot.active);
            bytes[base + 1..base + 5].copy_from_slice(&slot.frequency.as_hz().to_le_bytes());
            bytes[base + 5..base + 9].copy_from_slice(&slot.step.as_hz().to_le_bytes());
        }
        bytes
    }

    /// Deserialize from the storage image, sanitizing what it must
    ///
    /// There is no checksum, so the bytes are trusted as far as the
    /// types allow: an index past the table falls back to
    /// [`FALLBACK_BAND_INDEX`], a step magnitude outside the canonical
    /// set becomes [`DEFAULT_STEP`], and frequency bytes are taken at
    /// face value.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SNAPSHOT_LEN]) -> Self {
        let current = if (bytes[0] as usize) < BAND_COUNT {
            bytes[0]
        } else {
            FALLBACK_BAND_INDEX as u8
        };

        let mut bands = [BandSettings::new(Frequency::from_hz(0), DEFAULT_STEP); BAND_COUNT];
        for (i, slot) in bands.iter_mut().enumerate() {
            let base = 1 + i * BAND_RECORD_LEN;
            let freq = u32::from_le_bytes([
                bytes[base + 1],
                bytes[base + 2],
                bytes[base + 3],
                bytes[base + 4],
            ]);
            let step = u32::from_le_bytes([
                bytes[base + 5],
                bytes[base + 6],
                bytes[base + 7],
                bytes[base + 8],
            ]);
            *slot = BandSettings {
                active: bytes[base] != 0,
                frequency: Frequency::from_hz(freq),
                step: StepSize::from_hz(step).unwrap_or(DEFAULT_STEP),
            };
        }

        Self { current, bands }
    }
}

impl From<&Tuner> for Snapshot {
    fn from(tuner: &Tuner) -> Self {
        Self {
            current: tuner.current_index() as u8,
            bands: *tuner.bands(),
        }
    }
}

impl From<Snapshot> for Tuner {
    fn from(snapshot: Snapshot) -> Self {
        Self::from_parts(snapshot.bands, snapshot.current as usize)
    }
}

/// Write-coalescing policy for the tuning state
///
/// Yields a [`Snapshot`] only when the tuner is dirty and no mutation
/// has happened for a full quiescence window, so a tuning spin costs at
/// most one write per window instead of one per detent. The caller
/// performs the write; the tuner is marked clean as the snapshot is
/// handed out, and the next mutation re-arms the policy.
#[derive(Clone, Copy, Debug)]
pub struct Autosave {
    window_ms: u32,
}

impl Autosave {
    /// Create a policy with the given quiescence window
    #[must_use]
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    /// Check whether the tuner state should be written now
    ///
    /// `now_ms` is a wrapping millisecond clock; the window comparison
    /// uses wrapping subtraction so timer overflow is harmless. The
    /// window is strict: a mutation exactly `window_ms` old is not yet
    /// due.
    pub fn poll(&self, tuner: &mut Tuner, now_ms: u32) -> Option<Snapshot> {
        if tuner.is_dirty() && now_ms.wrapping_sub(tuner.last_change_ms()) > self.window_ms {
            tuner.mark_clean();
            Some(Snapshot::from(&*tuner))
        } else {
            None
        }
    }
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(AUTOSAVE_WINDOW_MS)
    }
}
