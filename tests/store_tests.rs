//! Tests for the persisted tuning state
//!
//! Snapshot codec layout, decode sanitizing and the write-coalescing
//! autosave policy.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test store_tests

use vfo_firmware::config::{
    AUTOSAVE_WINDOW_MS, BAND_COUNT, DEFAULT_STEP, FALLBACK_BAND_INDEX,
};
use vfo_firmware::tuner::state::Tuner;
use vfo_firmware::tuner::store::{Autosave, Snapshot, BAND_RECORD_LEN, SNAPSHOT_LEN};
use vfo_firmware::types::{Direction, Frequency, StepSize};

// ============================================================================
// Image Layout
// ============================================================================

#[test]
fn image_sizes() {
    assert_eq!(BAND_RECORD_LEN, 9);
    assert_eq!(SNAPSHOT_LEN, 1 + BAND_COUNT * BAND_RECORD_LEN);
    assert_eq!(SNAPSHOT_LEN, 46);
}

#[test]
fn index_is_byte_zero() {
    let mut tuner = Tuner::new();
    tuner.band_up(0);
    tuner.band_up(0);

    let bytes = Snapshot::from(&tuner).to_bytes();
    assert_eq!(bytes[0], 2);
}

#[test]
fn records_are_packed_little_endian() {
    let tuner = Tuner::new();
    let bytes = Snapshot::from(&tuner).to_bytes();

    // Slot 1 is 40m: active, 7_030_000 Hz, 1 kHz step
    let base = 1 + BAND_RECORD_LEN;
    assert_eq!(bytes[base], 1);
    assert_eq!(bytes[base + 1..base + 5], 7_030_000u32.to_le_bytes());
    assert_eq!(bytes[base + 5..base + 9], 1_000u32.to_le_bytes());
}

#[test]
fn every_slot_lands_at_its_offset() {
    let tuner = Tuner::new();
    let snapshot = Snapshot::from(&tuner);
    let bytes = snapshot.to_bytes();

    for (i, slot) in snapshot.bands.iter().enumerate() {
        let base = 1 + i * BAND_RECORD_LEN;
        assert_eq!(bytes[base], u8::from(slot.active));
        assert_eq!(
            bytes[base + 1..base + 5],
            slot.frequency.as_hz().to_le_bytes()
        );
        assert_eq!(bytes[base + 5..base + 9], slot.step.as_hz().to_le_bytes());
    }
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn snapshot_survives_encode_decode() {
    let mut tuner = Tuner::new();
    tuner.band_up(0);
    tuner.nudge(Direction::Clockwise, 0);
    tuner.cycle_step(0);

    let snapshot = Snapshot::from(&tuner);
    let decoded = Snapshot::from_bytes(&snapshot.to_bytes());
    assert_eq!(decoded, snapshot);
}

#[test]
fn tuner_rebuilt_from_image_matches() {
    let mut tuner = Tuner::new();
    tuner.band_up(123);
    tuner.nudge(Direction::CounterClockwise, 456);

    let bytes = Snapshot::from(&tuner).to_bytes();
    let rebuilt = Tuner::from(Snapshot::from_bytes(&bytes));

    assert_eq!(rebuilt.current_index(), tuner.current_index());
    assert_eq!(rebuilt.bands(), tuner.bands());
    // A freshly restored tuner has nothing to persist
    assert!(!rebuilt.is_dirty());
}

// ============================================================================
// Decode Sanitizing
// ============================================================================

#[test]
fn out_of_range_index_falls_back() {
    let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();

    bytes[0] = BAND_COUNT as u8;
    let decoded = Snapshot::from_bytes(&bytes);
    assert_eq!(decoded.current as usize, FALLBACK_BAND_INDEX);

    bytes[0] = 0xFF;
    let decoded = Snapshot::from_bytes(&bytes);
    assert_eq!(decoded.current as usize, FALLBACK_BAND_INDEX);
}

#[test]
fn last_valid_index_is_kept() {
    let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();
    bytes[0] = (BAND_COUNT - 1) as u8;

    let decoded = Snapshot::from_bytes(&bytes);
    assert_eq!(decoded.current as usize, BAND_COUNT - 1);
}

#[test]
fn unknown_step_magnitude_resets_to_default() {
    let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();

    // Corrupt slot 0's step field to a magnitude outside the step set
    bytes[6..10].copy_from_slice(&500u32.to_le_bytes());
    let decoded = Snapshot::from_bytes(&bytes);
    assert_eq!(decoded.bands[0].step, DEFAULT_STEP);

    // The other slots keep their stored steps
    assert_eq!(decoded.bands[1].step, StepSize::KHz1);
}

#[test]
fn all_canonical_steps_decode() {
    for (hz, step) in [
        (10u32, StepSize::Hz10),
        (100, StepSize::Hz100),
        (1_000, StepSize::KHz1),
        (10_000, StepSize::KHz10),
    ] {
        let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();
        bytes[6..10].copy_from_slice(&hz.to_le_bytes());
        let decoded = Snapshot::from_bytes(&bytes);
        assert_eq!(decoded.bands[0].step, step);
    }
}

#[test]
fn active_byte_decodes_nonzero_as_set() {
    let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();

    bytes[1] = 0;
    assert!(!Snapshot::from_bytes(&bytes).bands[0].active);

    bytes[1] = 1;
    assert!(Snapshot::from_bytes(&bytes).bands[0].active);

    bytes[1] = 0xFF;
    assert!(Snapshot::from_bytes(&bytes).bands[0].active);
}

#[test]
fn frequency_bytes_are_taken_at_face_value() {
    // There is no checksum; a garbage frequency is representable and kept
    let mut bytes = Snapshot::from(&Tuner::new()).to_bytes();
    bytes[2..6].copy_from_slice(&u32::MAX.to_le_bytes());

    let decoded = Snapshot::from_bytes(&bytes);
    assert_eq!(decoded.bands[0].frequency, Frequency::from_hz(u32::MAX));
}

#[test]
fn erased_eeprom_image_yields_a_usable_tuner() {
    // A never-programmed part reads all ones
    let bytes = [0xFF; SNAPSHOT_LEN];
    let tuner = Tuner::from(Snapshot::from_bytes(&bytes));

    assert_eq!(tuner.current_index(), FALLBACK_BAND_INDEX);
    assert_eq!(tuner.current_settings().step, DEFAULT_STEP);
    assert!(tuner.current_settings().active);
}

// ============================================================================
// Autosave Policy
// ============================================================================

#[test]
fn clean_tuner_never_saves() {
    let autosave = Autosave::default();
    let mut tuner = Tuner::new();

    assert!(autosave.poll(&mut tuner, 0).is_none());
    assert!(autosave.poll(&mut tuner, 1_000_000).is_none());
}

#[test]
fn save_waits_out_the_window() {
    let autosave = Autosave::default();
    let mut tuner = Tuner::new();
    tuner.nudge(Direction::Clockwise, 1_000);

    // Before and exactly at the window edge: not yet
    assert!(autosave.poll(&mut tuner, 1_000).is_none());
    assert!(autosave.poll(&mut tuner, 5_000).is_none());
    assert!(autosave
        .poll(&mut tuner, 1_000 + AUTOSAVE_WINDOW_MS)
        .is_none());

    // One past the window: due
    let snapshot = autosave.poll(&mut tuner, 1_001 + AUTOSAVE_WINDOW_MS);
    assert!(snapshot.is_some());
}

#[test]
fn save_fires_exactly_once_per_dirty_period() {
    let autosave = Autosave::default();
    let mut tuner = Tuner::new();
    tuner.nudge(Direction::Clockwise, 0);

    assert!(autosave.poll(&mut tuner, 20_000).is_some());
    assert!(!tuner.is_dirty());
    assert!(autosave.poll(&mut tuner, 20_002).is_none());
    assert!(autosave.poll(&mut tuner, 90_000).is_none());
}

#[test]
fn mutation_rearms_the_policy() {
    let autosave = Autosave::default();
    let mut tuner = Tuner::new();

    tuner.nudge(Direction::Clockwise, 0);
    assert!(autosave.poll(&mut tuner, 20_000).is_some());

    tuner.cycle_step(30_000);
    assert!(tuner.is_dirty());
    assert!(autosave.poll(&mut tuner, 35_000).is_none());
    assert!(autosave.poll(&mut tuner, 40_001).is_some());
}

#[test]
fn each_mutation_restarts_the_window() {
    let autosave = Autosave::new(10_000);
    let mut tuner = Tuner::new();

    // Keep touching the dial every few seconds; no save while spinning
    for t in [0u32, 4_000, 8_000, 12_000] {
        tuner.nudge(Direction::Clockwise, t);
        assert!(autosave.poll(&mut tuner, t + 4_000).is_none());
    }

    // Quiet at last
    assert!(autosave.poll(&mut tuner, 22_001).is_some());
}

#[test]
fn window_survives_clock_wraparound() {
    let autosave = Autosave::new(10_000);
    let mut tuner = Tuner::new();

    // Mutation just before the millisecond clock wraps
    tuner.nudge(Direction::Clockwise, u32::MAX - 5_000);

    // Shortly after the wrap the window has not passed yet
    assert!(autosave.poll(&mut tuner, 2_000).is_none());

    // 11 seconds of elapsed time across the wrap
    assert!(autosave.poll(&mut tuner, 6_000).is_some());
}

#[test]
fn snapshot_reflects_state_at_save_time() {
    let autosave = Autosave::default();
    let mut tuner = Tuner::new();
    tuner.band_up(0);
    tuner.nudge(Direction::Clockwise, 0);

    let snapshot = autosave.poll(&mut tuner, 20_000).unwrap();
    assert_eq!(snapshot.current, 1);
    assert_eq!(snapshot.bands[1].frequency.as_hz(), 7_031_000);
    assert_eq!(snapshot.bands, *tuner.bands());
}

#[test]
fn custom_window_is_honored() {
    let autosave = Autosave::new(100);
    let mut tuner = Tuner::new();
    tuner.nudge(Direction::Clockwise, 0);

    assert!(autosave.poll(&mut tuner, 100).is_none());
    assert!(autosave.poll(&mut tuner, 101).is_some());
}
