//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use vfo_firmware::config::*;
use vfo_firmware::tuner::store::SNAPSHOT_LEN;
use vfo_firmware::types::StepSize;

// =============================================================================
// Clock and I2C Tests
// =============================================================================

#[test]
fn system_clock_valid() {
    // STM32G474 max clock is 170 MHz
    assert_eq!(SYSTEM_CLOCK_HZ, 170_000_000);
}

#[test]
fn i2c_frequency_valid() {
    // Standard I2C speeds: 100kHz, 400kHz, 1MHz
    assert!(I2C_FREQUENCY_HZ == 100_000 || I2C_FREQUENCY_HZ == 400_000 || I2C_FREQUENCY_HZ == 1_000_000);
}

#[test]
fn si5351_address_valid() {
    // Si5351A default address is 0x60 or 0x61
    assert!(SI5351_I2C_ADDR == 0x60 || SI5351_I2C_ADDR == 0x61);
}

#[test]
fn display_address_valid() {
    // SSD1306 addresses are 0x3C or 0x3D
    assert!(DISPLAY_I2C_ADDR == 0x3C || DISPLAY_I2C_ADDR == 0x3D);
}

#[test]
fn eeprom_address_valid() {
    // 24C32 responds at 0x50-0x57 depending on the address straps
    assert!(EEPROM_I2C_ADDR >= 0x50);
    assert!(EEPROM_I2C_ADDR <= 0x57);
}

// =============================================================================
// Display Configuration Tests
// =============================================================================

#[test]
fn display_dimensions_standard() {
    // Common OLED sizes: 128x32 or 128x64
    assert_eq!(DISPLAY_WIDTH, 128);
    assert!(DISPLAY_HEIGHT == 32 || DISPLAY_HEIGHT == 64);
}

// =============================================================================
// Si5351 Configuration Tests
// =============================================================================

#[test]
fn si5351_crystal_frequency() {
    // Standard crystal is 25 MHz or 27 MHz
    assert!(SI5351_XTAL_FREQ == 25_000_000 || SI5351_XTAL_FREQ == 27_000_000);
}

// =============================================================================
// Band Table Tests
// =============================================================================

#[test]
fn band_count_matches_front_panel() {
    // Five band slots, one per front-panel label
    assert_eq!(BAND_COUNT, 5);
}

#[test]
fn fallback_index_in_range() {
    assert!(FALLBACK_BAND_INDEX < BAND_COUNT);
}

#[test]
fn default_step_is_one_khz() {
    assert_eq!(DEFAULT_STEP, StepSize::KHz1);
}

// =============================================================================
// IF Arithmetic Tests
// =============================================================================

#[test]
fn if_offset_matches_transmitter() {
    assert_eq!(IF_OFFSET_HZ, 5_172_400);
}

#[test]
fn if_crossover_at_ten_mhz() {
    assert_eq!(IF_CROSSOVER_HZ, 10_000_000);
}

#[test]
fn subtraction_above_crossover_cannot_underflow() {
    // At and above the crossover the output is dial minus IF
    assert!(IF_CROSSOVER_HZ > IF_OFFSET_HZ);
}

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn control_tick_fast() {
    // The tick paces ladder sampling; it has to outrun finger bounce
    assert!(CONTROL_TICK_MS >= 1);
    assert!(CONTROL_TICK_MS <= 10);
}

#[test]
fn autosave_window_ten_seconds() {
    assert_eq!(AUTOSAVE_WINDOW_MS, 10_000);
}

#[test]
fn banner_hold_reasonable() {
    assert!(BANNER_HOLD_MS >= 500);
    assert!(BANNER_HOLD_MS <= 5_000);
}

#[test]
fn button_settle_time_reasonable() {
    // Depth times tick is the effective debounce; typically 20-100ms
    let settle_ms = u64::from(DEBOUNCE_DEPTH) * CONTROL_TICK_MS;
    assert!(settle_ms >= 10);
    assert!(settle_ms <= 200);
}

// =============================================================================
// Button Ladder Tests
// =============================================================================

#[test]
fn ladder_scale_ten_bit() {
    assert_eq!(LADDER_SCALE_MAX, 1023);
}

#[test]
fn ladder_windows_well_formed() {
    for (lo, hi) in [BAND_UP_WINDOW, BAND_DOWN_WINDOW, STEP_SELECT_WINDOW] {
        assert!(lo <= hi);
        assert!(hi <= LADDER_SCALE_MAX);
        // Zero is the idle reading and must never classify as a press
        assert!(lo > 0);
    }
}

#[test]
fn ladder_windows_do_not_overlap() {
    // Ordered up the ladder with a dead gap between neighbours
    let windows = [BAND_UP_WINDOW, BAND_DOWN_WINDOW, STEP_SELECT_WINDOW];
    for pair in windows.windows(2) {
        assert!(pair[0].1 < pair[1].0, "ladder windows must not touch");
    }
}

// =============================================================================
// Encoder Queue Tests
// =============================================================================

#[test]
fn tune_queue_absorbs_a_spin() {
    // A fast flick lands several detents between control ticks
    assert!(TUNE_QUEUE_DEPTH >= 4);
}

// =============================================================================
// EEPROM Layout Tests
// =============================================================================

#[test]
fn eeprom_page_power_of_two() {
    assert!(EEPROM_PAGE_SIZE.is_power_of_two());
}

#[test]
fn state_record_fits_in_eeprom() {
    assert!(EEPROM_STATE_ADDR as usize + SNAPSHOT_LEN <= EEPROM_SIZE_BYTES);
}

#[test]
fn state_record_page_aligned() {
    // Aligned start keeps the page-split writes predictable
    assert_eq!(EEPROM_STATE_ADDR as usize % EEPROM_PAGE_SIZE, 0);
}

#[test]
fn eeprom_write_cycle_per_datasheet() {
    // 24C32 self-timed write cycle is 5-10ms
    assert!(EEPROM_WRITE_CYCLE_MS >= 5);
    assert!(EEPROM_WRITE_CYCLE_MS <= 20);
}

// =============================================================================
// Pin Assignment Tests
// =============================================================================

#[test]
fn led_pin_defined() {
    assert!(!pins::LED_STATUS.is_empty());
}

#[test]
fn i2c_pins_defined() {
    assert!(!pins::I2C1_SCL.is_empty());
    assert!(!pins::I2C1_SDA.is_empty());
}

#[test]
fn encoder_pins_defined() {
    assert!(!pins::ENCODER_A.is_empty());
    assert!(!pins::ENCODER_B.is_empty());
}

#[test]
fn button_ladder_pin_defined() {
    assert!(!pins::BUTTON_LADDER.is_empty());
}
