//! `Si5351A` Clock Synthesizer Driver
//!
//! Generates the VFO output for the transmitter from a single 25MHz
//! crystal reference using a fractional PLL and an integer multisynth
//! divider. The control loop requests the target frequency every
//! iteration, so programming short-circuits when the requested value is
//! already on the output.

use crate::config::SI5351_XTAL_FREQ;
use crate::hal::i2c::{I2cAddress, I2cBus, I2cResult};
use crate::types::Frequency;

/// `Si5351A` register addresses
mod reg {
    pub const DEVICE_STATUS: u8 = 0;
    pub const OUTPUT_ENABLE: u8 = 3;
    pub const CLK0_CONTROL: u8 = 16;
    pub const CLK1_CONTROL: u8 = 17;
    pub const CLK2_CONTROL: u8 = 18;
    pub const PLLA_PARAMS: u8 = 26;
    pub const MS0_PARAMS: u8 = 42;
    pub const MS1_PARAMS: u8 = 50;
    pub const MS2_PARAMS: u8 = 58;
    pub const PLL_RESET: u8 = 177;
    pub const CRYSTAL_LOAD: u8 = 183;
}

/// VCO bounds for the internal PLL
const VCO_MAX_HZ: u64 = 900_000_000;

/// Maximum fractional denominator of the PLL feedback divider
const PLL_DENOM: u32 = 1_048_575;

/// Clock output identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockOutput {
    /// CLK0 output
    Clk0,
    /// CLK1 output
    Clk1,
    /// CLK2 output
    Clk2,
}

impl ClockOutput {
    /// Get the control register for this output
    const fn control_reg(self) -> u8 {
        match self {
            Self::Clk0 => reg::CLK0_CONTROL,
            Self::Clk1 => reg::CLK1_CONTROL,
            Self::Clk2 => reg::CLK2_CONTROL,
        }
    }

    /// Get the multisynth parameter base register
    const fn ms_reg(self) -> u8 {
        match self {
            Self::Clk0 => reg::MS0_PARAMS,
            Self::Clk1 => reg::MS1_PARAMS,
            Self::Clk2 => reg::MS2_PARAMS,
        }
    }

    /// Get the output enable bit
    const fn enable_bit(self) -> u8 {
        match self {
            Self::Clk0 => 0,
            Self::Clk1 => 1,
            Self::Clk2 => 2,
        }
    }

    /// Get the index into per-output shadow state
    const fn index(self) -> usize {
        self.enable_bit() as usize
    }
}

impl defmt::Format for ClockOutput {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Clk0 => defmt::write!(f, "CLK0"),
            Self::Clk1 => defmt::write!(f, "CLK1"),
            Self::Clk2 => defmt::write!(f, "CLK2"),
        }
    }
}

/// Drive strength setting
#[derive(Clone, Copy, Debug, Default)]
pub enum DriveStrength {
    /// 2mA drive
    Drive2mA,
    /// 4mA drive
    Drive4mA,
    /// 6mA drive
    Drive6mA,
    /// 8mA drive (maximum)
    #[default]
    Drive8mA,
}

impl DriveStrength {
    /// Get register value
    const fn as_reg(self) -> u8 {
        match self {
            Self::Drive2mA => 0,
            Self::Drive4mA => 1,
            Self::Drive6mA => 2,
            Self::Drive8mA => 3,
        }
    }
}

/// Crystal load capacitance
#[derive(Clone, Copy, Debug, Default)]
pub enum CrystalLoad {
    /// 6 pF load
    Load6pF,
    /// 8 pF load
    Load8pF,
    /// 10 pF load
    #[default]
    Load10pF,
}

impl CrystalLoad {
    const fn as_reg(self) -> u8 {
        match self {
            Self::Load6pF => 0b0100_0000,
            Self::Load8pF => 0b1000_0000,
            Self::Load10pF => 0b1100_0000,
        }
    }
}

/// Fractional divider parameters (a + b/c)
#[derive(Clone, Copy, Debug)]
struct DividerParams {
    /// Integer part
    a: u32,
    /// Numerator (0 to c-1)
    b: u32,
    /// Denominator (1-1048575)
    c: u32,
}

impl DividerParams {
    /// Encode as the eight-register parameter block the device expects
    fn as_regs(&self, r_div: u8) -> [u8; 8] {
        let p1 = 128 * self.a + ((128 * self.b) / self.c) - 512;
        let p2 = 128 * self.b - self.c * ((128 * self.b) / self.c);
        let p3 = self.c;

        [
            ((p3 >> 8) & 0xFF) as u8,
            (p3 & 0xFF) as u8,
            (r_div << 4) | ((p1 >> 16) as u8 & 0x03),
            ((p1 >> 8) & 0xFF) as u8,
            (p1 & 0xFF) as u8,
            (((p3 >> 12) & 0xF0) | ((p2 >> 16) & 0x0F)) as u8,
            ((p2 >> 8) & 0xFF) as u8,
            (p2 & 0xFF) as u8,
        ]
    }
}

/// `Si5351A` driver state
///
/// The device shares the I2C bus with the display and the EEPROM, so
/// every operation borrows the bus instead of owning it.
pub struct Si5351 {
    xtal_freq: u32,
    output_enable: u8,
    programmed_hz: [Option<u32>; 3],
}

impl Si5351 {
    /// Create a new `Si5351A` driver with all outputs disabled
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xtal_freq: SI5351_XTAL_FREQ,
            output_enable: 0xFF,
            programmed_hz: [None; 3],
        }
    }

    /// Initialize the `Si5351A`
    pub async fn init(&mut self, bus: &mut I2cBus<'_>, load: CrystalLoad) -> I2cResult<()> {
        // Wait for device to be ready
        self.wait_ready(bus).await?;

        // Disable all outputs during configuration
        bus.write_reg(I2cAddress::SI5351, reg::OUTPUT_ENABLE, 0xFF).await?;

        // Set crystal load capacitance
        bus.write_reg(I2cAddress::SI5351, reg::CRYSTAL_LOAD, load.as_reg())
            .await?;

        // Power down all clock outputs
        for clk in [ClockOutput::Clk0, ClockOutput::Clk1, ClockOutput::Clk2] {
            bus.write_reg(I2cAddress::SI5351, clk.control_reg(), 0x80).await?;
        }

        Ok(())
    }

    /// Wait for device to be ready (`SYS_INIT` cleared)
    async fn wait_ready(&mut self, bus: &mut I2cBus<'_>) -> I2cResult<()> {
        for _ in 0..100 {
            let status = bus.read_reg(I2cAddress::SI5351, reg::DEVICE_STATUS).await?;
            if status & 0x80 == 0 {
                return Ok(());
            }
            embassy_time::Timer::after(embassy_time::Duration::from_millis(1)).await;
        }
        // Timeout, but continue anyway
        Ok(())
    }

    /// Set frequency on a clock output
    ///
    /// Skips the register pass entirely when the output already runs at
    /// the requested frequency; the shadow is updated only after every
    /// register write succeeded, so a failed pass is retried on the next
    /// call.
    pub async fn set_frequency(
        &mut self,
        bus: &mut I2cBus<'_>,
        output: ClockOutput,
        freq: Frequency,
        drive: DriveStrength,
    ) -> I2cResult<()> {
        let freq_hz = freq.as_hz();
        if self.programmed_hz[output.index()] == Some(freq_hz) {
            return Ok(());
        }

        let (pll, ms) = self.calculate_params(u64::from(freq_hz));

        // Program PLL A feedback divider
        bus.write_regs(I2cAddress::SI5351, reg::PLLA_PARAMS, &pll.as_regs(0))
            .await?;

        // Program the multisynth output divider
        bus.write_regs(I2cAddress::SI5351, output.ms_reg(), &ms.as_regs(0))
            .await?;

        // Route the multisynth to the output
        let control = 0x0C | drive.as_reg();
        bus.write_reg(I2cAddress::SI5351, output.control_reg(), control)
            .await?;

        // Reset PLL A to apply the new parameters
        bus.write_reg(I2cAddress::SI5351, reg::PLL_RESET, 0x20).await?;

        self.programmed_hz[output.index()] = Some(freq_hz);
        Ok(())
    }

    /// Enable a clock output
    pub async fn enable(&mut self, bus: &mut I2cBus<'_>, output: ClockOutput) -> I2cResult<()> {
        self.output_enable &= !(1 << output.enable_bit());
        bus.write_reg(I2cAddress::SI5351, reg::OUTPUT_ENABLE, self.output_enable)
            .await
    }

    /// Disable a clock output
    pub async fn disable(&mut self, bus: &mut I2cBus<'_>, output: ClockOutput) -> I2cResult<()> {
        self.output_enable |= 1 << output.enable_bit();
        bus.write_reg(I2cAddress::SI5351, reg::OUTPUT_ENABLE, self.output_enable)
            .await
    }

    /// Calculate PLL and multisynth parameters for a target frequency
    ///
    /// The multisynth runs in integer mode (an even divider placing the
    /// VCO near its ceiling) and the PLL feedback divider carries the
    /// fractional part, which is what gives 10 Hz dial resolution.
    fn calculate_params(&self, target_hz: u64) -> (DividerParams, DividerParams) {
        // The dial is unclamped, so a nonsense target must still yield
        // parameters instead of dividing by zero.
        let target = target_hz.max(1);

        let mut ms_a = (VCO_MAX_HZ / target).clamp(4, 1800) as u32;
        ms_a &= !1;

        let vco = target * u64::from(ms_a);
        let xtal = u64::from(self.xtal_freq);

        let pll_a = (vco / xtal).clamp(15, 90) as u32;
        let pll_b = (((vco % xtal) * u64::from(PLL_DENOM)) / xtal) as u32;

        let pll = DividerParams {
            a: pll_a,
            b: pll_b,
            c: PLL_DENOM,
        };

        let ms = DividerParams {
            a: ms_a,
            b: 0,
            c: 1,
        };

        (pll, ms)
    }
}

impl Default for Si5351 {
    fn default() -> Self {
        Self::new()
    }
}
