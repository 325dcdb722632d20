//! OLED Panel Driver
//!
//! Renders the front panel on an SSD1306 128x64 module: band label top
//! left, step legend top right, the grouped frequency readout in large
//! type with an underline cursor marking the digit the encoder moves.
//! Redraws are driven by the field diff from [`crate::ui`], so an idle
//! panel costs no I2C traffic at all.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::hal::i2c::{I2cAddress, I2cBus, I2cResult};
use crate::types::{Band, Frequency, StepSize};
use crate::ui::{cursor_column, format_frequency, FieldDiff};

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// SSD1306 commands
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Band label field
const BAND_FIELD: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(36, 12));

/// Step legend field
const STEP_FIELD: Rectangle = Rectangle::new(Point::new(92, 0), Size::new(36, 12));

/// Frequency readout field, underline cursor row included
///
/// Runs to the panel edge so an overgrown MHz group from an unclamped
/// dial is blanked along with the nominal ten columns.
const FREQUENCY_FIELD: Rectangle = Rectangle::new(Point::new(14, 22), Size::new(114, 24));

/// Display buffer (1 bit per pixel)
pub struct DisplayBuffer {
    /// Pixel data (128x64 / 8 = 1024 bytes)
    buffer: [u8; 1024],
}

impl DisplayBuffer {
    /// Create a new empty display buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: [0; 1024] }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set a pixel
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return;
        }

        let byte_idx = (y / 8 * DISPLAY_WIDTH + x) as usize;
        let bit = 1 << (y % 8);

        if on {
            self.buffer[byte_idx] |= bit;
        } else {
            self.buffer[byte_idx] &= !bit;
        }
    }

    /// Get the raw buffer
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Implement `DrawTarget` for embedded-graphics
impl DrawTarget for DisplayBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.x < DISPLAY_WIDTH as i32
                && coord.y >= 0
                && coord.y < DISPLAY_HEIGHT as i32
            {
                self.set_pixel(coord.x as u32, coord.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for DisplayBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

/// SSD1306 panel driver
///
/// Shares the I2C bus with the synthesizer and the EEPROM, so every
/// operation borrows the bus instead of owning it.
pub struct Display {
    buffer: DisplayBuffer,
}

impl Display {
    /// Create a new display driver
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: DisplayBuffer::new(),
        }
    }

    /// Initialize the display
    pub async fn init(&mut self, bus: &mut I2cBus<'_>) -> I2cResult<()> {
        // Initialization sequence for SSD1306 128x64
        let init_cmds = [
            cmd::DISPLAY_OFF,
            cmd::SET_DISPLAY_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MULTIPLEX,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::MEMORY_MODE,
            0x00, // Horizontal addressing
            cmd::SEG_REMAP | 0x01,
            cmd::COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_ALL_ON_RESUME,
            cmd::NORMAL_DISPLAY,
            cmd::DISPLAY_ON,
        ];

        for &c in &init_cmds {
            self.send_command(bus, c).await?;
        }

        // Clear the display
        self.buffer.clear();
        self.flush(bus).await?;

        Ok(())
    }

    /// Send a command to the display
    async fn send_command(&mut self, bus: &mut I2cBus<'_>, cmd: u8) -> I2cResult<()> {
        bus.write(I2cAddress::SSD1306, &[0x00, cmd]).await
    }

    /// Flush the buffer to the display
    pub async fn flush(&mut self, bus: &mut I2cBus<'_>) -> I2cResult<()> {
        // Set column address
        self.send_command(bus, cmd::COLUMN_ADDR).await?;
        self.send_command(bus, 0).await?;
        self.send_command(bus, 127).await?;

        // Set page address
        self.send_command(bus, cmd::PAGE_ADDR).await?;
        self.send_command(bus, 0).await?;
        self.send_command(bus, 7).await?;

        // Send data in chunks (I2C buffer limit)
        let data = self.buffer.as_bytes();
        for chunk in data.chunks(32) {
            let mut buf = [0u8; 33];
            buf[0] = 0x40; // Data mode
            buf[1..=chunk.len()].copy_from_slice(chunk);
            bus.write(I2cAddress::SSD1306, &buf[..=chunk.len()]).await?;
        }

        Ok(())
    }

    /// Clear the local buffer
    ///
    /// Takes effect on the panel with the next flush.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Show the startup banner
    pub async fn banner(&mut self, bus: &mut I2cBus<'_>) -> I2cResult<()> {
        self.buffer.clear();

        let title = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let _ = Text::with_baseline("VFO", Point::new(49, 16), title, Baseline::Top)
            .draw(&mut self.buffer);

        let mut version: String<12> = String::new();
        let _ = write!(version, "v{}", env!("CARGO_PKG_VERSION"));
        let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let _ = Text::with_baseline(&version, Point::new(46, 42), small, Baseline::Top)
            .draw(&mut self.buffer);

        self.flush(bus).await
    }

    /// Redraw the fields the diff marks stale and push the frame
    ///
    /// A diff with no change set does not touch the bus. A step change
    /// redraws the frequency field too, because the cursor underline
    /// lives there.
    pub async fn redraw(
        &mut self,
        bus: &mut I2cBus<'_>,
        band: Band,
        frequency: Frequency,
        step: StepSize,
        diff: FieldDiff,
    ) -> I2cResult<()> {
        if !diff.any() {
            return Ok(());
        }

        if diff.band {
            render_band(&mut self.buffer, band);
        }

        if diff.step {
            render_step(&mut self.buffer, step);
        }

        if diff.frequency || diff.step {
            render_frequency(&mut self.buffer, frequency, step);
        }

        self.flush(bus).await
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank one field before its redraw
fn clear_field(buffer: &mut DisplayBuffer, field: Rectangle) {
    let _ = field
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(buffer);
}

/// Render the band label
fn render_band(buffer: &mut DisplayBuffer, band: Band) {
    clear_field(buffer, BAND_FIELD);

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let _ = Text::with_baseline(band.label(), Point::new(0, 0), style, Baseline::Top).draw(buffer);
}

/// Render the step legend
fn render_step(buffer: &mut DisplayBuffer, step: StepSize) {
    clear_field(buffer, STEP_FIELD);

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let _ = Text::with_baseline(step.label(), Point::new(92, 0), style, Baseline::Top).draw(buffer);
}

/// Render the frequency readout and the cursor underline
fn render_frequency(buffer: &mut DisplayBuffer, frequency: Frequency, step: StepSize) {
    clear_field(buffer, FREQUENCY_FIELD);

    let text = format_frequency(frequency);
    let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let _ = Text::with_baseline(&text, Point::new(14, 22), style, Baseline::Top).draw(buffer);

    let column = i32::from(cursor_column(step));
    let underline = Rectangle::new(Point::new(14 + 10 * column, 44), Size::new(10, 2));
    let _ = underline
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(buffer);
}
