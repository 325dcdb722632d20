//! VFO Main Application
//!
//! Entry point for the STM32G474-based VFO firmware. Brings up the
//! hardware, restores the last tuning state from EEPROM, then runs the
//! control loop that ties the button ladder, the tuning encoder, the
//! synthesizer, the panel and the autosave policy together.

#![no_std]
#![no_main]

use defmt::{info, warn, Debug2Format};
use embassy_executor::Spawner;
use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use vfo_firmware::config::{
    BANNER_HOLD_MS, CONTROL_TICK_MS, EEPROM_STATE_ADDR, I2C_FREQUENCY_HZ, TUNE_QUEUE_DEPTH,
};
use vfo_firmware::drivers::display::Display;
use vfo_firmware::drivers::eeprom::Eeprom;
use vfo_firmware::drivers::si5351::{ClockOutput, CrystalLoad, DriveStrength, Si5351};
use vfo_firmware::hal::adc::ButtonAdc;
use vfo_firmware::hal::i2c::I2cBus;
use vfo_firmware::input::buttons::ButtonClassifier;
use vfo_firmware::input::encoder::QuadratureDecoder;
use vfo_firmware::tuner::state::{Command, Tuner};
use vfo_firmware::tuner::store::{Autosave, Snapshot, SNAPSHOT_LEN};
use vfo_firmware::types::Direction;
use vfo_firmware::ui::PanelState;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Encoder detents decoded at the interrupt boundary, consumed by the
/// control loop
static TUNE_EVENTS: Channel<ThreadModeRawMutex, Direction, TUNE_QUEUE_DEPTH> = Channel::new();

/// Wrapping millisecond clock for mutation stamps and the autosave window
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("VFO Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED (PA5 on Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // I2C1, shared by the Si5351A, the display and the EEPROM
    // PB8 = SCL, PB9 = SDA for I2C1 on STM32G474
    let mut bus = I2cBus::new(I2c::new(
        p.I2C1,
        p.PB8, // SCL
        p.PB9, // SDA
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    ));

    info!("I2C1 initialized at {}Hz", I2C_FREQUENCY_HZ);

    // Tuning knob on EXTI edges; the decoder lives in the edge task
    let encoder_a = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    let encoder_b = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up);

    // Button ladder on ADC1 (PB0 = ADC1_IN15)
    let mut adc = ButtonAdc::new(p.ADC1);
    adc.configure();
    let mut ladder = p.PB0;

    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(encoder_task(encoder_a, encoder_b)).unwrap();

    // Bring up the panel and show the banner
    let mut display = Display::new();
    match display.init(&mut bus).await {
        Ok(()) => {
            if let Err(e) = display.banner(&mut bus).await {
                warn!("banner failed: {}", Debug2Format(&e));
            }
            Timer::after_millis(BANNER_HOLD_MS).await;
            display.clear();
        }
        Err(e) => warn!("display init failed: {}", Debug2Format(&e)),
    }

    // Restore the last tuning state
    let mut eeprom = Eeprom::new();
    let mut tuner = {
        let mut image = [0u8; SNAPSHOT_LEN];
        match eeprom.read_block(&mut bus, EEPROM_STATE_ADDR, &mut image).await {
            Ok(()) => Tuner::from(Snapshot::from_bytes(&image)),
            Err(e) => {
                warn!("stored state unreadable, using defaults: {}", Debug2Format(&e));
                Tuner::new()
            }
        }
    };
    info!("restored {}", tuner);

    // Bring up the synthesizer on the restored dial
    let mut synth = Si5351::new();
    if let Err(e) = synth.init(&mut bus, CrystalLoad::Load10pF).await {
        warn!("synthesizer init failed: {}", Debug2Format(&e));
    }
    if let Err(e) = synth
        .set_frequency(
            &mut bus,
            ClockOutput::Clk0,
            tuner.vfo_frequency(),
            DriveStrength::Drive8mA,
        )
        .await
    {
        warn!("synthesizer update failed: {}", Debug2Format(&e));
    }
    if let Err(e) = synth.enable(&mut bus, ClockOutput::Clk0).await {
        warn!("synthesizer enable failed: {}", Debug2Format(&e));
    }

    let mut classifier = ButtonClassifier::default();
    let mut panel = PanelState::new();
    let autosave = Autosave::default();

    info!("entering control loop");

    loop {
        Timer::after_millis(CONTROL_TICK_MS).await;
        let now = now_ms();

        // Persist once the quiescence window has passed
        if let Some(snapshot) = autosave.poll(&mut tuner, now) {
            match eeprom
                .write_block(&mut bus, EEPROM_STATE_ADDR, &snapshot.to_bytes())
                .await
            {
                Ok(()) => info!("tuning state saved"),
                Err(e) => warn!("tuning state save failed: {}", Debug2Format(&e)),
            }
        }

        // Redraw the panel fields that changed
        let settings = *tuner.current_settings();
        let diff = panel.diff(tuner.current_index(), settings.frequency, settings.step);
        if let Err(e) = display
            .redraw(
                &mut bus,
                tuner.current_band(),
                settings.frequency,
                settings.step,
                diff,
            )
            .await
        {
            warn!("panel redraw failed: {}", Debug2Format(&e));
        }

        // The synthesizer follows the dial; an unchanged dial is a no-op
        if let Err(e) = synth
            .set_frequency(
                &mut bus,
                ClockOutput::Clk0,
                tuner.vfo_frequency(),
                DriveStrength::Drive8mA,
            )
            .await
        {
            warn!("synthesizer update failed: {}", Debug2Format(&e));
        }

        // One ladder sample per tick
        let reading = adc.read(&mut ladder);
        if let Some(button) = classifier.feed(reading.scaled()) {
            let command = Command::from(button);
            info!("{}", command);
            tuner.apply(command, now);
        }

        // Drain the detents queued since the last tick
        while let Ok(direction) = TUNE_EVENTS.try_receive() {
            tuner.nudge(direction, now);
        }
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}

/// Encoder edge task
///
/// The contacts switch the lines to ground, so levels are read inverted
/// before decoding. Completed detents are queued for the control loop;
/// a full queue drops the detent and logs it.
#[embassy_executor::task]
async fn encoder_task(mut a: ExtiInput<'static>, mut b: ExtiInput<'static>) {
    let mut decoder = QuadratureDecoder::new();
    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        if let Some(direction) = decoder.update(a.is_low(), b.is_low()) {
            if TUNE_EVENTS.try_send(direction).is_err() {
                warn!("tune queue full, dropping {}", direction);
            }
        }
    }
}
