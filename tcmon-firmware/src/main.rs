//! tcmon - Thermocouple Monitor Firmware
//!
//! Reads a K-type thermocouple through a MAX6675 and the cold junction
//! through an LM35, smooths both, applies ambient compensation and shows
//! the result on a 16x2 I2C character LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use tcmon_core::monitor::render_splash;
use tcmon_drivers::display::Hd44780;
use tcmon_drivers::i2c::scan;
use tcmon_drivers::sensor::Lm35;

use crate::board::Board;

mod adc;
mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("tcmon firmware starting...");

    let p = embassy_rp::init(Default::default());
    let Board {
        mut display_bus,
        thermocouple,
        ambient_input,
    } = Board::new(p);
    info!("Peripherals initialized");

    let config = config::load();

    info!("Scanning I2C bus...");
    let devices = scan(&mut display_bus);
    if devices.is_empty() {
        error!("No I2C devices found, check the display wiring");
        loop {
            Timer::after_secs(1).await;
        }
    }
    for address in &devices {
        info!("I2C device found at 0x{=u8:x}", *address);
    }
    if !devices.contains(&config.display.i2c_address) {
        warn!(
            "Nothing answered at display address 0x{=u8:x}",
            config.display.i2c_address
        );
    }

    let mut display = Hd44780::new(display_bus, Delay, &config.display);
    match display.init() {
        Ok(()) => info!("Display initialized"),
        Err(e) => error!("Display init failed: {:?}", e),
    }
    if let Err(e) = render_splash(&mut display) {
        warn!("Splash screen failed: {:?}", e);
    }
    Timer::after_millis(config.ui.splash_ms as u64).await;

    let ambient = Lm35::new(ambient_input, &config.ambient);

    tasks::monitor_loop(display, thermocouple, ambient, config).await
}
