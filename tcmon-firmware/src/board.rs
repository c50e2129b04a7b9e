//! Board wiring
//!
//! Pin assignments for the reference Raspberry Pi Pico build:
//!
//! | Function          | Pin    |
//! |-------------------|--------|
//! | LCD SDA (I2C0)    | GPIO4  |
//! | LCD SCL (I2C0)    | GPIO5  |
//! | MAX6675 SO        | GPIO16 |
//! | MAX6675 CS        | GPIO17 |
//! | MAX6675 SCK       | GPIO18 |
//! | LM35 out (ADC0)   | GPIO26 |

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::Peripherals;
use embassy_time::Delay;

use tcmon_drivers::display::Hd44780;
use tcmon_drivers::sensor::{Lm35, Max6675};

use crate::adc::AdcInput;

/// I2C clock for the display backpack (standard mode)
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// I2C bus shared by the scan and the display
pub type DisplayBus = I2c<'static, I2C0, Blocking>;

/// Character display
pub type Display = Hd44780<DisplayBus, Delay>;

/// Thermocouple converter
pub type Thermocouple = Max6675<Output<'static>, Output<'static>, Input<'static>, Delay>;

/// Ambient sensor
pub type Ambient = Lm35<AdcInput>;

/// Peripherals in the shape the drivers want them
pub struct Board {
    pub display_bus: DisplayBus,
    pub thermocouple: Thermocouple,
    pub ambient_input: AdcInput,
}

impl Board {
    /// Claim and configure everything the monitor uses
    pub fn new(p: Peripherals) -> Self {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let display_bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

        // CS idles high, SCK idles low
        let cs = Output::new(p.PIN_17, Level::High);
        let sck = Output::new(p.PIN_18, Level::Low);
        let so = Input::new(p.PIN_16, Pull::None);
        let thermocouple = Max6675::new(cs, sck, so, Delay);

        let adc = Adc::new_blocking(p.ADC, adc::Config::default());
        let channel = Channel::new_pin(p.PIN_26, Pull::None);

        Self {
            display_bus,
            thermocouple,
            ambient_input: AdcInput::new(adc, channel),
        }
    }
}
