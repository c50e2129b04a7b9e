//! Character display drivers
//!
//! - HD44780 controller in 4-bit mode behind a PCF8574 I2C backpack

pub mod bus;
pub mod hd44780;
pub mod pcf8574;

pub use bus::NibbleBus;
pub use hd44780::{DisplayControl, DisplayState, Hd44780};
