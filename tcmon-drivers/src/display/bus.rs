//! Expander write primitive
//!
//! The PCF8574 backpack latches whatever single byte it receives onto its
//! eight output lines. That is the only bus operation the display needs.

use embedded_hal::i2c::{ErrorType, I2c};

/// Writes one control byte to an expander
pub trait NibbleBus {
    /// Transport error
    type Error;

    /// Write a single byte to the device at `address`
    fn write_control(&mut self, address: u8, byte: u8) -> Result<(), Self::Error>;
}

impl<T: I2c> NibbleBus for T {
    type Error = <T as ErrorType>::Error;

    fn write_control(&mut self, address: u8, byte: u8) -> Result<(), <T as ErrorType>::Error> {
        self.write(address, &[byte])
    }
}
