//! I2C bus diagnostics

use embedded_hal::i2c::I2c;
use heapless::Vec;
use tcmon_core::config::{FIRST_I2C_ADDRESS, LAST_I2C_ADDRESS};

/// Most responders kept by [`scan`]
pub const MAX_DEVICES: usize = 16;

/// Probe every non-reserved address with a one-byte read
///
/// Returns the addresses that acknowledged, in ascending order. Any bus
/// error at an address counts as "nobody there".
pub fn scan<I: I2c>(i2c: &mut I) -> Vec<u8, MAX_DEVICES> {
    let mut found = Vec::new();
    let mut buf = [0u8; 1];

    for address in FIRST_I2C_ADDRESS..=LAST_I2C_ADDRESS {
        if i2c.read(address, &mut buf).is_ok() && found.push(address).is_err() {
            break;
        }
    }

    found
}
