//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tcmon-core for the monitor's hardware:
//!
//! - Character display (HD44780 over a PCF8574 I2C backpack)
//! - Thermocouple converter (MAX6675, bit-banged)
//! - Ambient sensor (LM35 on an ADC channel)
//! - I2C bus scan

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod i2c;
pub mod sensor;

#[cfg(test)]
mod mock;
