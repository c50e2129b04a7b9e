//! Board-agnostic core logic for the thermocouple monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (temperature sensor, character display)
//! - Signal conditioning (moving average, ambient compensation)
//! - The per-cycle monitor pipeline and display line formatting
//! - Configuration type definitions and the config file parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod monitor;
pub mod signal;
pub mod traits;
