//! Hardware configuration types
//!
//! These types define the hardware-level settings of the display
//! backpack and the analog ambient sensor.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest row count the controller's DDRAM layout supports
pub const MAX_ROWS: u8 = 4;

/// Largest column count the controller's DDRAM layout supports
pub const MAX_COLUMNS: u8 = 20;

/// First non-reserved 7-bit I2C address
pub const FIRST_I2C_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit I2C address
pub const LAST_I2C_ADDRESS: u8 = 0x77;

/// Character display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// 7-bit I2C address of the I/O expander backpack
    pub i2c_address: u8,
    /// Number of character columns
    pub columns: u8,
    /// Number of character rows
    pub rows: u8,
    /// Backlight state after initialization
    pub backlight: bool,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x27, // PCF8574 with A0-A2 pulled high
            columns: 16,
            rows: 2,
            backlight: true,
        }
    }
}

/// Analog ambient sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmbientHwConfig {
    /// ADC reference voltage in mV
    pub vref_mv: u16,
    /// Raw ADC value at the reference voltage (4095 for 12-bit)
    pub full_scale: u16,
}

impl Default for AmbientHwConfig {
    fn default() -> Self {
        Self {
            vref_mv: 3300,
            full_scale: 4095,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_defaults() {
        let display = DisplayHwConfig::default();
        assert_eq!(display.i2c_address, 0x27);
        assert_eq!((display.columns, display.rows), (16, 2));
        assert!(display.backlight);
    }

    #[test]
    fn test_ambient_defaults() {
        let ambient = AmbientHwConfig::default();
        assert_eq!(ambient.vref_mv, 3300);
        assert_eq!(ambient.full_scale, 4095);
    }
}
