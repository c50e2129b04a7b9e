//! Configuration type definitions
//!
//! These types represent the monitor configuration. Configuration is
//! compiled into the firmware as `monitor.toml` and parsed at boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::{
    AmbientHwConfig, DisplayHwConfig, FIRST_I2C_ADDRESS, LAST_I2C_ADDRESS, MAX_COLUMNS, MAX_ROWS,
};
use crate::signal::{Compensation, DEFAULT_WINDOW_LEN, MAX_WINDOW_LEN, REFERENCE_AMBIENT_C};

/// Shortest allowed acquisition cycle (ms)
///
/// One cycle clears and redraws the display, which alone takes a few
/// milliseconds of protocol delays.
pub const MIN_CYCLE_MS: u32 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// I2C address is reserved or not a 7-bit address
    InvalidAddress,
    /// Columns or rows outside what the controller can address
    InvalidDimensions,
    /// Filter window outside 1..=MAX_WINDOW_LEN
    InvalidWindow,
    /// Zero reference voltage or full-scale value
    InvalidAdcScale,
    /// Acquisition cycle shorter than MIN_CYCLE_MS
    CycleTooShort,
}

/// Moving average settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    /// Number of samples averaged per channel
    pub window: u8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW_LEN as u8,
        }
    }
}

/// Cold-junction compensation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompensationConfig {
    /// Reference ambient temperature (°C × 10)
    pub reference_ambient_x10: i16,
}

impl Default for CompensationConfig {
    fn default() -> Self {
        Self {
            reference_ambient_x10: (REFERENCE_AMBIENT_C * 10.0) as i16,
        }
    }
}

impl CompensationConfig {
    /// Build the compensation stage
    pub fn compensation(&self) -> Compensation {
        Compensation::from_x10(self.reference_ambient_x10)
    }
}

/// UI timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Period of one acquisition cycle (ms)
    pub cycle_ms: u32,
    /// How long the splash screen stays up at boot (ms)
    pub splash_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            cycle_ms: 500,
            splash_ms: 2000,
        }
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonitorConfig {
    /// Character display
    pub display: DisplayHwConfig,
    /// Analog ambient sensor
    pub ambient: AmbientHwConfig,
    /// Moving average
    pub filter: FilterConfig,
    /// Cold-junction compensation
    pub compensation: CompensationConfig,
    /// UI timing
    pub ui: UiConfig,
}

impl MonitorConfig {
    /// Create a configuration with the reference device defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is usable by the drivers
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(FIRST_I2C_ADDRESS..=LAST_I2C_ADDRESS).contains(&self.display.i2c_address) {
            return Err(ConfigError::InvalidAddress);
        }

        let columns_ok = (1..=MAX_COLUMNS).contains(&self.display.columns);
        let rows_ok = (1..=MAX_ROWS).contains(&self.display.rows);
        if !columns_ok || !rows_ok {
            return Err(ConfigError::InvalidDimensions);
        }

        if self.filter.window == 0 || self.filter.window as usize > MAX_WINDOW_LEN {
            return Err(ConfigError::InvalidWindow);
        }

        if self.ambient.vref_mv == 0 || self.ambient.full_scale == 0 {
            return Err(ConfigError::InvalidAdcScale);
        }

        if self.ui.cycle_ms < MIN_CYCLE_MS {
            return Err(ConfigError::CycleTooShort);
        }

        Ok(())
    }
}
