//! Configuration loading
//!
//! The configuration is compiled in from `monitor.toml` and parsed at
//! boot. build.rs has already run the same parser over it, so failures
//! here only happen if the two drift apart.

use defmt::*;

use tcmon_core::config::{parse_config, MonitorConfig};

/// Embedded configuration (compiled into firmware)
/// Edit monitor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../monitor.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to the reference device defaults if anything is wrong.
pub fn load() -> MonitorConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            return fallback();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Config: display 0x{=u8:x} {}x{}, window {}, cycle {} ms",
                config.display.i2c_address,
                config.display.columns,
                config.display.rows,
                config.filter.window,
                config.ui.cycle_ms
            );
            config
        }
        Err(e) => {
            error!("Embedded config rejected: {:?}", e);
            fallback()
        }
    }
}

fn fallback() -> MonitorConfig {
    warn!("Using built-in default configuration");
    MonitorConfig::default()
}
