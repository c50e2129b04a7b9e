//! Acquisition loop
//!
//! Once per cycle: read both sensors, filter, compensate, log, redraw.
//! Sensor reads and display writes are blocking and run to completion
//! inside the cycle.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tcmon_core::config::MonitorConfig;
use tcmon_core::monitor::{render, Monitor, Reading};

use crate::board::{Ambient, Display, Thermocouple};

/// Run the monitor forever
pub async fn monitor_loop(
    mut display: Display,
    mut thermocouple: Thermocouple,
    mut ambient: Ambient,
    config: MonitorConfig,
) -> ! {
    info!(
        "Monitor started (cycle {} ms, window {})",
        config.ui.cycle_ms, config.filter.window
    );

    let mut monitor = match Monitor::from_config(&config) {
        Ok(monitor) => monitor,
        Err(e) => {
            warn!("Filter config rejected: {:?}, using defaults", e);
            Monitor::default()
        }
    };
    let mut ticker = Ticker::every(Duration::from_millis(config.ui.cycle_ms as u64));

    loop {
        let reading = monitor.poll(&mut thermocouple, &mut ambient);

        match reading {
            Reading::Valid {
                compensated_c,
                ambient_c,
                ..
            } => {
                info!(
                    "Thermocouple: {=f32} C | Ambient: {=f32} C",
                    compensated_c, ambient_c
                );
            }
            Reading::Fault(e) => {
                warn!("Sensor fault: {:?}", e);
            }
        }

        if let Err(e) = render(&mut display, &reading) {
            warn!("Display write failed: {:?}", e);
        }

        ticker.next().await;
    }
}
