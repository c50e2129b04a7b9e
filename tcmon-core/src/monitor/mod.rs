//! Per-cycle monitor pipeline
//!
//! One cycle reads the thermocouple and the ambient sensor, pushes both
//! readings through their moving averages and applies ambient
//! compensation. A fault on either channel skips filtering for the cycle
//! so bad samples never enter the windows.

mod screen;

pub use screen::{format_lines, render, render_splash, Line, LINE_CAPACITY, SPLASH_LINES};

use crate::config::{ConfigError, MonitorConfig};
use crate::signal::{Compensation, MovingAverage};
use crate::traits::{SensorError, TemperatureSensor};

/// Outcome of one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Both channels produced a sample
    Valid {
        /// Filtered thermocouple temperature (°C)
        thermocouple_c: f32,
        /// Filtered ambient temperature (°C)
        ambient_c: f32,
        /// Thermocouple temperature after ambient compensation (°C)
        compensated_c: f32,
    },
    /// A channel failed this cycle
    Fault(SensorError),
}

impl Reading {
    /// Check whether this cycle produced a temperature
    pub fn is_valid(&self) -> bool {
        matches!(self, Reading::Valid { .. })
    }

    /// Compensated temperature, if the cycle was valid
    pub fn compensated_c(&self) -> Option<f32> {
        match self {
            Reading::Valid { compensated_c, .. } => Some(*compensated_c),
            Reading::Fault(_) => None,
        }
    }
}

/// Filter state for both channels plus the compensation stage
#[derive(Debug, Clone)]
pub struct Monitor {
    thermocouple: MovingAverage,
    ambient: MovingAverage,
    compensation: Compensation,
}

impl Monitor {
    /// Create a monitor with the given window length and compensation
    pub fn new(window: usize, compensation: Compensation) -> Result<Self, ConfigError> {
        let filter = MovingAverage::new(window).ok_or(ConfigError::InvalidWindow)?;
        Ok(Self {
            thermocouple: filter.clone(),
            ambient: filter,
            compensation,
        })
    }

    /// Create a monitor from the loaded configuration
    pub fn from_config(config: &MonitorConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.filter.window as usize,
            config.compensation.compensation(),
        )
    }

    /// Read both sensors and process the samples
    ///
    /// The thermocouple is read first, then the ambient sensor. Both are
    /// always read so conversion timing stays regular on the sensor side.
    pub fn poll<T, A>(&mut self, thermocouple: &mut T, ambient: &mut A) -> Reading
    where
        T: TemperatureSensor,
        A: TemperatureSensor,
    {
        let tc = thermocouple.read_celsius();
        let amb = ambient.read_celsius();
        self.process(tc, amb)
    }

    /// Process one pair of raw samples
    pub fn process(
        &mut self,
        thermocouple: Result<f32, SensorError>,
        ambient: Result<f32, SensorError>,
    ) -> Reading {
        let (tc, amb) = match (thermocouple, ambient) {
            (Ok(tc), Ok(amb)) => (tc, amb),
            (Err(e), _) | (_, Err(e)) => return Reading::Fault(e),
        };

        let thermocouple_c = self.thermocouple.push(tc);
        let ambient_c = self.ambient.push(amb);

        Reading::Valid {
            thermocouple_c,
            ambient_c,
            compensated_c: self.compensation.apply(thermocouple_c, ambient_c),
        }
    }

    /// Discard all buffered samples
    pub fn reset(&mut self) {
        self.thermocouple.reset();
        self.ambient.reset();
    }

    /// Number of samples currently averaged per channel
    pub fn samples(&self) -> usize {
        self.thermocouple.len()
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            thermocouple: MovingAverage::default(),
            ambient: MovingAverage::default(),
            compensation: Compensation::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSensor {
        readings: &'static [Result<f32, SensorError>],
        next: usize,
    }

    impl FixedSensor {
        fn new(readings: &'static [Result<f32, SensorError>]) -> Self {
            Self { readings, next: 0 }
        }
    }

    impl TemperatureSensor for FixedSensor {
        fn read_celsius(&mut self) -> Result<f32, SensorError> {
            let reading = self.readings[self.next];
            self.next += 1;
            reading
        }
    }

    fn compensated(reading: Reading) -> f32 {
        reading.compensated_c().unwrap()
    }

    #[test]
    fn test_three_cycle_scenario() {
        let mut monitor = Monitor::new(5, Compensation::default()).unwrap();
        let cycles = [
            ((100.0, 24.0), (100.0, 24.0, 99.0)),
            ((102.0, 25.0), (101.0, 24.5, 100.5)),
            ((98.0, 26.0), (100.0, 25.0, 100.0)),
        ];

        for ((tc, amb), (thermocouple_c, ambient_c, compensated_c)) in cycles {
            assert_eq!(
                monitor.process(Ok(tc), Ok(amb)),
                Reading::Valid {
                    thermocouple_c,
                    ambient_c,
                    compensated_c,
                }
            );
        }
    }

    #[test]
    fn test_rejects_unsupported_window() {
        assert_eq!(
            Monitor::new(0, Compensation::default()).err(),
            Some(ConfigError::InvalidWindow)
        );
        assert_eq!(
            Monitor::new(40, Compensation::default()).err(),
            Some(ConfigError::InvalidWindow)
        );

        let mut config = MonitorConfig::new();
        config.filter.window = 33;
        assert_eq!(
            Monitor::from_config(&config).err(),
            Some(ConfigError::InvalidWindow)
        );
    }

    #[test]
    fn test_valid_reading_carries_filtered_channels() {
        let mut monitor = Monitor::default();
        monitor.process(Ok(100.0), Ok(24.0));
        let reading = monitor.process(Ok(102.0), Ok(26.0));

        assert_eq!(
            reading,
            Reading::Valid {
                thermocouple_c: 101.0,
                ambient_c: 25.0,
                compensated_c: 101.0,
            }
        );
    }

    #[test]
    fn test_fault_skips_filtering() {
        let mut monitor = Monitor::default();
        monitor.process(Ok(100.0), Ok(25.0));

        let reading = monitor.process(Err(SensorError::OpenCircuit), Ok(30.0));
        assert_eq!(reading, Reading::Fault(SensorError::OpenCircuit));
        assert_eq!(monitor.samples(), 1);

        // Ambient sample from the faulted cycle never entered the window
        assert_eq!(compensated(monitor.process(Ok(100.0), Ok(25.0))), 100.0);
    }

    #[test]
    fn test_ambient_failure_is_fault() {
        let mut monitor = Monitor::default();
        let reading = monitor.process(Ok(100.0), Err(SensorError::ConversionError));
        assert_eq!(reading, Reading::Fault(SensorError::ConversionError));
        assert_eq!(monitor.samples(), 0);
    }

    #[test]
    fn test_poll_reads_both_sensors() {
        static TC: [Result<f32, SensorError>; 2] = [Ok(50.0), Err(SensorError::OpenCircuit)];
        static AMB: [Result<f32, SensorError>; 2] = [Ok(27.0), Ok(27.0)];
        let mut tc = FixedSensor::new(&TC);
        let mut amb = FixedSensor::new(&AMB);
        let mut monitor = Monitor::default();

        assert_eq!(compensated(monitor.poll(&mut tc, &mut amb)), 52.0);
        assert!(!monitor.poll(&mut tc, &mut amb).is_valid());
        assert_eq!(amb.next, 2);
    }

    #[test]
    fn test_window_from_config() {
        let mut config = MonitorConfig::new();
        config.filter.window = 2;
        let mut monitor = Monitor::from_config(&config).unwrap();

        monitor.process(Ok(10.0), Ok(25.0));
        monitor.process(Ok(20.0), Ok(25.0));
        let reading = monitor.process(Ok(30.0), Ok(25.0));
        assert_eq!(compensated(reading), 25.0);
    }

    #[test]
    fn test_reset_clears_windows() {
        let mut monitor = Monitor::default();
        monitor.process(Ok(200.0), Ok(25.0));
        monitor.reset();
        assert_eq!(monitor.samples(), 0);
        assert_eq!(compensated(monitor.process(Ok(20.0), Ok(25.0))), 20.0);
    }
}
