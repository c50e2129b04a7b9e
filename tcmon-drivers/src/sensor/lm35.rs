//! LM35 analog temperature sensor
//!
//! Linear output of 10 mV/°C with 0 V at 0 °C, read through an ADC
//! channel. Used for the thermocouple cold junction.

use tcmon_core::config::AmbientHwConfig;
use tcmon_core::traits::{SensorError, TemperatureSensor};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one raw sample (0..=full scale)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Degrees per volt of sensor output
const DEGREES_PER_VOLT: f32 = 100.0;

/// LM35 on an ADC channel
pub struct Lm35<ADC> {
    adc: ADC,
    /// Volts per ADC count
    volts_per_count: f32,
}

impl<ADC> Lm35<ADC> {
    /// Create a new LM35 sensor
    ///
    /// # Arguments
    /// - `adc`: ADC channel the sensor output is wired to
    /// - `config`: Reference voltage and full-scale count of that ADC
    pub fn new(adc: ADC, config: &AmbientHwConfig) -> Self {
        Self {
            adc,
            volts_per_count: config.vref_mv as f32 / 1000.0 / config.full_scale as f32,
        }
    }

    /// Convert a raw sample to °C
    pub fn sample_to_celsius(&self, sample: u16) -> f32 {
        sample as f32 * self.volts_per_count * DEGREES_PER_VOLT
    }
}

impl<ADC: AdcReader> TemperatureSensor for Lm35<ADC> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let sample = self.adc.read().map_err(|_| SensorError::ConversionError)?;
        Ok(self.sample_to_celsius(sample))
    }
}

/// Dummy ADC for testing (returns a fixed value, or fails on `None`)
#[cfg(test)]
pub struct DummyAdc(pub Option<u16>);

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.0.ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_reference_scaling() {
        let mut sensor = Lm35::new(DummyAdc(Some(310)), &AmbientHwConfig::default());
        // 310 * 3.3 / 4095 * 100 = 24.98 °C
        assert!(close(sensor.read_celsius().unwrap(), 24.982));
    }

    #[test]
    fn test_zero_and_full_scale() {
        let sensor = Lm35::new(DummyAdc(None), &AmbientHwConfig::default());
        assert_eq!(sensor.sample_to_celsius(0), 0.0);
        // Full scale is 3.3 V, which is 330 °C on paper
        assert!(close(sensor.sample_to_celsius(4095), 330.0));
    }

    #[test]
    fn test_custom_reference() {
        let config = AmbientHwConfig {
            vref_mv: 1000,
            full_scale: 1000,
        };
        let sensor = Lm35::new(DummyAdc(None), &config);
        // 1 mV per count: 250 counts = 250 mV = 25 °C
        assert!(close(sensor.sample_to_celsius(250), 25.0));
    }

    #[test]
    fn test_adc_failure() {
        let mut sensor = Lm35::new(DummyAdc(None), &AmbientHwConfig::default());
        assert_eq!(sensor.read_celsius(), Err(SensorError::ConversionError));
    }
}
