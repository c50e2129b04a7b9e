//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    ///
    /// Reported by the thermocouple converter through its status bit.
    OpenCircuit,
    /// Pin or ADC read failed
    ConversionError,
}

/// Trait for temperature sensors
///
/// Implementations handle the specific sensor type (thermocouple converter,
/// analog ambient sensor, ...). A disconnected sensor is an expected outcome
/// and is reported as an error value, never as a numeric sentinel.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Takes `&mut self` because pin and ADC reads require mutable access.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}
