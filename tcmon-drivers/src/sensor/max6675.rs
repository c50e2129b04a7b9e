//! MAX6675 K-type thermocouple converter
//!
//! The chip exposes a read-only SPI-like interface. It is bit-banged here
//! so any three GPIOs can be used.
//!
//! Output word, MSB first:
//!
//! | 15    | 14..3            | 2          | 1         | 0     |
//! |-------|------------------|------------|-----------|-------|
//! | dummy | temperature/0.25 | open input | device ID | state |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use tcmon_core::traits::{SensorError, TemperatureSensor};

/// Wait between CS falling and the first clock edge (ms)
///
/// Pulling CS low aborts any conversion in progress.
pub const CONVERSION_SETTLE_MS: u32 = 1;

/// Bits per output word
const WORD_BITS: u32 = 16;

/// Set when no thermocouple is connected
const OPEN_INPUT_BIT: u16 = 1 << 2;

/// Degrees per LSB of the temperature field
const DEGREES_PER_LSB: f32 = 0.25;

/// Decode a raw output word
pub fn decode(word: u16) -> Result<f32, SensorError> {
    if word & OPEN_INPUT_BIT != 0 {
        return Err(SensorError::OpenCircuit);
    }
    Ok((word >> 3) as f32 * DEGREES_PER_LSB)
}

/// Bit-banged MAX6675
pub struct Max6675<CS, SCK, SO, D> {
    cs: CS,
    sck: SCK,
    so: SO,
    delay: D,
}

impl<CS, SCK, SO, D> Max6675<CS, SCK, SO, D>
where
    CS: OutputPin,
    SCK: OutputPin,
    SO: InputPin,
    D: DelayNs,
{
    /// Create the driver
    ///
    /// CS should already idle high; SCK should idle low.
    pub fn new(cs: CS, sck: SCK, so: SO, delay: D) -> Self {
        Self { cs, sck, so, delay }
    }

    /// Clock out one 16-bit word
    ///
    /// CS is raised again even if a pin operation fails.
    pub fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.cs.set_low().map_err(|_| SensorError::ConversionError)?;
        self.delay.delay_ms(CONVERSION_SETTLE_MS);

        let word = self.shift_in();

        let released = self.cs.set_high().map_err(|_| SensorError::ConversionError);
        let word = word?;
        released?;
        Ok(word)
    }

    fn shift_in(&mut self) -> Result<u16, SensorError> {
        let mut value: u16 = 0;
        for _ in 0..WORD_BITS {
            self.sck.set_high().map_err(|_| SensorError::ConversionError)?;
            value <<= 1;
            if self.so.is_high().map_err(|_| SensorError::ConversionError)? {
                value |= 1;
            }
            self.sck.set_low().map_err(|_| SensorError::ConversionError)?;
        }
        Ok(value)
    }

    /// Give back the pins and delay
    pub fn release(self) -> (CS, SCK, SO, D) {
        (self.cs, self.sck, self.so, self.delay)
    }
}

impl<CS, SCK, SO, D> TemperatureSensor for Max6675<CS, SCK, SO, D>
where
    CS: OutputPin,
    SCK: OutputPin,
    SO: InputPin,
    D: DelayNs,
{
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        decode(self.read_raw()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{new_log, Event, Log, MockDelay, MockInput, MockOutput};

    type TestSensor<'a> = Max6675<MockOutput<'a>, MockOutput<'a>, MockInput<'a>, MockDelay<'a>>;

    fn sensor(log: &Log, word: u16) -> TestSensor<'_> {
        Max6675::new(
            MockOutput { log, event: Event::Cs },
            MockOutput { log, event: Event::Sck },
            MockInput::new(log, word),
            MockDelay { log },
        )
    }

    #[test]
    fn test_decode_temperature() {
        assert_eq!(decode(0b0000_0001_1000_0000), Ok(12.0));
        assert_eq!(decode(0), Ok(0.0));
        // 1023.75 °C, the top of the range
        assert_eq!(decode(0x7FF8), Ok(1023.75));
    }

    #[test]
    fn test_decode_open_circuit() {
        assert_eq!(decode(0b0000_0001_1000_0100), Err(SensorError::OpenCircuit));
        assert_eq!(decode(0x0004), Err(SensorError::OpenCircuit));
    }

    #[test]
    fn test_read_assembles_msb_first() {
        let log = new_log();
        let mut tc = sensor(&log, 0x1A38);
        assert_eq!(tc.read_raw(), Ok(0x1A38));
    }

    #[test]
    fn test_read_pin_sequence() {
        let log = new_log();
        let mut tc = sensor(&log, 0x0180);
        assert_eq!(tc.read_celsius(), Ok(12.0));

        let events = log.borrow();
        assert_eq!(&events[..2], &[Event::Cs(false), Event::Delay(1000)]);
        for bit in 0..16 {
            let start = 2 + bit * 3;
            assert_eq!(
                &events[start..start + 3],
                &[Event::Sck(true), Event::Sample, Event::Sck(false)]
            );
        }
        assert_eq!(events.len(), 2 + 16 * 3 + 1);
        assert_eq!(events.last(), Some(&Event::Cs(true)));
    }

    #[test]
    fn test_disconnected_probe() {
        let log = new_log();
        let mut tc = sensor(&log, 0x0004);
        assert_eq!(tc.read_celsius(), Err(SensorError::OpenCircuit));
        // One read is exactly one CS frame
        assert_eq!(log.borrow().len(), 2 + 16 * 3 + 1);
    }

    #[test]
    fn test_pin_failure_releases_cs() {
        let log = new_log();
        let mut tc = sensor(&log, 0x0180);
        tc.so.fail = true;

        assert_eq!(tc.read_celsius(), Err(SensorError::ConversionError));
        assert_eq!(log.borrow().last(), Some(&Event::Cs(true)));
    }
}
