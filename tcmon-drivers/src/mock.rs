//! Recording HAL doubles for driver tests

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use heapless::Vec;

/// Something a driver did, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// One byte written to the bus
    Write(u8),
    /// Delay, in microseconds
    Delay(u32),
    /// Chip select driven (true = high)
    Cs(bool),
    /// Clock driven (true = high)
    Sck(bool),
    /// Data line sampled
    Sample,
}

pub type Log = RefCell<Vec<Event, 512>>;

pub fn new_log() -> Log {
    RefCell::new(Vec::new())
}

fn record(log: &Log, event: Event) {
    let _ = log.borrow_mut().push(event);
}

/// Bytes written to the bus, without delays
pub fn writes(log: &Log) -> Vec<u8, 512> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Write(b) => Some(*b),
            _ => None,
        })
        .collect()
}

/// I2C bus that logs writes and acknowledges reads from `present` addresses
pub struct MockI2c<'a> {
    pub log: &'a Log,
    pub present: &'static [u8],
    pub last_address: Option<u8>,
    pub fail: bool,
}

impl<'a> MockI2c<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self {
            log,
            present: &[],
            last_address: None,
            fail: false,
        }
    }
}

impl ErrorType for MockI2c<'_> {
    type Error = ErrorKind;
}

impl I2c for MockI2c<'_> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Bus);
        }
        self.last_address = Some(address);
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    for &b in bytes.iter() {
                        record(self.log, Event::Write(b));
                    }
                }
                Operation::Read(buf) => {
                    if !self.present.contains(&address) {
                        return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
                    }
                    buf.fill(0);
                }
            }
        }
        Ok(())
    }
}

/// Delay that logs requested durations instead of waiting
pub struct MockDelay<'a> {
    pub log: &'a Log,
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        record(self.log, Event::Delay(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        record(self.log, Event::Delay(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        record(self.log, Event::Delay(ms * 1000));
    }
}

/// Output pin that logs level changes
pub struct MockOutput<'a> {
    pub log: &'a Log,
    pub event: fn(bool) -> Event,
}

impl PinErrorType for MockOutput<'_> {
    type Error = Infallible;
}

impl OutputPin for MockOutput<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        record(self.log, (self.event)(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        record(self.log, (self.event)(true));
        Ok(())
    }
}

/// Input pin that plays back a 16-bit word MSB first
pub struct MockInput<'a> {
    pub log: &'a Log,
    pub word: u16,
    pub bit: u32,
    pub fail: bool,
}

impl<'a> MockInput<'a> {
    pub fn new(log: &'a Log, word: u16) -> Self {
        Self {
            log,
            word,
            bit: 0,
            fail: false,
        }
    }
}

impl PinErrorType for MockInput<'_> {
    type Error = PinFault;
}

impl InputPin for MockInput<'_> {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        if self.fail {
            return Err(PinFault);
        }
        record(self.log, Event::Sample);
        let high = self.word & (0x8000 >> (self.bit % 16)) != 0;
        self.bit += 1;
        Ok(high)
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        self.is_high().map(|h| !h)
    }
}

/// Pin error for failing reads
#[derive(Debug)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
