//! Blocking ADC channel adapter

use embassy_rp::adc::{Adc, Blocking, Channel};
use tcmon_drivers::sensor::AdcReader;

/// One ADC input, owning the converter
///
/// The monitor only samples a single analog input, so the converter is
/// not shared.
pub struct AdcInput {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl AdcInput {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for AdcInput {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}
