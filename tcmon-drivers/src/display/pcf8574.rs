//! PCF8574 backpack pin mapping
//!
//! The common HD44780 backpack wires the expander outputs as:
//!
//! | P7..P4  | P3        | P2 | P1 | P0 |
//! |---------|-----------|----|----|----|
//! | D7..D4  | backlight | EN | RW | RS |
//!
//! RW is never driven high; the display is write-only.

/// Register select (0 = instruction, 1 = data)
pub const RS: u8 = 0x01;

/// Read/write select
pub const RW: u8 = 0x02;

/// Enable strobe, latched on the falling edge
pub const EN: u8 = 0x04;

/// Backlight transistor
pub const BACKLIGHT: u8 = 0x08;

/// Data lines D7..D4
pub const DATA_MASK: u8 = 0xF0;

/// Which controller register a transfer targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register (RS = 0)
    Instruction,
    /// Data register (RS = 1)
    Data,
}

/// Build the expander byte for one nibble, with EN low
///
/// `nibble` is taken from the upper four bits.
pub const fn control_byte(nibble: u8, register: Register, backlight: bool) -> u8 {
    let mut byte = nibble & DATA_MASK;
    if let Register::Data = register {
        byte |= RS;
    }
    if backlight {
        byte |= BACKLIGHT;
    }
    byte
}
