//! HD44780 character LCD driver
//!
//! Drives the controller in 4-bit mode through a PCF8574 backpack. Every
//! command or data byte goes out as two nibble transactions, high nibble
//! first. Each nibble transaction is exactly two expander writes: one with
//! EN high, one with EN low. The controller latches on the falling edge.
//!
//! Protocol delays are minimums from the controller datasheet and are
//! never shortened.

use embedded_hal::delay::DelayNs;
use tcmon_core::config::DisplayHwConfig;
use tcmon_core::traits::CharacterDisplay;

use super::bus::NibbleBus;
use super::pcf8574::{control_byte, Register, EN};

/// HD44780 instructions
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

    // Shift flags
    pub const DISPLAY_MOVE: u8 = 0x08;
    pub const MOVE_RIGHT: u8 = 0x04;
    pub const MOVE_LEFT: u8 = 0x00;

    // Function set flags
    pub const MODE_8BIT: u8 = 0x10;
    pub const MODE_4BIT: u8 = 0x00;
    pub const LINES_2: u8 = 0x08;
    pub const LINES_1: u8 = 0x00;
    pub const DOTS_5X10: u8 = 0x04;
    pub const DOTS_5X8: u8 = 0x00;

    // Reset nibbles used during 4-bit initialization
    pub const INIT_8BIT_NIBBLE: u8 = 0x30;
    pub const INIT_4BIT_NIBBLE: u8 = 0x20;
}

/// DDRAM address of the first column of each row
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// EN high time (µs)
pub const ENABLE_PULSE_HOLD_US: u32 = 1;

/// Settle time after EN falls (µs)
pub const COMMAND_SETTLE_US: u32 = 50;

/// Wait after the first and second reset nibbles (ms)
pub const INIT_RESET_DELAY_MS: u32 = 5;

/// Wait after the third reset nibble (ms)
pub const INIT_FINAL_DELAY_MS: u32 = 1;

/// Clear display execution time (ms)
pub const POST_CLEAR_DELAY_MS: u32 = 2;

/// Return home execution time (ms)
pub const POST_HOME_DELAY_MS: u32 = 2;

/// Display-control flags, re-sent together on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl(u8);

impl DisplayControl {
    /// Display contents visible
    pub const DISPLAY_ON: Self = Self(0x04);
    /// Underline cursor visible
    pub const CURSOR_ON: Self = Self(0x02);
    /// Block cursor blinking
    pub const BLINK_ON: Self = Self(0x01);

    /// No flags set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw flag bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every bit of `flag` is set
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Set or clear `flag`
    pub fn set(&mut self, flag: Self, on: bool) {
        if on {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }
}

impl Default for DisplayControl {
    /// Display on, cursor off, blink off
    fn default() -> Self {
        Self::DISPLAY_ON
    }
}

impl core::ops::BitOr for DisplayControl {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Everything the protocol needs to know about the attached display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// 7-bit expander address
    pub address: u8,
    /// Character columns
    pub columns: u8,
    /// Character rows
    pub rows: u8,
    /// Backlight bit carried in every expander write
    pub backlight: bool,
    /// Current display-control flags
    pub control: DisplayControl,
}

impl DisplayState {
    /// Initial state for a configured display
    pub fn from_config(config: &DisplayHwConfig) -> Self {
        Self {
            address: config.i2c_address,
            columns: config.columns,
            rows: config.rows,
            backlight: config.backlight,
            control: DisplayControl::default(),
        }
    }
}

/// One nibble transaction: EN high, hold, EN low, settle
fn write_nibble<B: NibbleBus, D: DelayNs>(
    bus: &mut B,
    delay: &mut D,
    state: &DisplayState,
    nibble: u8,
    register: Register,
) -> Result<(), B::Error> {
    let byte = control_byte(nibble, register, state.backlight);
    bus.write_control(state.address, byte | EN)?;
    delay.delay_us(ENABLE_PULSE_HOLD_US);
    bus.write_control(state.address, byte)?;
    delay.delay_us(COMMAND_SETTLE_US);
    Ok(())
}

/// Send a full byte as two nibbles, high nibble first
fn send<B: NibbleBus, D: DelayNs>(
    bus: &mut B,
    delay: &mut D,
    state: &DisplayState,
    value: u8,
    register: Register,
) -> Result<(), B::Error> {
    write_nibble(bus, delay, state, value, register)?;
    write_nibble(bus, delay, state, value << 4, register)
}

/// DDRAM address command for a cursor position
///
/// Rows past the offset table wrap around it.
pub fn cursor_address(col: u8, row: u8) -> u8 {
    let offset = ROW_OFFSETS[row as usize % ROW_OFFSETS.len()];
    cmd::SET_DDRAM_ADDR | col.wrapping_add(offset)
}

/// HD44780 display behind a PCF8574 expander
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    state: DisplayState,
}

impl<B, D> Hd44780<B, D>
where
    B: NibbleBus,
    D: DelayNs,
{
    /// Create a driver without touching the bus
    ///
    /// Call [`init`](Self::init) before anything else.
    pub fn new(bus: B, delay: D, config: &DisplayHwConfig) -> Self {
        Self {
            bus,
            delay,
            state: DisplayState::from_config(config),
        }
    }

    /// Put the controller into 4-bit, 2-line mode and clear it
    pub fn init(&mut self) -> Result<(), B::Error> {
        self.reset_nibble(cmd::INIT_8BIT_NIBBLE, INIT_RESET_DELAY_MS)?;
        self.reset_nibble(cmd::INIT_8BIT_NIBBLE, INIT_RESET_DELAY_MS)?;
        self.reset_nibble(cmd::INIT_8BIT_NIBBLE, INIT_FINAL_DELAY_MS)?;
        write_nibble(
            &mut self.bus,
            &mut self.delay,
            &self.state,
            cmd::INIT_4BIT_NIBBLE,
            Register::Instruction,
        )?;

        self.command(cmd::FUNCTION_SET | cmd::MODE_4BIT | cmd::LINES_2 | cmd::DOTS_5X8)?;
        self.send_control()?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)
    }

    fn reset_nibble(&mut self, nibble: u8, wait_ms: u32) -> Result<(), B::Error> {
        write_nibble(
            &mut self.bus,
            &mut self.delay,
            &self.state,
            nibble,
            Register::Instruction,
        )?;
        self.delay.delay_ms(wait_ms);
        Ok(())
    }

    /// Send an instruction byte
    pub fn command(&mut self, value: u8) -> Result<(), B::Error> {
        send(
            &mut self.bus,
            &mut self.delay,
            &self.state,
            value,
            Register::Instruction,
        )
    }

    /// Send a data byte (character code or CGRAM row)
    pub fn write_data(&mut self, value: u8) -> Result<(), B::Error> {
        send(
            &mut self.bus,
            &mut self.delay,
            &self.state,
            value,
            Register::Data,
        )
    }

    /// Clear the screen and home the cursor
    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(POST_CLEAR_DELAY_MS);
        Ok(())
    }

    /// Home the cursor and undo any display shift
    pub fn home(&mut self) -> Result<(), B::Error> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_ms(POST_HOME_DELAY_MS);
        Ok(())
    }

    /// Move the cursor
    ///
    /// The configured row count is not checked. Row indices past the
    /// controller's four rows wrap around.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), B::Error> {
        self.command(cursor_address(col, row))
    }

    /// Write text at the cursor
    ///
    /// Characters outside the single-byte range are shown as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), B::Error> {
        for ch in text.chars() {
            let code = u8::try_from(u32::from(ch)).unwrap_or(b'?');
            self.write_data(code)?;
        }
        Ok(())
    }

    /// Store a 5x8 glyph in CGRAM slot `location` (0-7)
    ///
    /// The cursor is moved back to the top-left afterwards since the
    /// controller stays in CGRAM addressing until told otherwise.
    pub fn create_char(&mut self, location: u8, pattern: &[u8; 8]) -> Result<(), B::Error> {
        self.command(cmd::SET_CGRAM_ADDR | ((location & 0x07) << 3))?;
        for &row in pattern {
            self.write_data(row)?;
        }
        self.set_cursor(0, 0)
    }

    /// Shift the whole display one position left
    pub fn scroll_display_left(&mut self) -> Result<(), B::Error> {
        self.command(cmd::CURSOR_SHIFT | cmd::DISPLAY_MOVE | cmd::MOVE_LEFT)
    }

    /// Shift the whole display one position right
    pub fn scroll_display_right(&mut self) -> Result<(), B::Error> {
        self.command(cmd::CURSOR_SHIFT | cmd::DISPLAY_MOVE | cmd::MOVE_RIGHT)
    }

    /// Show the display contents
    pub fn display(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::DISPLAY_ON, true)
    }

    /// Blank the display without losing its contents
    pub fn no_display(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::DISPLAY_ON, false)
    }

    /// Show the underline cursor
    pub fn cursor(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::CURSOR_ON, true)
    }

    /// Hide the underline cursor
    pub fn no_cursor(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::CURSOR_ON, false)
    }

    /// Blink the block cursor
    pub fn blink(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::BLINK_ON, true)
    }

    /// Stop blinking the block cursor
    pub fn no_blink(&mut self) -> Result<(), B::Error> {
        self.update_control(DisplayControl::BLINK_ON, false)
    }

    fn update_control(&mut self, flag: DisplayControl, on: bool) -> Result<(), B::Error> {
        self.state.control.set(flag, on);
        self.send_control()
    }

    fn send_control(&mut self) -> Result<(), B::Error> {
        self.command(cmd::DISPLAY_CONTROL | self.state.control.bits())
    }

    /// Turn the backlight on
    pub fn backlight_on(&mut self) -> Result<(), B::Error> {
        self.state.backlight = true;
        self.bus.write_control(self.state.address, control_byte(0, Register::Instruction, true))
    }

    /// Turn the backlight off
    pub fn backlight_off(&mut self) -> Result<(), B::Error> {
        self.state.backlight = false;
        self.bus.write_control(self.state.address, control_byte(0, Register::Instruction, false))
    }

    /// Current driver state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> CharacterDisplay for Hd44780<B, D>
where
    B: NibbleBus,
    D: DelayNs,
{
    type Error = B::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        Hd44780::clear(self)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        Hd44780::set_cursor(self, col, row)
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        Hd44780::print(self, text)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.backlight_on()
        } else {
            self.backlight_off()
        }
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_control(DisplayControl::DISPLAY_ON, on)
    }

    fn set_cursor_visible(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_control(DisplayControl::CURSOR_ON, on)
    }

    fn set_blink(&mut self, on: bool) -> Result<(), Self::Error> {
        self.update_control(DisplayControl::BLINK_ON, on)
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.state.columns, self.state.rows)
    }
}
