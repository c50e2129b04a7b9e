//! Character display trait
//!
//! This is the whole presentation surface the monitor loop may use.

/// Trait for character-cell displays (HD44780 and compatibles)
///
/// Bus failures surface as the implementation's own error type. No retry
/// happens at this layer.
pub trait CharacterDisplay {
    /// Error type of the underlying transport
    type Error;

    /// Clear the entire screen and return the cursor home
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-3)
    ///
    /// Rows beyond the configured row count are a caller error.
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text at the current cursor position
    ///
    /// Text is not wrapped. Characters past the last column land wherever
    /// the controller puts them.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Turn the backlight on or off
    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Show or blank the display contents
    fn set_display_on(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Show or hide the underline cursor
    fn set_cursor_visible(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Enable or disable the blinking block cursor
    fn set_blink(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

/// Helper trait for positioned text
pub trait CharacterDisplayExt: CharacterDisplay {
    /// Write text starting at a position
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), Self::Error> {
        self.set_cursor(col, row)?;
        self.print(text)
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay> CharacterDisplayExt for T {}
