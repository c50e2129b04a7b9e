//! Display line formatting
//!
//! Lines are formatted into fixed-capacity strings and then drawn on any
//! [`CharacterDisplay`]. Each cycle clears the screen before drawing.

use core::fmt::Write;

use heapless::String;

use super::Reading;
use crate::config::MAX_COLUMNS;
use crate::traits::{CharacterDisplay, CharacterDisplayExt, SensorError};

/// Capacity of one formatted line
pub const LINE_CAPACITY: usize = MAX_COLUMNS as usize;

/// One formatted display line
pub type Line = String<LINE_CAPACITY>;

/// Boot screen contents
pub const SPLASH_LINES: [&str; 2] = ["Starting...", "Thermocouple"];

/// Shown when the thermocouple reports an open input
const OPEN_CIRCUIT_LINE: &str = "Error: No Probe";

/// Shown when a pin or ADC read fails
const READ_FAILED_LINE: &str = "Error: Sensor Read";

/// Format the two lines shown for a reading
///
/// A value too wide for a line is cut at the line capacity.
pub fn format_lines(reading: &Reading) -> (Line, Line) {
    let mut top = Line::new();
    let mut bottom = Line::new();

    match reading {
        Reading::Valid {
            ambient_c,
            compensated_c,
            ..
        } => {
            let _ = write!(top, "Thermo: {:.1}C", compensated_c);
            let _ = write!(bottom, "Amb: {:.1}C", ambient_c);
        }
        Reading::Fault(error) => {
            let _ = top.push_str(match error {
                SensorError::OpenCircuit => OPEN_CIRCUIT_LINE,
                SensorError::ConversionError => READ_FAILED_LINE,
            });
        }
    }

    (top, bottom)
}

/// Clear the display and draw a reading
pub fn render<D: CharacterDisplay>(display: &mut D, reading: &Reading) -> Result<(), D::Error> {
    let (top, bottom) = format_lines(reading);
    draw(display, &top, &bottom)
}

/// Clear the display and draw the boot screen
pub fn render_splash<D: CharacterDisplay>(display: &mut D) -> Result<(), D::Error> {
    draw(display, SPLASH_LINES[0], SPLASH_LINES[1])
}

fn draw<D: CharacterDisplay>(display: &mut D, top: &str, bottom: &str) -> Result<(), D::Error> {
    let (columns, rows) = display.dimensions();

    display.clear()?;
    display.print_at(0, 0, fit(top, columns))?;
    if rows > 1 && !bottom.is_empty() {
        display.print_at(0, 1, fit(bottom, columns))?;
    }
    Ok(())
}

/// Cut text to at most `columns` characters
fn fit(text: &str, columns: u8) -> &str {
    match text.char_indices().nth(columns as usize) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
