//! Simple TOML parser for the monitor configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `monitor.toml`. It does NOT support the full TOML language.
//!
//! Supported features:
//! - Key = value pairs (string, integer, hex integer, boolean, one-decimal number)
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown keys are ignored so newer config files still load.

use super::types::MonitorConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Ambient,
    Filter,
    Compensation,
    Ui,
}

/// Parse TOML configuration into MonitorConfig
///
/// Keys that are not present keep their default values.
pub fn parse_config(input: &str) -> Result<MonitorConfig, ParseError> {
    let mut config = MonitorConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse a section header like "display" or "filter"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "ambient" => Ok(Section::Ambient),
        "filter" => Ok(Section::Filter),
        "compensation" => Ok(Section::Compensation),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an unsigned integer value, decimal or `0x` hex
///
/// Underscores are accepted as digit separators ("4_095").
fn parse_uint<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let value = parse_string(value);
    let (digits, radix) = match value.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    if digits.is_empty() {
        return Err(ParseError::InvalidValue);
    }

    let mut raw: u32 = 0;
    for ch in digits.chars().filter(|&c| c != '_') {
        let digit = ch.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        raw = raw
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a number with at most one decimal into tenths ("25.5" -> 255)
fn parse_tenths(value: &str) -> Result<i16, ParseError> {
    let value = parse_string(value);
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, "0"),
    };
    if whole.is_empty() || frac.len() != 1 {
        return Err(ParseError::InvalidValue);
    }

    let whole: i16 = whole.parse().map_err(|_| ParseError::InvalidValue)?;
    let frac: i16 = frac.parse().map_err(|_| ParseError::InvalidValue)?;
    let tenths = whole
        .checked_mul(10)
        .and_then(|t| t.checked_add(frac))
        .ok_or(ParseError::InvalidValue)?;

    Ok(if negative { -tenths } else { tenths })
}

/// Apply a key/value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MonitorConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "address" => config.display.i2c_address = parse_uint(value)?,
            "columns" => config.display.columns = parse_uint(value)?,
            "rows" => config.display.rows = parse_uint(value)?,
            "backlight" => config.display.backlight = parse_bool(value)?,
            _ => {}
        },
        Section::Ambient => match key {
            "vref_mv" => config.ambient.vref_mv = parse_uint(value)?,
            "full_scale" => config.ambient.full_scale = parse_uint(value)?,
            _ => {}
        },
        Section::Filter => match key {
            "window" => config.filter.window = parse_uint(value)?,
            _ => {}
        },
        Section::Compensation => match key {
            "reference_ambient_c" => {
                config.compensation.reference_ambient_x10 = parse_tenths(value)?
            }
            _ => {}
        },
        Section::Ui => match key {
            "cycle_ms" => config.ui.cycle_ms = parse_uint(value)?,
            "splash_ms" => config.ui.splash_ms = parse_uint(value)?,
            _ => {}
        },
        Section::Root => {
            // Handle root-level keys if any
        }
    }

    Ok(())
}
