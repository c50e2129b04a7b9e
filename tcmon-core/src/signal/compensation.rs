//! Ambient compensation
//!
//! Linear cold-junction correction: the thermocouple reading is shifted by
//! how far the ambient temperature sits from the temperature the probe was
//! characterised at. This is a simplification, not a full thermocouple
//! model.

/// Ambient temperature the cold junction was characterised at (°C)
pub const REFERENCE_AMBIENT_C: f32 = 25.0;

/// Correct a filtered thermocouple reading using the filtered ambient one
///
/// `thermocouple_c + (ambient_c - 25.0)`
pub fn compensate(thermocouple_c: f32, ambient_c: f32) -> f32 {
    Compensation::default().apply(thermocouple_c, ambient_c)
}

/// Compensation with a configurable reference ambient
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Compensation {
    /// Reference ambient temperature (°C)
    pub reference_ambient_c: f32,
}

impl Default for Compensation {
    fn default() -> Self {
        Self {
            reference_ambient_c: REFERENCE_AMBIENT_C,
        }
    }
}

impl Compensation {
    /// Create with a reference ambient in 0.1°C units (e.g., 250 = 25.0°C)
    pub fn from_x10(reference_ambient_x10: i16) -> Self {
        Self {
            reference_ambient_c: reference_ambient_x10 as f32 / 10.0,
        }
    }

    /// Apply the correction
    pub fn apply(&self, thermocouple_c: f32, ambient_c: f32) -> f32 {
        thermocouple_c + (ambient_c - self.reference_ambient_c)
    }
}
