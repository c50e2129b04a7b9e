//! Signal conditioning
//!
//! Smoothing and cold-junction correction applied to raw sensor readings
//! before they are shown.

pub mod compensation;
pub mod filter;

pub use compensation::{compensate, Compensation, REFERENCE_AMBIENT_C};
pub use filter::{MovingAverage, DEFAULT_WINDOW_LEN, MAX_WINDOW_LEN};
