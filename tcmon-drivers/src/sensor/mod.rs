//! Temperature sensor implementations

pub mod lm35;
pub mod max6675;

pub use lm35::{AdcReader, Lm35};
pub use max6675::Max6675;
