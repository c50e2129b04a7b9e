//! Configuration types
//!
//! Board-agnostic configuration structures and the parser for the
//! embedded `monitor.toml` file.

pub mod hardware;
pub mod toml;
pub mod types;

pub use hardware::*;
pub use toml::{parse_config, ParseError};
pub use types::*;
