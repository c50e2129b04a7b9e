//! Embassy async tasks
//!
//! The monitor is a single acquisition loop; everything it touches is
//! owned by that loop.

pub mod monitor;

pub use monitor::monitor_loop;
