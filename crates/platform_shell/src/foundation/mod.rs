//! Foundation utilities shared by the rest of the crate
//!
//! Nothing in here knows about windows or events; these are the small
//! building blocks (logging setup, monotonic clocks) the higher layers
//! lean on.

pub mod logging;
pub mod time;

pub use time::Stopwatch;
