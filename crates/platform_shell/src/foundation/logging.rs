//! Logging utilities
//!
//! Library code logs through the `log` facade only; binaries decide the
//! sink. These helpers set up `env_logger` consistently for binaries
//! that don't need a custom builder.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger` with an `info` default level.
///
/// The `RUST_LOG` environment variable overrides the default as usual.
/// Call once, from a binary; a second call panics inside `env_logger`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
