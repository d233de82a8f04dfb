//! Trace persistence errors

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong saving or loading an event trace
///
/// The kinds are distinct because replay tooling reacts differently to
/// them: a missing file is a usage error, a size mismatch means the
/// file was truncated or edited after recording.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The trace file does not exist
    #[error("trace file not found: {}", path.display())]
    NotFound {
        /// The path that was tried
        path: PathBuf,
    },

    /// Reading or writing the trace file failed
    #[error("trace io failed on {}", path.display())]
    Io {
        /// The path that was being accessed
        path: PathBuf,
        /// The underlying io error
        #[source]
        source: std::io::Error,
    },

    /// The first line of the file is not a valid header
    #[error("malformed trace header: {reason}")]
    MalformedHeader {
        /// Parser diagnostic
        reason: String,
    },

    /// The payload length does not match what the header promises
    #[error("trace payload is {actual} bytes, header promises {expected}")]
    SizeMismatch {
        /// Byte count recorded in the header
        expected: u64,
        /// Byte count actually present
        actual: u64,
    },

    /// The event payload does not parse
    #[error("malformed trace events")]
    MalformedEvent {
        /// The underlying parse error
        #[source]
        source: ron::de::SpannedError,
    },

    /// The trace could not be serialized for writing
    #[error("failed to serialize trace")]
    Serialize {
        /// The underlying serializer error
        #[source]
        source: ron::Error,
    },
}
