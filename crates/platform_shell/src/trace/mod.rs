//! Deterministic event capture and replay
//!
//! Everything a window delivers is a plain-data
//! [`PlatformEvent`](crate::platform::PlatformEvent), which makes a
//! session recordable: tee the event stream into a file today, feed
//! the same stream back tomorrow and the application walks through the
//! same states. That is the backbone of reproducing bug reports and of
//! regression tests that drive a real event loop without a human at
//! the keyboard.
//!
//! # Recording
//!
//! A [`RecordingHandler`] sits between a window and the application's
//! handler and tees every event into a shared
//! [`EventTraceRecorder`]. The recorder keeps only kinds that
//! [`is_traceable`] approves; compositor refresh cadence and dropped
//! file paths would not mean anything in a later session.
//!
//! # Replaying
//!
//! [`EventTrace::load_from_file`] rebinds the recorded events to a
//! window of the replaying session, and an [`EventTracePlayer`] hands
//! them out in recorded order, either one at a time or all at once.
//!
//! # File format
//!
//! One compact RON [`EventTraceHeader`] line, then the events as
//! pretty RON. The header carries the payload byte length, so
//! truncation is caught before any event parses.

pub mod error;
pub mod event_trace;
pub mod player;
pub mod recorder;

pub use error::TraceError;
pub use event_trace::{is_traceable, read_header, EventTrace, EventTraceHeader};
pub use player::{EventTracePlayer, PlayerState};
pub use recorder::{EventTraceRecorder, RecordingHandler};
