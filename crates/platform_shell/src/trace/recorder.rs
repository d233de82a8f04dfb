//! Event recording

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::platform::event::PlatformEvent;
use crate::platform::handler::EventHandler;

use super::error::TraceError;
use super::event_trace::{is_traceable, EventTrace};

/// Records traceable events while armed
///
/// Two states, idle and recording. [`EventTraceRecorder::record`] is
/// safe to call in either state so a tap can stay installed for the
/// whole session; only an armed recorder keeps events, and only the
/// traceable ones. A successful [`EventTraceRecorder::save`] disarms
/// and clears in one step, leaving the recorder ready for the next
/// take.
#[derive(Debug, Default)]
pub struct EventTraceRecorder {
    recording: bool,
    trace: EventTrace,
}

impl EventTraceRecorder {
    /// An idle recorder with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle, for wiring into a [`RecordingHandler`]
    pub fn new_shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Whether the recorder is currently keeping events
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Events buffered so far
    pub fn event_count(&self) -> usize {
        self.trace.len()
    }

    /// Arm the recorder, discarding anything buffered before
    ///
    /// Panics when already recording; overlapping takes have no
    /// meaningful order to record.
    pub fn start(&mut self) {
        assert!(!self.recording, "recording already in progress");
        self.trace = EventTrace::new();
        self.recording = true;
        log::info!("event recording armed");
    }

    /// Offer one event to the recorder
    ///
    /// Kept only when armed and the kind is traceable; otherwise the
    /// call is a no-op, which is what lets the tap stay installed
    /// permanently.
    pub fn record(&mut self, event: &PlatformEvent) {
        if !self.recording || !is_traceable(&event.kind) {
            return;
        }
        self.trace.push(event.clone());
    }

    /// Write the recorded take to `path`, then disarm and clear
    ///
    /// Returns the number of events written. On failure the recorder
    /// stays armed with its buffer intact, so the caller can retry
    /// with another path. Panics when idle; there is no take to save.
    pub fn save(&mut self, path: &Path) -> Result<usize, TraceError> {
        assert!(self.recording, "no recording in progress");
        self.trace.save_to_file(path)?;
        let count = self.trace.len();
        self.trace = EventTrace::new();
        self.recording = false;
        Ok(count)
    }

    /// Disarm and discard the current take
    ///
    /// Harmless when idle.
    pub fn cancel(&mut self) {
        if self.recording {
            log::info!("event recording cancelled, {} events dropped", self.trace.len());
        }
        self.trace = EventTrace::new();
        self.recording = false;
    }
}

/// Event handler proxy that tees events into a recorder
///
/// Sits between a window and the real handler: every event is offered
/// to the recorder first, then forwarded unchanged, consumed or not.
/// The recorder handle is shared, so the application can arm and save
/// it while the window owns the tap.
pub struct RecordingHandler<H> {
    recorder: Rc<RefCell<EventTraceRecorder>>,
    inner: H,
}

impl<H: EventHandler> RecordingHandler<H> {
    /// Wrap `inner`, teeing every event into `recorder`
    pub fn new(recorder: Rc<RefCell<EventTraceRecorder>>, inner: H) -> Self {
        Self { recorder, inner }
    }
}

impl<H: EventHandler> EventHandler for RecordingHandler<H> {
    fn on_event(&mut self, event: &PlatformEvent) -> bool {
        self.recorder.borrow_mut().record(event);
        self.inner.on_event(event)
    }
}
