//! On-disk event traces
//!
//! A trace file is one compact RON header line followed by a pretty
//! RON event payload. The header stays on its own line so the payload
//! can be split off and length-checked without parsing it; the payload
//! is pretty-printed so recorded traces diff cleanly under version
//! control.

use std::fs;
use std::io;
use std::path::Path;

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::platform::event::{EventKind, PlatformEvent};
use crate::platform::window::WindowId;

use super::error::TraceError;

/// Whether an event kind may be recorded into a trace
///
/// Excluded kinds depend on session-local state a later session cannot
/// reproduce: refresh cadence belongs to the compositor, dropped file
/// paths to the producing machine. The match is exhaustive so a new
/// event kind has to be classified here before the crate compiles.
pub fn is_traceable(kind: &EventKind) -> bool {
    match kind {
        EventKind::KeyPress { .. }
        | EventKind::KeyRelease { .. }
        | EventKind::TextInput { .. }
        | EventKind::MouseButtonPress { .. }
        | EventKind::MouseButtonRelease { .. }
        | EventKind::MouseMove { .. }
        | EventKind::MouseWheel { .. }
        | EventKind::WindowMove { .. }
        | EventKind::WindowResize { .. }
        | EventKind::WindowActivate
        | EventKind::WindowDeactivate
        | EventKind::WindowClose => true,
        EventKind::WindowRefresh | EventKind::FileDrop { .. } => false,
    }
}

/// The one-line header in front of the trace payload
///
/// `save_file_size` is the byte length of everything after the header
/// line; a mismatch on load means the file was truncated or edited.
/// `checksum` is reserved for payload integrity checking: it is
/// written as `None` and ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTraceHeader {
    /// Byte length of the payload following the header line
    pub save_file_size: u64,
    /// Reserved; currently always `None`
    pub checksum: Option<String>,
}

/// Read just the header line of a trace file
///
/// For inspection tooling that wants the metadata without decoding
/// every event.
pub fn read_header(path: &Path) -> Result<EventTraceHeader, TraceError> {
    let text = read_trace_text(path)?;
    let (header, _) = split_header(&text)?;
    Ok(header)
}

/// An ordered list of recorded events
///
/// The in-memory form of a trace file. Order is insertion order and is
/// preserved through save and load byte for byte; replay fidelity
/// depends on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTrace {
    events: Vec<PlatformEvent>,
}

impl EventTrace {
    /// An empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-collected event list
    pub fn from_events(events: Vec<PlatformEvent>) -> Self {
        Self { events }
    }

    /// Append one event
    pub fn push(&mut self, event: PlatformEvent) {
        self.events.push(event);
    }

    /// The recorded events in recording order
    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }

    /// Consume the trace, yielding its events
    pub fn into_events(self) -> Vec<PlatformEvent> {
        self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Write the trace to `path`
    ///
    /// The file is written next to its destination and renamed into
    /// place, so a crash mid-write never leaves a half trace under the
    /// final name.
    pub fn save_to_file(&self, path: &Path) -> Result<(), TraceError> {
        let payload = ron::ser::to_string_pretty(&self.events, PrettyConfig::default())
            .map_err(|source| TraceError::Serialize { source })?;
        let header = EventTraceHeader {
            save_file_size: payload.len() as u64,
            checksum: None,
        };
        let mut text =
            ron::to_string(&header).map_err(|source| TraceError::Serialize { source })?;
        text.push('\n');
        text.push_str(&payload);

        let staging = path.with_extension("tmp");
        fs::write(&staging, &text).map_err(|source| TraceError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "saved trace with {} events to {}",
            self.events.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a trace from `path`, rebinding its events to `window`
    ///
    /// Window ids stored in the file belonged to the session that
    /// recorded them; every loaded event is retargeted at the given
    /// window so replay addresses a window that actually exists now.
    pub fn load_from_file(path: &Path, window: WindowId) -> Result<Self, TraceError> {
        let text = read_trace_text(path)?;
        let (header, payload) = split_header(&text)?;

        let actual = payload.len() as u64;
        if header.save_file_size != actual {
            return Err(TraceError::SizeMismatch {
                expected: header.save_file_size,
                actual,
            });
        }

        let mut events: Vec<PlatformEvent> =
            ron::from_str(payload).map_err(|source| TraceError::MalformedEvent { source })?;
        for event in &mut events {
            event.window = window;
        }

        log::info!(
            "loaded trace with {} events from {}",
            events.len(),
            path.display()
        );
        Ok(Self { events })
    }
}

fn read_trace_text(path: &Path) -> Result<String, TraceError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Err(TraceError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(TraceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn split_header(text: &str) -> Result<(EventTraceHeader, &str), TraceError> {
    let Some((header_line, payload)) = text.split_once('\n') else {
        return Err(TraceError::MalformedHeader {
            reason: "missing header line".to_string(),
        });
    };
    let header: EventTraceHeader =
        ron::from_str(header_line).map_err(|e| TraceError::MalformedHeader {
            reason: e.to_string(),
        })?;
    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::event::{Key, Modifiers};
    use crate::platform::geometry::Point;

    fn sample_events(window: WindowId) -> Vec<PlatformEvent> {
        vec![
            PlatformEvent::new(
                0.0,
                window,
                EventKind::KeyPress {
                    key: Key::A,
                    mods: Modifiers::empty(),
                    repeat: false,
                },
            ),
            PlatformEvent::new(
                5.0,
                window,
                EventKind::MouseMove {
                    pos: Point::new(10, 20),
                },
            ),
            PlatformEvent::new(12.0, window, EventKind::WindowClose),
        ]
    }

    #[test]
    fn refresh_and_file_drops_are_not_traceable() {
        assert!(!is_traceable(&EventKind::WindowRefresh));
        assert!(!is_traceable(&EventKind::FileDrop { paths: vec![] }));
        assert!(is_traceable(&EventKind::WindowClose));
        assert!(is_traceable(&EventKind::MouseMove {
            pos: Point::new(0, 0)
        }));
    }

    #[test]
    fn filtering_an_already_filtered_sequence_changes_nothing() {
        let window = WindowId::new(1);
        let mut mixed = sample_events(window);
        mixed.push(PlatformEvent::new(13.0, window, EventKind::WindowRefresh));

        let once: Vec<PlatformEvent> = mixed
            .into_iter()
            .filter(|e| is_traceable(&e.kind))
            .collect();
        let twice: Vec<PlatformEvent> = once
            .iter()
            .cloned()
            .filter(|e| is_traceable(&e.kind))
            .collect();

        assert_eq!(once.len(), 3);
        assert_eq!(twice, once);
    }

    #[test]
    fn save_then_load_round_trips_every_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");
        let window = WindowId::new(1);

        let trace = EventTrace::from_events(sample_events(window));
        trace.save_to_file(&path).unwrap();

        let loaded = EventTrace::load_from_file(&path, window).unwrap();
        assert_eq!(loaded.events(), trace.events());
        assert_eq!(loaded.events()[1].timestamp, 5.0);
    }

    #[test]
    fn load_rebinds_events_to_the_given_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");

        let trace = EventTrace::from_events(sample_events(WindowId::new(3)));
        trace.save_to_file(&path).unwrap();

        let loaded = EventTrace::load_from_file(&path, WindowId::new(7)).unwrap();
        assert!(loaded.events().iter().all(|e| e.window == WindowId::new(7)));
    }

    #[test]
    fn header_line_reports_the_payload_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");

        let trace = EventTrace::from_events(sample_events(WindowId::new(1)));
        trace.save_to_file(&path).unwrap();

        let header = read_header(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let payload = text.split_once('\n').unwrap().1;
        assert_eq!(header.save_file_size, payload.len() as u64);
        assert_eq!(header.checksum, None);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        let err = EventTrace::load_from_file(&missing, WindowId::new(1)).unwrap_err();
        assert!(matches!(err, TraceError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn file_without_a_header_line_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");
        std::fs::write(&path, "no newline anywhere").unwrap();

        let err = EventTrace::load_from_file(&path, WindowId::new(1)).unwrap_err();
        assert!(matches!(err, TraceError::MalformedHeader { .. }), "got {err:?}");
    }

    #[test]
    fn unparseable_header_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");
        std::fs::write(&path, "not a header\n[]").unwrap();

        let err = EventTrace::load_from_file(&path, WindowId::new(1)).unwrap_err();
        assert!(matches!(err, TraceError::MalformedHeader { .. }), "got {err:?}");
    }

    #[test]
    fn truncated_payload_is_a_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");

        let trace = EventTrace::from_events(sample_events(WindowId::new(1)));
        trace.save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, &text[..text.len() - 10]).unwrap();

        let err = EventTrace::load_from_file(&path, WindowId::new(1)).unwrap_err();
        match err {
            TraceError::SizeMismatch { expected, actual } => {
                assert_eq!(actual + 10, expected);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn garbage_payload_of_the_promised_size_is_a_malformed_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");

        let payload = "definitely not events";
        let header = EventTraceHeader {
            save_file_size: payload.len() as u64,
            checksum: None,
        };
        let text = format!("{}\n{payload}", ron::to_string(&header).unwrap());
        std::fs::write(&path, text).unwrap();

        let err = EventTrace::load_from_file(&path, WindowId::new(1)).unwrap_err();
        assert!(matches!(err, TraceError::MalformedEvent { .. }), "got {err:?}");
    }

    #[test]
    fn empty_traces_survive_the_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.ron");

        EventTrace::new().save_to_file(&path).unwrap();
        let loaded = EventTrace::load_from_file(&path, WindowId::new(1)).unwrap();
        assert!(loaded.is_empty());
    }
}
