//! Trace playback

use std::collections::VecDeque;
use std::path::Path;

use crate::platform::event::PlatformEvent;
use crate::platform::handler::EventHandler;
use crate::platform::window::WindowId;

use super::error::TraceError;
use super::event_trace::EventTrace;

/// Where a player is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// No trace loaded yet
    #[default]
    Idle,
    /// A trace is loaded, nothing dispatched yet
    Loaded,
    /// Some events dispatched, more pending
    Replaying,
    /// Every loaded event has been handed out
    Drained,
}

/// Replays a loaded trace event by event
///
/// Events come out in recorded order carrying their recorded
/// timestamps; pacing is the caller's business. `Drained` is terminal
/// for a trace: a drained player keeps returning `None` until a new
/// trace is loaded.
#[derive(Debug, Default)]
pub struct EventTracePlayer {
    state: PlayerState,
    pending: VecDeque<PlatformEvent>,
}

impl EventTracePlayer {
    /// A player with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Events not yet handed out
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether the loaded trace is exhausted
    pub fn is_drained(&self) -> bool {
        self.state == PlayerState::Drained
    }

    /// Load a trace from disk, rebinding its events to `window`
    ///
    /// Replaces whatever was loaded before; returns the event count.
    /// Loading an empty trace yields a player that is already drained.
    /// On failure the player keeps its previous state. Panics when
    /// called mid-replay; finish or discard the running trace first.
    pub fn load(&mut self, path: &Path, window: WindowId) -> Result<usize, TraceError> {
        assert!(
            self.state != PlayerState::Replaying,
            "cannot load a trace mid-replay"
        );
        let trace = EventTrace::load_from_file(path, window)?;
        let count = trace.len();
        self.pending = trace.into_events().into();
        self.state = if self.pending.is_empty() {
            PlayerState::Drained
        } else {
            PlayerState::Loaded
        };
        Ok(count)
    }

    /// Hand out the next recorded event
    ///
    /// Returns `None` forever once drained. Panics when nothing was
    /// ever loaded; asking an idle player for events is a wiring bug,
    /// not an exhausted trace.
    pub fn next_event(&mut self) -> Option<PlatformEvent> {
        match self.state {
            PlayerState::Idle => panic!("no trace loaded"),
            PlayerState::Drained => None,
            PlayerState::Loaded | PlayerState::Replaying => {
                let event = self.pending.pop_front();
                self.state = if self.pending.is_empty() {
                    PlayerState::Drained
                } else {
                    PlayerState::Replaying
                };
                event
            }
        }
    }

    /// Dispatch the next recorded event into `handler`
    ///
    /// Returns whether an event was dispatched.
    pub fn inject_next(&mut self, handler: &mut dyn EventHandler) -> bool {
        match self.next_event() {
            Some(event) => {
                handler.on_event(&event);
                true
            }
            None => false,
        }
    }

    /// Dispatch every remaining event into `handler`, in order
    ///
    /// Returns how many events were dispatched. The player is drained
    /// afterwards.
    pub fn replay_all(&mut self, handler: &mut dyn EventHandler) -> usize {
        let mut count = 0;
        while self.inject_next(handler) {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::event::{EventKind, Key, Modifiers};
    use crate::platform::geometry::Point;
    use crate::platform::handler::QueueingHandler;
    use crate::platform::null::NullPlatform;
    use crate::platform::options::WindowOptions;
    use crate::platform::window::PlatformWindow;
    use crate::trace::recorder::{EventTraceRecorder, RecordingHandler};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn sample_trace_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("run.ron");
        let window = WindowId::new(1);
        EventTrace::from_events(vec![
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
        ])
        .save_to_file(&path)
        .unwrap();
        path
    }

    #[test]
    fn fresh_players_are_idle() {
        let player = EventTracePlayer::new();
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "no trace loaded")]
    fn asking_an_idle_player_for_events_panics() {
        let mut player = EventTracePlayer::new();
        let _ = player.next_event();
    }

    #[test]
    fn lifecycle_walks_loaded_replaying_drained() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_trace_file(&dir);

        let mut player = EventTracePlayer::new();
        let count = player.load(&path, WindowId::new(1)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(player.state(), PlayerState::Loaded);

        assert!(player.next_event().is_some());
        assert_eq!(player.state(), PlayerState::Replaying);
        assert!(player.next_event().is_some());
        assert!(player.next_event().is_some());
        assert_eq!(player.state(), PlayerState::Drained);

        // Drained is terminal: no more events, no panic.
        assert!(player.next_event().is_none());
        assert!(player.next_event().is_none());
    }

    #[test]
    fn empty_traces_load_already_drained() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ron");
        EventTrace::new().save_to_file(&path).unwrap();

        let mut player = EventTracePlayer::new();
        assert_eq!(player.load(&path, WindowId::new(1)).unwrap(), 0);
        assert!(player.is_drained());
    }

    #[test]
    fn failed_loads_leave_the_player_usable() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = EventTracePlayer::new();

        assert!(player.load(&dir.path().join("nope.ron"), WindowId::new(1)).is_err());
        assert_eq!(player.state(), PlayerState::Idle);

        let path = sample_trace_file(&dir);
        assert_eq!(player.load(&path, WindowId::new(1)).unwrap(), 3);
        assert_eq!(player.state(), PlayerState::Loaded);
    }

    #[test]
    #[should_panic(expected = "mid-replay")]
    fn loading_over_a_running_replay_panics() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_trace_file(&dir);

        let mut player = EventTracePlayer::new();
        player.load(&path, WindowId::new(1)).unwrap();
        let _ = player.next_event();
        let _ = player.load(&path, WindowId::new(1));
    }

    #[test]
    fn recorded_session_replays_in_exact_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");

        // Recording session: a window whose handler is tapped.
        {
            let recorder = EventTraceRecorder::new_shared();
            recorder.borrow_mut().start();

            let mut platform = NullPlatform::new();
            let mut window = platform.create_window(
                &WindowOptions::new().with_title("recording"),
                Box::new(RecordingHandler::new(
                    Rc::clone(&recorder),
                    QueueingHandler::new(),
                )),
            );
            let id = window.id();

            window.inject_event(&PlatformEvent::new(
                0.0,
                id,
                EventKind::KeyPress {
                    key: Key::A,
                    mods: Modifiers::empty(),
                    repeat: false,
                },
            ));
            window.inject_event(&PlatformEvent::new(
                5.0,
                id,
                EventKind::MouseMove {
                    pos: Point::new(10, 20),
                },
            ));
            window.inject_event(&PlatformEvent::new(12.0, id, EventKind::WindowClose));

            assert_eq!(recorder.borrow_mut().save(&path).unwrap(), 3);
        }

        // Replay session: a fresh platform, window and handler.
        let mut platform = NullPlatform::new();
        let target = Rc::new(RefCell::new(QueueingHandler::new()));
        let window = platform.create_window(
            &WindowOptions::new().with_title("replaying"),
            Box::new(Rc::clone(&target)),
        );

        let mut player = EventTracePlayer::new();
        player.load(&path, window.id()).unwrap();
        let dispatched = player.replay_all(&mut *target.borrow_mut());

        assert_eq!(dispatched, 3);
        assert!(player.is_drained());

        let events = target.borrow_mut().drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0].kind,
            EventKind::KeyPress { key: Key::A, .. }
        ));
        assert!(matches!(
            events[1].kind,
            EventKind::MouseMove {
                pos: Point { x: 10, y: 20 }
            }
        ));
        assert!(matches!(events[2].kind, EventKind::WindowClose));

        assert_eq!(events[0].timestamp, 0.0);
        assert_eq!(events[1].timestamp, 5.0);
        assert_eq!(events[2].timestamp, 12.0);
        assert!(events.iter().all(|e| e.window == window.id()));
    }
}
