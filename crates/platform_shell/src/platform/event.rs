//! Platform event model
//!
//! Events are plain data: every variant is deeply cloneable and
//! serializable, because the trace subsystem persists clones of live
//! events and decodes them back in a later process. The variant set is
//! closed; downstream `match`es are exhaustive, so adding a variant is
//! a compile-visible change everywhere it matters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::geometry::{Point, Size};
use super::window::WindowId;

/// A single event delivered from a window backend to an event handler
///
/// The timestamp is the backend's monotonic clock at delivery, in
/// seconds. Cloning an event yields a fully independent copy, owned
/// strings and paths included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Monotonic timestamp in seconds
    pub timestamp: f64,
    /// The window this event belongs to
    pub window: WindowId,
    /// What happened
    pub kind: EventKind,
}

impl PlatformEvent {
    /// Create an event
    pub fn new(timestamp: f64, window: WindowId, kind: EventKind) -> Self {
        Self {
            timestamp,
            window,
            kind,
        }
    }
}

/// The closed set of event kinds a backend can deliver
///
/// Each variant carries only the fields relevant to its kind. Kinds
/// that depend on session-local state the next session cannot
/// reproduce (`WindowRefresh`, `FileDrop`) are excluded from traces by
/// [`crate::trace::is_traceable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A key went down (or auto-repeated while held)
    KeyPress {
        /// Which key
        key: Key,
        /// Modifier state at the time of the press
        mods: Modifiers,
        /// True when the OS generated this press as key auto-repeat
        repeat: bool,
    },
    /// A key went up
    KeyRelease {
        /// Which key
        key: Key,
        /// Modifier state at the time of the release
        mods: Modifiers,
    },
    /// Translated character input (layout-dependent, unlike `KeyPress`)
    TextInput {
        /// The character produced
        ch: char,
    },
    /// A mouse button went down
    MouseButtonPress {
        /// Which button
        button: MouseButton,
        /// Cursor position in window coordinates at the time of the click
        pos: Point,
    },
    /// A mouse button went up
    MouseButtonRelease {
        /// Which button
        button: MouseButton,
        /// Cursor position in window coordinates at the time of the release
        pos: Point,
    },
    /// The cursor moved inside the window
    MouseMove {
        /// New cursor position in window coordinates
        pos: Point,
    },
    /// The scroll wheel turned
    MouseWheel {
        /// Horizontal lines scrolled (positive = right)
        delta_x: i32,
        /// Vertical lines scrolled (positive = away from the user)
        delta_y: i32,
    },
    /// The window moved on the desktop
    WindowMove {
        /// New window position in desktop coordinates
        pos: Point,
    },
    /// The window was resized
    WindowResize {
        /// New client-area size
        size: Size,
    },
    /// The window gained keyboard focus
    WindowActivate,
    /// The window lost keyboard focus
    WindowDeactivate,
    /// The user asked the window to close (the window is still alive)
    WindowClose,
    /// The OS invalidated the window contents and wants a redraw
    ///
    /// Driven by the compositor, not by the user; never traced.
    WindowRefresh,
    /// Files were dragged and dropped onto the window
    ///
    /// Paths only mean something on the machine and session that
    /// produced them; never traced.
    FileDrop {
        /// Absolute paths of the dropped files
        paths: Vec<PathBuf>,
    },
}

bitflags::bitflags! {
    /// Modifier keys held during a key or mouse event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CTRL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Either super (windows / command) key
        const SUPER = 1 << 3;
    }
}

/// Physical mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
    /// Thumb "back" button
    Back,
    /// Thumb "forward" button
    Forward,
    /// Any additional button, by native index
    Other(u8),
}

/// Layout-independent key codes
///
/// Keys the backend cannot classify map to [`Key::Unknown`] rather than
/// being dropped, so a trace still records that something was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// The A key
    A,
    /// The B key
    B,
    /// The C key
    C,
    /// The D key
    D,
    /// The E key
    E,
    /// The F key
    F,
    /// The G key
    G,
    /// The H key
    H,
    /// The I key
    I,
    /// The J key
    J,
    /// The K key
    K,
    /// The L key
    L,
    /// The M key
    M,
    /// The N key
    N,
    /// The O key
    O,
    /// The P key
    P,
    /// The Q key
    Q,
    /// The R key
    R,
    /// The S key
    S,
    /// The T key
    T,
    /// The U key
    U,
    /// The V key
    V,
    /// The W key
    W,
    /// The X key
    X,
    /// The Y key
    Y,
    /// The Z key
    Z,
    /// The 0 key on the main row
    Num0,
    /// The 1 key on the main row
    Num1,
    /// The 2 key on the main row
    Num2,
    /// The 3 key on the main row
    Num3,
    /// The 4 key on the main row
    Num4,
    /// The 5 key on the main row
    Num5,
    /// The 6 key on the main row
    Num6,
    /// The 7 key on the main row
    Num7,
    /// The 8 key on the main row
    Num8,
    /// The 9 key on the main row
    Num9,
    /// The F1 key
    F1,
    /// The F2 key
    F2,
    /// The F3 key
    F3,
    /// The F4 key
    F4,
    /// The F5 key
    F5,
    /// The F6 key
    F6,
    /// The F7 key
    F7,
    /// The F8 key
    F8,
    /// The F9 key
    F9,
    /// The F10 key
    F10,
    /// The F11 key
    F11,
    /// The F12 key
    F12,
    /// The up arrow
    Up,
    /// The down arrow
    Down,
    /// The left arrow
    Left,
    /// The right arrow
    Right,
    /// The space bar
    Space,
    /// The enter / return key
    Enter,
    /// The escape key
    Escape,
    /// The tab key
    Tab,
    /// The backspace key
    Backspace,
    /// The delete key
    Delete,
    /// The insert key
    Insert,
    /// The home key
    Home,
    /// The end key
    End,
    /// The page-up key
    PageUp,
    /// The page-down key
    PageDown,
    /// The left shift key
    LeftShift,
    /// The right shift key
    RightShift,
    /// The left control key
    LeftControl,
    /// The right control key
    RightControl,
    /// The left alt key
    LeftAlt,
    /// The right alt key
    RightAlt,
    /// The left super key
    LeftSuper,
    /// The right super key
    RightSuper,
    /// A key this abstraction does not name
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::window::WindowId;

    #[test]
    fn cloned_event_is_independent_of_the_original() {
        let original = PlatformEvent::new(
            1.25,
            WindowId::new(1),
            EventKind::FileDrop {
                paths: vec![PathBuf::from("/tmp/a.png")],
            },
        );

        let mut copy = original.clone();
        copy.timestamp = 99.0;
        copy.window = WindowId::new(7);
        if let EventKind::FileDrop { paths } = &mut copy.kind {
            paths.push(PathBuf::from("/tmp/b.png"));
        }

        assert_eq!(original.timestamp, 1.25);
        assert_eq!(original.window, WindowId::new(1));
        assert_eq!(
            original.kind,
            EventKind::FileDrop {
                paths: vec![PathBuf::from("/tmp/a.png")],
            }
        );
    }

    #[test]
    fn serialized_events_name_their_kind() {
        let event = PlatformEvent::new(
            0.0,
            WindowId::new(1),
            EventKind::KeyPress {
                key: Key::A,
                mods: Modifiers::SHIFT | Modifiers::CTRL,
                repeat: false,
            },
        );

        let text = ron::to_string(&event).unwrap();
        assert!(text.contains("KeyPress"), "got: {text}");
        assert!(text.contains("SHIFT"), "got: {text}");

        let back: PlatformEvent = ron::from_str(&text).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn modifier_sets_compose() {
        let mods = Modifiers::SHIFT | Modifiers::ALT;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::CTRL));
        assert_eq!(Modifiers::default(), Modifiers::empty());
    }
}
