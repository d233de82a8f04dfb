//! Translation from GLFW window events to the portable event model

use glfw::{Action, WindowEvent};

use crate::platform::event::{EventKind, Key, Modifiers, MouseButton, PlatformEvent};
use crate::platform::geometry::{Point, Size};
use crate::platform::window::WindowId;

/// Translate one native event into the portable model.
///
/// Returns `None` for notifications the model does not carry
/// (framebuffer size, content scale, iconify, maximize, cursor
/// enter/leave). GLFW reports button events without a position, so
/// `cursor` tracks the most recent cursor position for the window and
/// gets stamped onto button events; motion events update it as they
/// pass through.
pub(crate) fn translate(
    timestamp: f64,
    window: WindowId,
    cursor: &mut Point,
    event: WindowEvent,
) -> Option<PlatformEvent> {
    let kind = match event {
        WindowEvent::Key(key, _, Action::Press, mods) => EventKind::KeyPress {
            key: map_key(key),
            mods: map_modifiers(mods),
            repeat: false,
        },
        WindowEvent::Key(key, _, Action::Repeat, mods) => EventKind::KeyPress {
            key: map_key(key),
            mods: map_modifiers(mods),
            repeat: true,
        },
        WindowEvent::Key(key, _, Action::Release, mods) => EventKind::KeyRelease {
            key: map_key(key),
            mods: map_modifiers(mods),
        },
        WindowEvent::Char(ch) => EventKind::TextInput { ch },
        WindowEvent::MouseButton(button, Action::Press, _) => EventKind::MouseButtonPress {
            button: map_mouse_button(button),
            pos: *cursor,
        },
        WindowEvent::MouseButton(button, Action::Release, _) => EventKind::MouseButtonRelease {
            button: map_mouse_button(button),
            pos: *cursor,
        },
        WindowEvent::CursorPos(x, y) => {
            *cursor = Point::new(x as i32, y as i32);
            EventKind::MouseMove { pos: *cursor }
        }
        WindowEvent::Scroll(dx, dy) => EventKind::MouseWheel {
            delta_x: dx as i32,
            delta_y: dy as i32,
        },
        WindowEvent::Pos(x, y) => EventKind::WindowMove {
            pos: Point::new(x, y),
        },
        WindowEvent::Size(w, h) => EventKind::WindowResize {
            size: Size::new(w as u32, h as u32),
        },
        WindowEvent::Focus(true) => EventKind::WindowActivate,
        WindowEvent::Focus(false) => EventKind::WindowDeactivate,
        WindowEvent::Close => EventKind::WindowClose,
        WindowEvent::Refresh => EventKind::WindowRefresh,
        WindowEvent::FileDrop(paths) => EventKind::FileDrop { paths },
        _ => return None,
    };
    Some(PlatformEvent::new(timestamp, window, kind))
}

/// Map GLFW modifier flags to portable modifier flags.
///
/// Lock-key state (caps lock, num lock) is dropped; the portable model
/// only carries held modifiers.
pub(crate) fn map_modifiers(mods: glfw::Modifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if mods.contains(glfw::Modifiers::Shift) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(glfw::Modifiers::Control) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(glfw::Modifiers::Alt) {
        out |= Modifiers::ALT;
    }
    if mods.contains(glfw::Modifiers::Super) {
        out |= Modifiers::SUPER;
    }
    out
}

/// Map a GLFW mouse button to a portable button
pub(crate) fn map_mouse_button(button: glfw::MouseButton) -> MouseButton {
    match button {
        glfw::MouseButton::Button1 => MouseButton::Left,
        glfw::MouseButton::Button2 => MouseButton::Right,
        glfw::MouseButton::Button3 => MouseButton::Middle,
        glfw::MouseButton::Button4 => MouseButton::Back,
        glfw::MouseButton::Button5 => MouseButton::Forward,
        glfw::MouseButton::Button6 => MouseButton::Other(6),
        glfw::MouseButton::Button7 => MouseButton::Other(7),
        glfw::MouseButton::Button8 => MouseButton::Other(8),
    }
}

/// Map a GLFW key code to a portable key code.
///
/// Keys outside the portable set (keypad, punctuation, F13 and up,
/// lock keys) come out as [`Key::Unknown`] so the press is still seen.
pub(crate) fn map_key(key: glfw::Key) -> Key {
    match key {
        glfw::Key::A => Key::A,
        glfw::Key::B => Key::B,
        glfw::Key::C => Key::C,
        glfw::Key::D => Key::D,
        glfw::Key::E => Key::E,
        glfw::Key::F => Key::F,
        glfw::Key::G => Key::G,
        glfw::Key::H => Key::H,
        glfw::Key::I => Key::I,
        glfw::Key::J => Key::J,
        glfw::Key::K => Key::K,
        glfw::Key::L => Key::L,
        glfw::Key::M => Key::M,
        glfw::Key::N => Key::N,
        glfw::Key::O => Key::O,
        glfw::Key::P => Key::P,
        glfw::Key::Q => Key::Q,
        glfw::Key::R => Key::R,
        glfw::Key::S => Key::S,
        glfw::Key::T => Key::T,
        glfw::Key::U => Key::U,
        glfw::Key::V => Key::V,
        glfw::Key::W => Key::W,
        glfw::Key::X => Key::X,
        glfw::Key::Y => Key::Y,
        glfw::Key::Z => Key::Z,
        glfw::Key::Num0 => Key::Num0,
        glfw::Key::Num1 => Key::Num1,
        glfw::Key::Num2 => Key::Num2,
        glfw::Key::Num3 => Key::Num3,
        glfw::Key::Num4 => Key::Num4,
        glfw::Key::Num5 => Key::Num5,
        glfw::Key::Num6 => Key::Num6,
        glfw::Key::Num7 => Key::Num7,
        glfw::Key::Num8 => Key::Num8,
        glfw::Key::Num9 => Key::Num9,
        glfw::Key::F1 => Key::F1,
        glfw::Key::F2 => Key::F2,
        glfw::Key::F3 => Key::F3,
        glfw::Key::F4 => Key::F4,
        glfw::Key::F5 => Key::F5,
        glfw::Key::F6 => Key::F6,
        glfw::Key::F7 => Key::F7,
        glfw::Key::F8 => Key::F8,
        glfw::Key::F9 => Key::F9,
        glfw::Key::F10 => Key::F10,
        glfw::Key::F11 => Key::F11,
        glfw::Key::F12 => Key::F12,
        glfw::Key::Up => Key::Up,
        glfw::Key::Down => Key::Down,
        glfw::Key::Left => Key::Left,
        glfw::Key::Right => Key::Right,
        glfw::Key::Space => Key::Space,
        glfw::Key::Enter => Key::Enter,
        glfw::Key::Escape => Key::Escape,
        glfw::Key::Tab => Key::Tab,
        glfw::Key::Backspace => Key::Backspace,
        glfw::Key::Delete => Key::Delete,
        glfw::Key::Insert => Key::Insert,
        glfw::Key::Home => Key::Home,
        glfw::Key::End => Key::End,
        glfw::Key::PageUp => Key::PageUp,
        glfw::Key::PageDown => Key::PageDown,
        glfw::Key::LeftShift => Key::LeftShift,
        glfw::Key::RightShift => Key::RightShift,
        glfw::Key::LeftControl => Key::LeftControl,
        glfw::Key::RightControl => Key::RightControl,
        glfw::Key::LeftAlt => Key::LeftAlt,
        glfw::Key::RightAlt => Key::RightAlt,
        glfw::Key::LeftSuper => Key::LeftSuper,
        glfw::Key::RightSuper => Key::RightSuper,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const WINDOW: WindowId = WindowId::new(1);

    fn translate_one(cursor: &mut Point, event: WindowEvent) -> Option<PlatformEvent> {
        translate(0.5, WINDOW, cursor, event)
    }

    #[test]
    fn key_press_carries_key_and_modifiers() {
        let mut cursor = Point::default();
        let event = translate_one(
            &mut cursor,
            WindowEvent::Key(
                glfw::Key::A,
                0,
                Action::Press,
                glfw::Modifiers::Shift | glfw::Modifiers::Control,
            ),
        )
        .unwrap();

        assert_eq!(event.timestamp, 0.5);
        assert_eq!(event.window, WINDOW);
        assert_eq!(
            event.kind,
            EventKind::KeyPress {
                key: Key::A,
                mods: Modifiers::SHIFT | Modifiers::CTRL,
                repeat: false,
            }
        );
    }

    #[test]
    fn key_repeat_is_a_press_with_the_repeat_flag() {
        let mut cursor = Point::default();
        let event = translate_one(
            &mut cursor,
            WindowEvent::Key(glfw::Key::Space, 0, Action::Repeat, glfw::Modifiers::empty()),
        )
        .unwrap();

        assert_eq!(
            event.kind,
            EventKind::KeyPress {
                key: Key::Space,
                mods: Modifiers::empty(),
                repeat: true,
            }
        );
    }

    #[test]
    fn unnamed_keys_become_unknown_instead_of_vanishing() {
        let mut cursor = Point::default();
        let event = translate_one(
            &mut cursor,
            WindowEvent::Key(glfw::Key::Kp4, 0, Action::Press, glfw::Modifiers::empty()),
        )
        .unwrap();

        assert!(matches!(
            event.kind,
            EventKind::KeyPress {
                key: Key::Unknown,
                ..
            }
        ));
    }

    #[test]
    fn button_events_are_stamped_with_the_tracked_cursor_position() {
        let mut cursor = Point::default();

        let motion = translate_one(&mut cursor, WindowEvent::CursorPos(10.9, 20.2)).unwrap();
        assert_eq!(
            motion.kind,
            EventKind::MouseMove {
                pos: Point::new(10, 20)
            }
        );

        let click = translate_one(
            &mut cursor,
            WindowEvent::MouseButton(
                glfw::MouseButton::Button1,
                Action::Press,
                glfw::Modifiers::empty(),
            ),
        )
        .unwrap();
        assert_eq!(
            click.kind,
            EventKind::MouseButtonPress {
                button: MouseButton::Left,
                pos: Point::new(10, 20),
            }
        );
    }

    #[test]
    fn scroll_deltas_truncate_to_whole_lines() {
        let mut cursor = Point::default();
        let event = translate_one(&mut cursor, WindowEvent::Scroll(0.0, 1.0)).unwrap();
        assert_eq!(
            event.kind,
            EventKind::MouseWheel {
                delta_x: 0,
                delta_y: 1
            }
        );
    }

    #[test]
    fn focus_changes_map_to_activate_and_deactivate() {
        let mut cursor = Point::default();
        let gained = translate_one(&mut cursor, WindowEvent::Focus(true)).unwrap();
        let lost = translate_one(&mut cursor, WindowEvent::Focus(false)).unwrap();
        assert_eq!(gained.kind, EventKind::WindowActivate);
        assert_eq!(lost.kind, EventKind::WindowDeactivate);
    }

    #[test]
    fn window_notifications_translate() {
        let mut cursor = Point::default();
        let moved = translate_one(&mut cursor, WindowEvent::Pos(30, 40)).unwrap();
        let resized = translate_one(&mut cursor, WindowEvent::Size(800, 600)).unwrap();
        let closed = translate_one(&mut cursor, WindowEvent::Close).unwrap();

        assert_eq!(
            moved.kind,
            EventKind::WindowMove {
                pos: Point::new(30, 40)
            }
        );
        assert_eq!(
            resized.kind,
            EventKind::WindowResize {
                size: Size::new(800, 600)
            }
        );
        assert_eq!(closed.kind, EventKind::WindowClose);
    }

    #[test]
    fn file_drops_keep_their_paths() {
        let mut cursor = Point::default();
        let event = translate_one(
            &mut cursor,
            WindowEvent::FileDrop(vec![PathBuf::from("/tmp/save.bin")]),
        )
        .unwrap();

        assert_eq!(
            event.kind,
            EventKind::FileDrop {
                paths: vec![PathBuf::from("/tmp/save.bin")]
            }
        );
    }

    #[test]
    fn framebuffer_and_hover_noise_is_filtered_out() {
        let mut cursor = Point::default();
        assert!(translate_one(&mut cursor, WindowEvent::FramebufferSize(800, 600)).is_none());
        assert!(translate_one(&mut cursor, WindowEvent::CursorEnter(true)).is_none());
        assert!(translate_one(&mut cursor, WindowEvent::Iconify(true)).is_none());
    }
}
