use std::path::{Path, PathBuf};

use platform_shell::platform::EventKind;
use platform_shell::trace::{EventTrace, EventTraceHeader};

#[derive(Debug)]
pub struct TraceSummary {
    pub path: PathBuf,
    pub payload_bytes: u64,
    pub has_checksum: bool,
    pub event_count: usize,
    pub first_timestamp: Option<f64>,
    pub last_timestamp: Option<f64>,
    pub keyboard_events: usize,
    pub mouse_events: usize,
    pub window_events: usize,
}

enum Category {
    Keyboard,
    Mouse,
    Window,
}

fn category(kind: &EventKind) -> Category {
    match kind {
        EventKind::KeyPress { .. } | EventKind::KeyRelease { .. } | EventKind::TextInput { .. } => {
            Category::Keyboard
        }
        EventKind::MouseButtonPress { .. }
        | EventKind::MouseButtonRelease { .. }
        | EventKind::MouseMove { .. }
        | EventKind::MouseWheel { .. } => Category::Mouse,
        _ => Category::Window,
    }
}

pub fn summarize(path: &Path, header: &EventTraceHeader, trace: &EventTrace) -> TraceSummary {
    let mut summary = TraceSummary {
        path: path.to_path_buf(),
        payload_bytes: header.save_file_size,
        has_checksum: header.checksum.is_some(),
        event_count: trace.len(),
        first_timestamp: trace.events().first().map(|e| e.timestamp),
        last_timestamp: trace.events().last().map(|e| e.timestamp),
        keyboard_events: 0,
        mouse_events: 0,
        window_events: 0,
    };

    for event in trace.events() {
        match category(&event.kind) {
            Category::Keyboard => summary.keyboard_events += 1,
            Category::Mouse => summary.mouse_events += 1,
            Category::Window => summary.window_events += 1,
        }
    }

    summary
}

pub fn describe(kind: &EventKind) -> String {
    match kind {
        EventKind::KeyPress { key, mods, repeat } => {
            let mut line = format!("key press {key:?}");
            if !mods.is_empty() {
                line.push_str(&format!(" [{mods:?}]"));
            }
            if *repeat {
                line.push_str(" (repeat)");
            }
            line
        }
        EventKind::KeyRelease { key, mods } => {
            let mut line = format!("key release {key:?}");
            if !mods.is_empty() {
                line.push_str(&format!(" [{mods:?}]"));
            }
            line
        }
        EventKind::TextInput { ch } => format!("text input {ch:?}"),
        EventKind::MouseButtonPress { button, pos } => {
            format!("button press {button:?} at {pos}")
        }
        EventKind::MouseButtonRelease { button, pos } => {
            format!("button release {button:?} at {pos}")
        }
        EventKind::MouseMove { pos } => format!("mouse move to {pos}"),
        EventKind::MouseWheel { delta_x, delta_y } => format!("wheel ({delta_x}, {delta_y})"),
        EventKind::WindowMove { pos } => format!("window move to {pos}"),
        EventKind::WindowResize { size } => format!("window resize to {size}"),
        EventKind::WindowActivate => "window activate".to_string(),
        EventKind::WindowDeactivate => "window deactivate".to_string(),
        EventKind::WindowClose => "window close".to_string(),
        EventKind::WindowRefresh => "window refresh".to_string(),
        EventKind::FileDrop { paths } => format!("file drop ({} files)", paths.len()),
    }
}

impl std::fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Trace Summary:")?;
        writeln!(f, "  File: {}", self.path.display())?;
        writeln!(f, "  Payload: {} bytes", self.payload_bytes)?;
        writeln!(
            f,
            "  Checksum: {}",
            if self.has_checksum { "present" } else { "none" }
        )?;
        writeln!(f, "  Events: {}", self.event_count)?;
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => {
                writeln!(
                    f,
                    "  Time span: {first:.3}s .. {last:.3}s ({:.3}s)",
                    last - first
                )?;
            }
            _ => writeln!(f, "  Time span: empty")?,
        }
        writeln!(
            f,
            "  Keyboard: {}  Mouse: {}  Window: {}",
            self.keyboard_events, self.mouse_events, self.window_events
        )
    }
}
