//! The window capability contract
//!
//! [`PlatformWindow`] is everything application code may do to a
//! window. Callers program against this trait only; which native
//! library sits underneath (GLFW, or nothing at all for headless runs)
//! is a construction-time decision.

use serde::{Deserialize, Serialize};

use super::context::OpenGlContext;
use super::geometry::{Point, Size};

/// Identifies a window for the lifetime of a platform instance
///
/// Ids are allocated by the platform's window registry, start at 1 and
/// never repeat within a session. `0` is never a valid id; backends
/// refuse to construct with one. Traces store ids and rebind them on
/// load, so the numeric value only has to be stable within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u32);

impl WindowId {
    /// Wrap a raw id
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window #{}", self.0)
    }
}

/// Vertical sync modes for a window's OpenGL context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VsyncMode {
    /// Present immediately, never wait for vblank
    Off,
    /// Wait for vblank every frame
    #[default]
    Normal,
    /// Late-swap tearing: wait for vblank unless the frame is already late
    Adaptive,
}

impl VsyncMode {
    /// The native swap interval this mode asks for: -1, 0 or 1
    pub const fn swap_interval(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::Normal => 1,
            Self::Adaptive => -1,
        }
    }

    /// Decide the swap interval to apply on a context.
    ///
    /// Adaptive sync needs driver support for negative intervals; when
    /// that is missing the request degrades to [`VsyncMode::Normal`]
    /// rather than failing. Returns the interval to apply and whether a
    /// fallback happened (so the backend can log it). Vsync trouble is
    /// never a reason to withhold the context itself.
    pub const fn resolve(self, supports_adaptive: bool) -> (i32, bool) {
        match self {
            Self::Adaptive if !supports_adaptive => (VsyncMode::Normal.swap_interval(), true),
            _ => (self.swap_interval(), false),
        }
    }
}

/// Options for creating a window's OpenGL context
///
/// `None` means "leave the native default alone"; an option is only
/// applied when explicitly requested. The profile is not configurable:
/// version 3.2 and newer contexts are created against the core
/// profile, older requests take whatever profile the driver gives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenGlOptions {
    /// Requested major context version
    pub version_major: Option<u32>,
    /// Requested minor context version
    pub version_minor: Option<u32>,
    /// Requested depth buffer bits
    pub depth_bits: Option<u32>,
    /// Requested stencil buffer bits
    pub stencil_bits: Option<u32>,
    /// Request single buffering when false (double is the default)
    pub double_buffer: Option<bool>,
    /// Vertical sync mode to apply once the context is current
    pub vsync: VsyncMode,
}

impl OpenGlOptions {
    /// Options that leave every attribute at its native default
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a specific context version (builder pattern)
    #[must_use]
    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version_major = Some(major);
        self.version_minor = Some(minor);
        self
    }

    /// Request a depth buffer size (builder pattern)
    #[must_use]
    pub fn with_depth_bits(mut self, bits: u32) -> Self {
        self.depth_bits = Some(bits);
        self
    }

    /// Request a stencil buffer size (builder pattern)
    #[must_use]
    pub fn with_stencil_bits(mut self, bits: u32) -> Self {
        self.stencil_bits = Some(bits);
        self
    }

    /// Request single or double buffering (builder pattern)
    #[must_use]
    pub fn with_double_buffer(mut self, double: bool) -> Self {
        self.double_buffer = Some(double);
        self
    }

    /// Set the vsync mode (builder pattern)
    #[must_use]
    pub fn with_vsync(mut self, vsync: VsyncMode) -> Self {
        self.vsync = vsync;
        self
    }

    /// Validate option consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.version_major.is_none() && self.version_minor.is_some() {
            return Err("minor context version requested without a major version".to_string());
        }
        Ok(())
    }
}

/// Everything a caller may do to a window
///
/// One object owns exactly one native window; the native handle stays
/// valid for the object's whole life and is released exactly once, when
/// the object is dropped. All setters are idempotent. Queries report
/// native state; a backend that cannot classify its own state (for
/// example a visibility bit that is neither shown nor hidden) must
/// panic rather than guess, since that is a backend bug and not an
/// environmental condition.
pub trait PlatformWindow {
    /// The registry id this window was constructed with
    fn id(&self) -> WindowId;

    /// Set the window title
    fn set_title(&mut self, title: &str);

    /// The current window title
    fn title(&self) -> String;

    /// Resize the client area
    fn resize(&mut self, size: Size);

    /// Current client-area size
    fn size(&self) -> Size;

    /// Move the window on the desktop
    fn set_position(&mut self, pos: Point);

    /// Current window position in desktop coordinates
    fn position(&self) -> Point;

    /// Show or hide the window
    fn set_visible(&mut self, visible: bool);

    /// Whether the window is currently shown
    fn is_visible(&self) -> bool;

    /// Enter or leave fullscreen on the primary monitor
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Whether the window is currently fullscreen
    fn is_fullscreen(&self) -> bool;

    /// Remove or restore the window frame and decorations
    fn set_frameless(&mut self, frameless: bool);

    /// Whether the window currently has no frame
    fn is_frameless(&self) -> bool;

    /// Confine and capture the mouse inside the window
    fn set_grabs_mouse(&mut self, grab: bool);

    /// Whether the mouse is currently captured
    fn grabs_mouse(&self) -> bool;

    /// Ask the OS to raise the window and give it input focus
    ///
    /// Best effort; window managers are free to ignore it.
    fn activate(&mut self);

    /// The native window handle as an opaque pointer-sized integer
    ///
    /// What the integer means is per-OS (HWND, NSWindow, X11 window id,
    /// Wayland surface). Returns `0` when the handle cannot be
    /// retrieved on this platform; the backend logs the reason. Callers
    /// must treat `0` as "unavailable", never dereference blindly.
    fn system_handle(&self) -> usize;

    /// Create the OpenGL context for this window
    ///
    /// Returns `None` (with a logged diagnostic) when the native layer
    /// cannot produce a context; callers must check. A window supports
    /// at most one live context; drop the old context before asking for
    /// a replacement. Vsync is applied per [`VsyncMode::resolve`]: an
    /// unsupported adaptive request degrades to normal sync and is
    /// logged, but still yields a context.
    fn create_opengl_context(&mut self, options: &OpenGlOptions) -> Option<Box<dyn OpenGlContext>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_interval_mapping_is_canonical() {
        assert_eq!(VsyncMode::Off.swap_interval(), 0);
        assert_eq!(VsyncMode::Normal.swap_interval(), 1);
        assert_eq!(VsyncMode::Adaptive.swap_interval(), -1);
    }

    #[test]
    fn adaptive_degrades_to_normal_without_support() {
        assert_eq!(VsyncMode::Adaptive.resolve(true), (-1, false));
        assert_eq!(VsyncMode::Adaptive.resolve(false), (1, true));
        assert_eq!(VsyncMode::Normal.resolve(false), (1, false));
        assert_eq!(VsyncMode::Off.resolve(false), (0, false));
    }

    #[test]
    fn options_builder_only_sets_what_was_asked() {
        let options = OpenGlOptions::new().with_version(3, 3).with_depth_bits(24);
        assert_eq!(options.version_major, Some(3));
        assert_eq!(options.version_minor, Some(3));
        assert_eq!(options.depth_bits, Some(24));
        assert_eq!(options.stencil_bits, None);
        assert_eq!(options.double_buffer, None);
        assert_eq!(options.vsync, VsyncMode::Normal);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn minor_version_alone_fails_validation() {
        let options = OpenGlOptions {
            version_minor: Some(3),
            ..OpenGlOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
