//! Window creation options

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};
use super::window::OpenGlOptions;

/// Everything a platform needs to create a window
///
/// Serde-enabled so applications can keep it in a config file; missing
/// fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title
    pub title: String,
    /// Initial client-area size
    pub size: Size,
    /// Initial position; `None` lets the window manager place it
    pub position: Option<Point>,
    /// Show the window immediately
    pub visible: bool,
    /// Allow the user to resize the window
    pub resizable: bool,
    /// Start fullscreen on the primary monitor
    pub fullscreen: bool,
    /// Start without frame and decorations
    pub frameless: bool,
    /// Capture the mouse immediately
    pub grabs_mouse: bool,
    /// OpenGL attributes to build the window with
    ///
    /// `None` creates a window with no GL client API at all; asking
    /// such a window for a context later fails (with a logged
    /// diagnostic), because GLFW fixes context attributes at window
    /// creation time.
    pub gl: Option<OpenGlOptions>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "platform_shell".to_string(),
            size: Size::default(),
            position: None,
            visible: true,
            resizable: true,
            fullscreen: false,
            frameless: false,
            grabs_mouse: false,
            gl: Some(OpenGlOptions::default()),
        }
    }
}

impl WindowOptions {
    /// Options with the defaults above
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder pattern)
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial size (builder pattern)
    #[must_use]
    pub fn with_size(mut self, w: u32, h: u32) -> Self {
        self.size = Size::new(w, h);
        self
    }

    /// Set the initial position (builder pattern)
    #[must_use]
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Start hidden instead of shown (builder pattern)
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Start fullscreen (builder pattern)
    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Start frameless (builder pattern)
    #[must_use]
    pub fn with_frameless(mut self, frameless: bool) -> Self {
        self.frameless = frameless;
        self
    }

    /// Allow or forbid user resizing (builder pattern)
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Start with the mouse captured (builder pattern)
    #[must_use]
    pub fn with_grabs_mouse(mut self, grab: bool) -> Self {
        self.grabs_mouse = grab;
        self
    }

    /// Set the OpenGL attributes, or `None` for a context-less window
    /// (builder pattern)
    #[must_use]
    pub fn with_gl(mut self, gl: Option<OpenGlOptions>) -> Self {
        self.gl = gl;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("window title must not be empty".to_string());
        }
        if self.size.w == 0 || self.size.h == 0 {
            return Err(format!("window size {} has a zero dimension", self.size));
        }
        if let Some(gl) = &self.gl {
            gl.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(WindowOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let options = WindowOptions::new().with_size(0, 600);
        assert!(options.validate().is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        let options = WindowOptions::new().with_title("");
        assert!(options.validate().is_err());
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let options: WindowOptions = ron::from_str("(title: \"demo\")").unwrap();
        assert_eq!(options.title, "demo");
        assert_eq!(options.size, Size::default());
        assert!(options.visible);
    }

    #[test]
    fn builder_chain_covers_every_field() {
        let options = WindowOptions::new()
            .with_title("capture")
            .with_size(1280, 720)
            .with_position(40, 60)
            .with_visible(false)
            .with_fullscreen(true)
            .with_frameless(true)
            .with_resizable(false)
            .with_grabs_mouse(true)
            .with_gl(None);
        assert_eq!(options.title, "capture");
        assert_eq!(options.size, Size::new(1280, 720));
        assert_eq!(options.position, Some(Point::new(40, 60)));
        assert!(!options.visible);
        assert!(options.fullscreen);
        assert!(options.frameless);
        assert!(!options.resizable);
        assert!(options.grabs_mouse);
        assert!(options.gl.is_none());
    }
}
