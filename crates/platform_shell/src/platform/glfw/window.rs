//! GLFW-backed window

use glfw::Context as _;
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};

use crate::platform::context::OpenGlContext;
use crate::platform::geometry::{Point, Size};
use crate::platform::handler::EventHandler;
use crate::platform::options::WindowOptions;
use crate::platform::registry::RegistryRef;
use crate::platform::window::{OpenGlOptions, PlatformWindow, WindowId};

use super::context::{to_swap_interval, GlfwGlContext};
use super::events;

/// A native window owned through GLFW
///
/// The native window is created by
/// [`GlfwPlatform::create_window`](super::GlfwPlatform::create_window)
/// and destroyed exactly once, when this object drops. Events arrive on
/// a per-window receiver after
/// [`GlfwPlatform::poll_events`](super::GlfwPlatform::poll_events) has
/// pumped the OS queue; [`GlfwWindow::dispatch_pending_events`] drains
/// the receiver into the handler.
pub struct GlfwWindow {
    registry: RegistryRef,
    handler: Box<dyn EventHandler>,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    id: WindowId,
    title: String,
    cursor_pos: Point,
    windowed_rect: Option<(Point, Size)>,
    creation_gl: Option<OpenGlOptions>,
}

impl GlfwWindow {
    /// Wrap a freshly created native window
    ///
    /// Panics on a zero id or a registry that is already dead, because
    /// a window must never outlive the bookkeeping that tracks it from
    /// birth.
    pub(crate) fn new(
        registry: RegistryRef,
        handler: Box<dyn EventHandler>,
        window: glfw::PWindow,
        events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
        id: WindowId,
        options: &WindowOptions,
    ) -> Self {
        assert!(id.raw() != 0, "window id 0 is reserved");
        assert!(
            registry.upgrade().is_some(),
            "window constructed against a dead registry"
        );
        let (cx, cy) = window.get_cursor_pos();
        Self {
            registry,
            handler,
            window,
            events,
            id,
            title: options.title.clone(),
            cursor_pos: Point::new(cx as i32, cy as i32),
            windowed_rect: None,
            creation_gl: options.gl.clone(),
        }
    }

    /// Drain buffered native events into the handler
    ///
    /// Call after [`GlfwPlatform::poll_events`](super::GlfwPlatform::poll_events);
    /// GLFW buffers events per window between polls. Returns how many
    /// events were translated and dispatched.
    pub fn dispatch_pending_events(&mut self) -> usize {
        let mut dispatched = 0;
        for (timestamp, event) in glfw::flush_messages(&self.events) {
            if let Some(event) = events::translate(timestamp, self.id, &mut self.cursor_pos, event)
            {
                self.handler.on_event(&event);
                dispatched += 1;
            }
        }
        dispatched
    }

    /// Whether the user or the application has requested closing
    pub fn close_requested(&self) -> bool {
        self.window.should_close()
    }
}

impl PlatformWindow for GlfwWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn set_title(&mut self, title: &str) {
        // GLFW has no title query; the wrapper keeps the last value set.
        self.window.set_title(title);
        self.title = title.to_string();
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn resize(&mut self, size: Size) {
        self.window.set_size(size.w as i32, size.h as i32);
    }

    fn size(&self) -> Size {
        let (width, height) = self.window.get_size();
        Size::new(width as u32, height as u32)
    }

    fn set_position(&mut self, pos: Point) {
        self.window.set_pos(pos.x, pos.y);
    }

    fn position(&self) -> Point {
        let (x, y) = self.window.get_pos();
        Point::new(x, y)
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.window.show();
        } else {
            self.window.hide();
        }
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.is_fullscreen() {
            return;
        }
        if fullscreen {
            let (x, y) = self.window.get_pos();
            let (w, h) = self.window.get_size();
            self.windowed_rect = Some((Point::new(x, y), Size::new(w as u32, h as u32)));

            let mut glfw = self.window.glfw.clone();
            let window = &mut self.window;
            let id = self.id;
            glfw.with_primary_monitor(|_, monitor| match monitor {
                Some(monitor) => {
                    let mode = monitor.get_video_mode();
                    let (mw, mh, refresh) = mode.map_or((w as u32, h as u32, None), |m| {
                        (m.width, m.height, Some(m.refresh_rate))
                    });
                    window.set_monitor(
                        glfw::WindowMode::FullScreen(monitor),
                        0,
                        0,
                        mw,
                        mh,
                        refresh,
                    );
                    log::info!("{id}: fullscreen at {mw}x{mh}");
                }
                None => log::warn!("{id}: no primary monitor, staying windowed"),
            });
        } else {
            let (pos, size) = self
                .windowed_rect
                .take()
                .unwrap_or((Point::new(64, 64), Size::default()));
            self.window
                .set_monitor(glfw::WindowMode::Windowed, pos.x, pos.y, size.w, size.h, None);
            log::info!("{}: windowed at {} {}", self.id, pos, size);
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.window
            .with_window_mode(|mode| matches!(mode, glfw::WindowMode::FullScreen(_)))
    }

    fn set_frameless(&mut self, frameless: bool) {
        self.window.set_decorated(!frameless);
    }

    fn is_frameless(&self) -> bool {
        !self.window.is_decorated()
    }

    fn set_grabs_mouse(&mut self, grab: bool) {
        let mode = if grab {
            glfw::CursorMode::Disabled
        } else {
            glfw::CursorMode::Normal
        };
        self.window.set_cursor_mode(mode);
    }

    fn grabs_mouse(&self) -> bool {
        self.window.get_cursor_mode() == glfw::CursorMode::Disabled
    }

    fn activate(&mut self) {
        self.window.focus();
    }

    fn system_handle(&self) -> usize {
        match self.window.raw_window_handle() {
            RawWindowHandle::Win32(handle) => handle.hwnd as usize,
            RawWindowHandle::AppKit(handle) => handle.ns_window as usize,
            RawWindowHandle::Xlib(handle) => handle.window as usize,
            RawWindowHandle::Wayland(handle) => handle.surface as usize,
            other => {
                log::warn!("{}: no handle mapping for {other:?}, reporting 0", self.id);
                0
            }
        }
    }

    fn create_opengl_context(&mut self, options: &OpenGlOptions) -> Option<Box<dyn OpenGlContext>> {
        let Some(creation) = &self.creation_gl else {
            log::error!(
                "{}: window was created without an OpenGL client API, no context available",
                self.id
            );
            return None;
        };
        if attributes_differ(options, creation) {
            // GLFW fixes context attributes at window creation; only the
            // vsync half of a later request can still be honored.
            log::warn!(
                "{}: requested context attributes differ from the ones the window was created with",
                self.id
            );
        }

        let mut context = self.window.render_context();
        context.make_current();

        let mut glfw = self.window.glfw.clone();
        let supports_adaptive = glfw.extension_supported("WGL_EXT_swap_control_tear")
            || glfw.extension_supported("GLX_EXT_swap_control_tear");
        let (interval, fell_back) = options.vsync.resolve(supports_adaptive);
        if fell_back {
            log::warn!(
                "{}: adaptive vsync not supported, falling back to normal sync",
                self.id
            );
        }
        glfw.set_swap_interval(to_swap_interval(interval));

        log::info!(
            "{}: OpenGL context current, swap interval {interval}",
            self.id
        );
        Some(Box::new(GlfwGlContext::new(context, interval)))
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        // Unregister before the native window goes away. If the
        // platform died first the weak handle is simply dead.
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(self.id);
        }
        log::debug!("{}: native window released", self.id);
    }
}

/// Whether two option sets disagree on any creation-time attribute
fn attributes_differ(a: &OpenGlOptions, b: &OpenGlOptions) -> bool {
    a.version_major != b.version_major
        || a.version_minor != b.version_minor
        || a.depth_bits != b.depth_bits
        || a.stencil_bits != b.stencil_bits
        || a.double_buffer != b.double_buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::window::VsyncMode;

    #[test]
    fn attribute_comparison_ignores_vsync() {
        let creation = OpenGlOptions::new().with_version(3, 3);
        let same_but_vsync = creation.clone().with_vsync(VsyncMode::Off);
        let different = creation.clone().with_depth_bits(16);

        assert!(!attributes_differ(&creation, &same_but_vsync));
        assert!(attributes_differ(&creation, &different));
    }
}
