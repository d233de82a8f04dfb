//! Headless backend
//!
//! A complete in-memory implementation of the window contract: state
//! goes into plain fields instead of a native library. Used by the test
//! suite, by replay runs on machines with no display, and as the
//! reference for how the context-creation rules behave when the native
//! layer cannot interfere.

use std::rc::Rc;

use crate::foundation::time::Stopwatch;

use super::context::OpenGlContext;
use super::event::{EventKind, PlatformEvent};
use super::geometry::{Point, Size};
use super::handler::EventHandler;
use super::options::WindowOptions;
use super::registry::{RegistryRef, SharedRegistry, WindowRegistry};
use super::window::{OpenGlOptions, PlatformWindow, WindowId};

/// What the simulated GL driver is capable of
#[derive(Debug, Clone, Copy)]
pub struct NullGlCapabilities {
    /// Whether negative swap intervals (adaptive vsync) are accepted
    pub supports_adaptive_vsync: bool,
    /// Fail every context creation, as a broken driver would
    pub fail_context_creation: bool,
}

impl Default for NullGlCapabilities {
    fn default() -> Self {
        Self {
            supports_adaptive_vsync: true,
            fail_context_creation: false,
        }
    }
}

/// Headless platform: owns the registry and a monotonic clock
pub struct NullPlatform {
    registry: SharedRegistry,
    clock: Rc<Stopwatch>,
    gl_capabilities: NullGlCapabilities,
}

impl Default for NullPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl NullPlatform {
    /// Create a headless platform with a fully capable simulated driver
    pub fn new() -> Self {
        Self {
            registry: WindowRegistry::new_shared(),
            clock: Rc::new(Stopwatch::start_new()),
            gl_capabilities: NullGlCapabilities::default(),
        }
    }

    /// Override the simulated driver capabilities (builder pattern)
    #[must_use]
    pub fn with_gl_capabilities(mut self, capabilities: NullGlCapabilities) -> Self {
        self.gl_capabilities = capabilities;
        self
    }

    /// Create a headless window dispatching into `handler`
    pub fn create_window(
        &mut self,
        options: &WindowOptions,
        handler: Box<dyn EventHandler>,
    ) -> NullWindow {
        let id = self.registry.borrow_mut().allocate_id();
        let window = NullWindow::new(
            Rc::downgrade(&self.registry),
            handler,
            id,
            options,
            self.gl_capabilities,
            Rc::clone(&self.clock),
        );
        self.registry.borrow_mut().register(id, &options.title);
        window
    }

    /// Shared handle to the window registry
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Seconds since the platform was created
    pub fn time(&self) -> f64 {
        self.clock.elapsed_secs()
    }
}

/// A window that exists only as state
pub struct NullWindow {
    registry: RegistryRef,
    handler: Box<dyn EventHandler>,
    id: WindowId,
    title: String,
    size: Size,
    position: Point,
    visible: bool,
    fullscreen: bool,
    frameless: bool,
    grabs_mouse: bool,
    gl_capabilities: NullGlCapabilities,
    clock: Rc<Stopwatch>,
}

impl NullWindow {
    /// Construct a headless window
    ///
    /// [`NullPlatform::create_window`] is the normal path; direct
    /// construction exists for tests that need full control. Panics on
    /// a zero id or a registry that is already dead, because a window
    /// must never outlive the bookkeeping that tracks it from birth.
    pub fn new(
        registry: RegistryRef,
        handler: Box<dyn EventHandler>,
        id: WindowId,
        options: &WindowOptions,
        gl_capabilities: NullGlCapabilities,
        clock: Rc<Stopwatch>,
    ) -> Self {
        assert!(id.raw() != 0, "window id 0 is reserved");
        assert!(
            registry.upgrade().is_some(),
            "window constructed against a dead registry"
        );
        Self {
            registry,
            handler,
            id,
            title: options.title.clone(),
            size: options.size,
            position: options.position.unwrap_or_default(),
            visible: options.visible,
            fullscreen: options.fullscreen,
            frameless: options.frameless,
            grabs_mouse: options.grabs_mouse,
            gl_capabilities,
            clock,
        }
    }

    /// Dispatch a fabricated event to this window's handler
    ///
    /// Stamps the platform clock and this window's id; returns whether
    /// the handler consumed the event.
    pub fn inject(&mut self, kind: EventKind) -> bool {
        let event = PlatformEvent::new(self.clock.elapsed_secs(), self.id, kind);
        self.handler.on_event(&event)
    }

    /// Dispatch an already-built event unchanged
    pub fn inject_event(&mut self, event: &PlatformEvent) -> bool {
        self.handler.on_event(event)
    }
}

impl PlatformWindow for NullWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_position(&mut self, pos: Point) {
        self.position = pos;
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        // No monitor to fill; only the flag changes.
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_frameless(&mut self, frameless: bool) {
        self.frameless = frameless;
    }

    fn is_frameless(&self) -> bool {
        self.frameless
    }

    fn set_grabs_mouse(&mut self, grab: bool) {
        self.grabs_mouse = grab;
    }

    fn grabs_mouse(&self) -> bool {
        self.grabs_mouse
    }

    fn activate(&mut self) {
        self.visible = true;
    }

    fn system_handle(&self) -> usize {
        log::debug!("{} is headless, no native handle to return", self.id);
        0
    }

    fn create_opengl_context(&mut self, options: &OpenGlOptions) -> Option<Box<dyn OpenGlContext>> {
        if self.gl_capabilities.fail_context_creation {
            log::error!("{}: simulated driver refused to create a context", self.id);
            return None;
        }

        let (interval, fell_back) = options
            .vsync
            .resolve(self.gl_capabilities.supports_adaptive_vsync);
        if fell_back {
            log::warn!(
                "{}: adaptive vsync not supported, falling back to normal sync",
                self.id
            );
        }

        Some(Box::new(NullGlContext {
            applied: options.clone(),
            interval,
            current: false,
            swap_count: 0,
        }))
    }
}

impl Drop for NullWindow {
    fn drop(&mut self) {
        // Unregister before the rest of the window state goes away. If
        // the platform died first the weak handle is simply dead.
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(self.id);
        }
    }
}

/// Simulated OpenGL context
///
/// Records what was applied so tests can assert on it.
pub struct NullGlContext {
    applied: OpenGlOptions,
    interval: i32,
    current: bool,
    swap_count: u64,
}

impl NullGlContext {
    /// Whether the simulated context came out core profile
    ///
    /// Mirrors the native rule: core profile is only in effect for
    /// version 3.2 and newer requests.
    pub fn is_core_profile(&self) -> bool {
        (
            self.applied.version_major.unwrap_or(1),
            self.applied.version_minor.unwrap_or(0),
        ) >= (3, 2)
    }

    /// The attribute set the context was created from
    pub const fn applied_options(&self) -> &OpenGlOptions {
        &self.applied
    }

    /// Whether `make_current` has been called
    pub const fn is_current(&self) -> bool {
        self.current
    }

    /// Number of buffer swaps so far
    pub const fn swap_count(&self) -> u64 {
        self.swap_count
    }
}

impl OpenGlContext for NullGlContext {
    fn make_current(&mut self) {
        self.current = true;
    }

    fn swap_buffers(&mut self) {
        self.swap_count += 1;
    }

    fn swap_interval(&self) -> i32 {
        self.interval
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
