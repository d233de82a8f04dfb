//! OpenGL context object for GLFW windows

use glfw::Context as _;

use crate::platform::context::OpenGlContext;

/// Convert a resolved swap interval into GLFW's swap interval type
pub(crate) fn to_swap_interval(interval: i32) -> glfw::SwapInterval {
    match interval {
        0 => glfw::SwapInterval::None,
        -1 => glfw::SwapInterval::Adaptive,
        n => glfw::SwapInterval::Sync(n as u32),
    }
}

/// OpenGL context handle for a GLFW window
///
/// Wraps GLFW's detachable render context so the caller can hold the
/// context alongside the window object itself. The recorded swap
/// interval is the one actually applied, after any adaptive-sync
/// fallback.
pub struct GlfwGlContext {
    context: glfw::PRenderContext,
    interval: i32,
}

impl GlfwGlContext {
    pub(crate) fn new(context: glfw::PRenderContext, interval: i32) -> Self {
        Self { context, interval }
    }
}

impl OpenGlContext for GlfwGlContext {
    fn make_current(&mut self) {
        self.context.make_current();
    }

    fn swap_buffers(&mut self) {
        self.context.swap_buffers();
    }

    fn swap_interval(&self) -> i32 {
        self.interval
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
