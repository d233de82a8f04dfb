//! OpenGL context contract
//!
//! Deliberately small: the crate's job ends at handing the application
//! a working context. Issuing GL calls through it is someone else's
//! concern.

/// A live OpenGL context bound to one window
///
/// Obtained from [`crate::platform::PlatformWindow::create_opengl_context`].
/// The context belongs to its window; keep it no longer than the window
/// that issued it.
pub trait OpenGlContext {
    /// Make this context current on the calling thread
    fn make_current(&mut self);

    /// Swap front and back buffers
    fn swap_buffers(&mut self);

    /// The swap interval that was actually applied: -1, 0 or 1
    ///
    /// Differs from the requested one only when an adaptive request
    /// degraded to normal sync.
    fn swap_interval(&self) -> i32;

    /// Downcasting support for backend-specific inspection
    fn as_any(&self) -> &dyn std::any::Any;
}
