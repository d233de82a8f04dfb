//! Window management using GLFW
//!
//! The native backend: one [`GlfwPlatform`] per process owns the GLFW
//! instance and the window registry, and hands out [`GlfwWindow`]
//! objects that implement the
//! [`PlatformWindow`](crate::platform::PlatformWindow) contract against
//! real OS windows.

mod context;
mod events;
mod window;

pub use context::GlfwGlContext;
pub use window::GlfwWindow;

use std::rc::Rc;

use thiserror::Error;

use crate::platform::handler::EventHandler;
use crate::platform::options::WindowOptions;
use crate::platform::registry::{SharedRegistry, WindowRegistry};
use crate::platform::window::{OpenGlOptions, PlatformWindow};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW itself refused to come up
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The native layer could not create the window
    #[error("Window creation failed")]
    CreationFailed,

    /// The requested window options are inconsistent
    #[error("invalid window options: {0}")]
    InvalidOptions(String),

    /// Any other error reported by GLFW
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

pub type WindowResult<T> = Result<T, WindowError>;

/// Native platform: owns the GLFW instance and the window registry
///
/// GLFW is single threaded; keep the platform and all its windows on
/// the thread that created them.
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    registry: SharedRegistry,
}

impl GlfwPlatform {
    /// Initialize GLFW
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;
        log::info!("GLFW initialized");
        Ok(Self {
            glfw,
            registry: WindowRegistry::new_shared(),
        })
    }

    /// Create a native window dispatching into `handler`
    ///
    /// Context attributes from [`WindowOptions::gl`] are applied here
    /// as creation hints; GLFW cannot change them afterwards. A window
    /// created with `gl: None` gets no client API and can never produce
    /// an OpenGL context.
    pub fn create_window(
        &mut self,
        options: &WindowOptions,
        handler: Box<dyn EventHandler>,
    ) -> WindowResult<GlfwWindow> {
        options.validate().map_err(WindowError::InvalidOptions)?;

        // Hints persist on the GLFW instance between creations.
        self.glfw.default_window_hints();
        self.glfw
            .window_hint(glfw::WindowHint::Visible(options.visible));
        self.glfw
            .window_hint(glfw::WindowHint::Resizable(options.resizable));
        self.glfw
            .window_hint(glfw::WindowHint::Decorated(!options.frameless));
        match &options.gl {
            Some(gl) => self.apply_gl_hints(gl),
            None => self
                .glfw
                .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi)),
        }

        let (mut native, events) = self
            .glfw
            .create_window(
                options.size.w,
                options.size.h,
                &options.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;
        native.set_all_polling(true);

        let id = self.registry.borrow_mut().allocate_id();
        let mut window = GlfwWindow::new(
            Rc::downgrade(&self.registry),
            handler,
            native,
            events,
            id,
            options,
        );
        self.registry.borrow_mut().register(id, &options.title);

        if let Some(pos) = options.position {
            window.set_position(pos);
        }
        if options.grabs_mouse {
            window.set_grabs_mouse(true);
        }
        if options.fullscreen {
            window.set_fullscreen(true);
        }

        log::info!("{id}: created \"{}\" at {}", options.title, options.size);
        Ok(window)
    }

    fn apply_gl_hints(&mut self, gl: &OpenGlOptions) {
        self.glfw
            .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        if let Some(major) = gl.version_major {
            self.glfw
                .window_hint(glfw::WindowHint::ContextVersionMajor(major));
        }
        if let Some(minor) = gl.version_minor {
            self.glfw
                .window_hint(glfw::WindowHint::ContextVersionMinor(minor));
        }
        if let Some(bits) = gl.depth_bits {
            self.glfw.window_hint(glfw::WindowHint::DepthBits(Some(bits)));
        }
        if let Some(bits) = gl.stencil_bits {
            self.glfw
                .window_hint(glfw::WindowHint::StencilBits(Some(bits)));
        }
        if let Some(double) = gl.double_buffer {
            self.glfw
                .window_hint(glfw::WindowHint::DoubleBuffer(double));
        }
        // GLFW rejects a core profile request below version 3.2.
        let version = (gl.version_major.unwrap_or(1), gl.version_minor.unwrap_or(0));
        if version >= (3, 2) {
            self.glfw.window_hint(glfw::WindowHint::OpenGlProfile(
                glfw::OpenGlProfileHint::Core,
            ));
        }
    }

    /// Pump the OS event queue
    ///
    /// Buffers native events on each window's receiver; call
    /// [`GlfwWindow::dispatch_pending_events`] on the windows you care
    /// about afterwards.
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Seconds since GLFW was initialized
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Shared handle to the window registry
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }
}
