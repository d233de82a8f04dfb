//! # Platform Shell
//!
//! A windowing and input abstraction with deterministic event capture
//! and replay.
//!
//! ## Features
//!
//! - **Portable Windows**: one [`PlatformWindow`](platform::PlatformWindow)
//!   contract over GLFW and a headless backend
//! - **Portable Events**: every input arrives as a plain-data
//!   [`PlatformEvent`](platform::PlatformEvent)
//! - **Capture and Replay**: record a session's events to disk and
//!   drive the application through the same session later
//! - **OpenGL Contexts**: per-window context creation with a vsync
//!   policy that degrades gracefully
//! - **Headless Testing**: the null backend runs the full contract
//!   without a display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platform_shell::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut platform = GlfwPlatform::new()?;
//!     let mut window = platform.create_window(
//!         &WindowOptions::new().with_title("demo").with_size(800, 600),
//!         Box::new(FnEventHandler::new(|event| {
//!             println!("{event:?}");
//!             false
//!         })),
//!     )?;
//!
//!     let mut context = window
//!         .create_opengl_context(&OpenGlOptions::new().with_version(3, 3))
//!         .ok_or("no OpenGL context")?;
//!
//!     while !window.close_requested() {
//!         platform.poll_events();
//!         window.dispatch_pending_events();
//!         context.swap_buffers();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod platform;
pub mod trace;

/// Common imports for shell users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, Config, ConfigError},
        foundation::time::Stopwatch,
        platform::{
            EventHandler, EventKind, FnEventHandler, GlfwPlatform, GlfwWindow, Key, Modifiers,
            MouseButton, NullPlatform, NullWindow, OpenGlContext, OpenGlOptions, PlatformEvent,
            PlatformWindow, Point, QueueingHandler, Size, VsyncMode, WindowError, WindowId,
            WindowOptions, WindowResult,
        },
        trace::{
            is_traceable, EventTrace, EventTracePlayer, EventTraceRecorder, PlayerState,
            RecordingHandler, TraceError,
        },
    };
}
