//! Window and input subsystem
//!
//! This module provides the platform abstraction layer: a portable
//! window contract, a portable event model, and the backends that
//! implement them.
//!
//! # Architecture Overview
//!
//! The subsystem follows a layered architecture:
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │            Application Code               │
//! └─────────┬────────────────────▲────────────┘
//!           │ drives             │ on_event
//!    ┌──────▼─────────┐   ┌──────┴────────┐
//!    │ PlatformWindow │   │ EventHandler  │ ← Contracts (window.rs,
//!    │ trait          │   │ trait         │   handler.rs)
//!    └──────┬─────────┘   └──────▲────────┘
//!           │ Implemented by     │ PlatformEvent (event.rs)
//!  ┌────────▼──────────────┐     │
//!  │ glfw::GlfwWindow      │─────┘ ← Native backend (glfw/)
//!  │ null::NullWindow      │       ← Headless backend (null.rs)
//!  └───────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **`window`**: the [`PlatformWindow`] contract, window ids and
//!   OpenGL context options
//! - **`event`**: the portable event model backends translate into
//! - **`handler`**: the [`EventHandler`] contract plus reusable
//!   handlers
//! - **`registry`**: session-wide window bookkeeping
//! - **`options`**: declarative window creation options
//! - **`glfw`** / **`null`**: the two backends
//!
//! # Design Goals
//!
//! - **Backend Agnostic**: applications never touch GLFW types
//! - **Deterministic**: every input reaches the application as a
//!   [`PlatformEvent`], the unit the trace subsystem records and
//!   replays
//! - **Testable**: the headless backend implements the full contract
//!   without a display

pub mod context;
pub mod event;
pub mod geometry;
pub mod glfw;
pub mod handler;
pub mod null;
pub mod options;
pub mod registry;
pub mod window;

pub use self::glfw::{GlfwGlContext, GlfwPlatform, GlfwWindow, WindowError, WindowResult};
pub use context::OpenGlContext;
pub use event::{EventKind, Key, Modifiers, MouseButton, PlatformEvent};
pub use geometry::{Point, Size};
pub use handler::{EventHandler, FnEventHandler, QueueingHandler};
pub use null::{NullGlCapabilities, NullGlContext, NullPlatform, NullWindow};
pub use options::WindowOptions;
pub use registry::{SharedRegistry, WindowRegistry};
pub use window::{OpenGlOptions, PlatformWindow, VsyncMode, WindowId};
