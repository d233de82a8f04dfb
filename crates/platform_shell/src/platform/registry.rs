//! Window bookkeeping, scoped to a platform instance
//!
//! The registry is owned by the platform object and torn down with it;
//! nothing here is global. Windows hold a [`Weak`] reference back to
//! it: they unregister themselves on drop if the platform is still
//! alive, and silently skip it if the platform went away first.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::window::WindowId;

/// Strong registry handle, held by the platform
pub type SharedRegistry = Rc<RefCell<WindowRegistry>>;

/// Weak registry handle, held by each window
pub type RegistryRef = Weak<RefCell<WindowRegistry>>;

/// Tracks which window ids are alive within one platform instance
///
/// Ids are allocated here so they are unique for the whole session and
/// never reused, even after a window dies. Registration mistakes are
/// caller bugs and fail fast.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    next_id: u32,
    windows: HashMap<WindowId, String>,
}

impl WindowRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            next_id: 1,
            windows: HashMap::new(),
        }
    }

    /// Create an empty registry behind the shared handle backends expect
    pub fn new_shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocate the next window id; non-zero, unique for this registry
    pub fn allocate_id(&mut self) -> WindowId {
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = WindowId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record a window as alive
    ///
    /// Panics on a zero id or an id that is already registered; both
    /// mean the backend skipped [`Self::allocate_id`].
    pub fn register(&mut self, id: WindowId, title: &str) {
        assert!(id.raw() != 0, "window id 0 is reserved");
        let previous = self.windows.insert(id, title.to_string());
        assert!(previous.is_none(), "{id} registered twice");
        log::debug!("registered {id} ({title:?}), {} live", self.windows.len());
    }

    /// Record a window as dead
    ///
    /// Panics if the id is not registered; a double unregister means a
    /// window tore down twice.
    pub fn unregister(&mut self, id: WindowId) {
        let removed = self.windows.remove(&id);
        assert!(removed.is_some(), "{id} unregistered but never registered");
        log::debug!("unregistered {id}, {} live", self.windows.len());
    }

    /// Whether the id belongs to a live window
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Title the window was registered under, if it is alive
    pub fn title_of(&self, id: WindowId) -> Option<&str> {
        self.windows.get(&id).map(String::as_str)
    }

    /// Number of live windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no windows are alive
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Ids of every live window, ascending
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
