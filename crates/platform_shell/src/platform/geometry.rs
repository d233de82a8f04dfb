//! Window-space geometry primitives
//!
//! Positions are signed (a window can sit at negative desktop
//! coordinates on a multi-monitor layout); sizes are not.

use serde::{Deserialize, Serialize};

/// A position in desktop or window coordinates, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Create a point from coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Size {
    /// Create a size from width and height
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self { w: 640, h: 480 }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_are_stable() {
        assert_eq!(Point::new(-10, 20).to_string(), "(-10, 20)");
        assert_eq!(Size::new(1280, 720).to_string(), "1280x720");
    }
}
