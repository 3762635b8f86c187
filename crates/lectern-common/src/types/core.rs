use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding box in page pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Detached or invisible boxes report zero width and zero height.
    pub fn is_zero_area(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Inclusive test against the vertical span `[y, bottom]`.
    pub fn spans_y(&self, y: f64) -> bool {
        y >= self.y && y <= self.bottom()
    }
}

/// Handle into a node arena. Only meaningful for the arena that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}
