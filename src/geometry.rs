//! Plane geometry: positions and distances.

use serde::{Deserialize, Serialize};

/// A point on the plane.
///
/// Positions are values: movement produces a new `Position` instead of
/// mutating an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Position reached by moving `length` along the direction from `self`
    /// to `toward`, given their precomputed `distance`.
    pub fn offset_toward(self, toward: Position, distance: f64, length: f64) -> Self {
        let ux = (toward.x - self.x) / distance;
        let uy = (toward.y - self.y) / distance;
        self.translated(ux * length, uy * length)
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Euclidean distance between two positions
#[inline]
pub fn distance(p: Position, q: Position) -> f64 {
    squared_distance(p, q).sqrt()
}

/// Squared Euclidean distance, for comparisons where only ordering matters
#[inline]
pub fn squared_distance(p: Position, q: Position) -> f64 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}
