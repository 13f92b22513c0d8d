//! Immutable board coordinates.
//!
//! Coordinates are plain values: every diagonal step returns a new
//! coordinate, so in-flight capture branches never alias a shared position.
//! A coordinate may lie off the board; validity is always checked against a
//! board's extent.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`.
    #[inline]
    pub const fn step(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Integer midpoint, used to locate the piece jumped by a two-cell move.
    #[inline]
    pub const fn midpoint(self, other: Coordinate) -> Self {
        Self {
            x: (self.x + other.x) / 2,
            y: (self.y + other.y) / 2,
        }
    }

    /// Euclidean distance from `(0, 0)`, rounded to the nearest integer.
    pub fn distance_from_origin(self) -> i32 {
        f64::from(self.x * self.x + self.y * self.y).sqrt().round() as i32
    }
}

// Distance ordering is only used for incidental sorting; (x, y) breaks ties so
// the order agrees with equality.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_from_origin()
            .cmp(&other.distance_from_origin())
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
