//! Planar coordinate type.
//!
//! Positions live on an unbounded Euclidean plane measured in metres.  They
//! are produced by mobility models and only ever read by the routing core.

/// A point on the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Axis-aligned range check: `true` when both `|dx|` and `|dy|` are at
    /// most `half_side`.  This is the neighbor criterion of the proximity
    /// query: a square of side `2 * half_side`, not a circle.
    #[inline]
    pub fn within_box(self, center: Position, half_side: f64) -> bool {
        (self.x - center.x).abs() <= half_side
            && (self.y - center.y).abs() <= half_side
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move at most `step` metres toward `target`.  Returns `target` exactly
    /// when it is within reach.
    pub fn step_toward(self, target: Position, step: f64) -> Position {
        let d = self.distance(target);
        if d <= step || d == 0.0 {
            return target;
        }
        let f = step / d;
        Position {
            x: self.x + (target.x - self.x) * f,
            y: self.y + (target.y - self.y) * f,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
