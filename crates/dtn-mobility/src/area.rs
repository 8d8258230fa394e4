//! Axis-aligned movement bounds.

use dtn_core::{NodeRng, Position};

use crate::{MobilityError, MobilityResult};

/// A rectangle `[min.x, max.x] × [min.y, max.y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub min: Position,
    pub max: Position,
}

impl Area {
    /// Rectangle from two corners.  Width and height must both be positive.
    pub fn new(min: Position, max: Position) -> MobilityResult<Self> {
        let (width, height) = (max.x - min.x, max.y - min.y);
        if !(width > 0.0 && height > 0.0) {
            return Err(MobilityError::DegenerateArea { width, height });
        }
        Ok(Self { min, max })
    }

    /// Rectangle anchored at the origin.
    pub fn sized(width: f64, height: f64) -> MobilityResult<Self> {
        Self::new(Position::new(0.0, 0.0), Position::new(width, height))
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Uniformly distributed point inside the area.
    pub fn random_point(&self, rng: &mut NodeRng) -> Position {
        Position::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}
