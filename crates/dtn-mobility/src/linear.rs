//! Constant-velocity movement, optionally bouncing inside an [`Area`].

use dtn_core::Position;

use crate::{Area, Mobility, MobilityError, MobilityResult};

/// Moves at a fixed velocity (metres per second).
///
/// With an area the node reflects off the walls like a billiard ball; the
/// velocity component normal to a wall flips on every bounce.  Without an
/// area it drifts forever.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearMobility {
    position: Position,
    vx:       f64,
    vy:       f64,
    area:     Option<Area>,
}

impl LinearMobility {
    /// Unbounded drift from `start`.
    pub fn new(start: Position, vx: f64, vy: f64) -> Self {
        Self { position: start, vx, vy, area: None }
    }

    /// Drift from `start`, reflecting inside `area`.
    pub fn bounded(start: Position, vx: f64, vy: f64, area: Area) -> MobilityResult<Self> {
        if !area.contains(start) {
            return Err(MobilityError::StartOutsideArea(start));
        }
        Ok(Self { position: start, vx, vy, area: Some(area) })
    }

    /// Current velocity `(vx, vy)`.
    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }
}

impl Mobility for LinearMobility {
    fn current_position(&self) -> Position {
        self.position
    }

    fn move_by(&mut self, delta_secs: f64) {
        let x = self.position.x + self.vx * delta_secs;
        let y = self.position.y + self.vy * delta_secs;
        match self.area {
            None => self.position = Position::new(x, y),
            Some(area) => {
                let (x, vx) = reflect(x, self.vx, area.min.x, area.max.x);
                let (y, vy) = reflect(y, self.vy, area.min.y, area.max.y);
                self.position = Position::new(x, y);
                self.vx = vx;
                self.vy = vy;
            }
        }
    }
}

/// Fold `p` back into `[lo, hi]` as if it had bounced off both walls,
/// flipping `v` once per bounce.  Works for overshoots of any size.
fn reflect(p: f64, v: f64, lo: f64, hi: f64) -> (f64, f64) {
    if (lo..=hi).contains(&p) {
        return (p, v);
    }
    let width = hi - lo;
    let offset = p - lo;
    let bounces = (offset / width).floor();
    let folded = offset.rem_euclid(2.0 * width);
    let p = if folded > width { lo + 2.0 * width - folded } else { lo + folded };
    let v = if bounces.rem_euclid(2.0) != 0.0 { -v } else { v };
    (p, v)
}
