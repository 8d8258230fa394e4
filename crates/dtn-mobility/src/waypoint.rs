//! Random-waypoint mobility.

use dtn_core::{NodeRng, Position};

use crate::{Area, Mobility, MobilityError, MobilityResult};

/// Upper bound on waypoints reached within one `move_by` call.
const MAX_LEGS_PER_MOVE: usize = 64;

/// Picks a uniform random target inside `area`, walks to it in a straight line
/// at a speed drawn uniformly from `[min_speed, max_speed]`, then repeats.
///
/// Randomness comes from a per-node [`NodeRng`], so a run is reproducible from
/// its global seed regardless of how many other nodes exist.
#[derive(Clone, Debug)]
pub struct RandomWaypoint {
    position:  Position,
    target:    Position,
    speed:     f64,
    min_speed: f64,
    max_speed: f64,
    area:      Area,
    rng:       NodeRng,
}

impl RandomWaypoint {
    pub fn new(
        start:     Position,
        area:      Area,
        min_speed: f64,
        max_speed: f64,
        mut rng:   NodeRng,
    ) -> MobilityResult<Self> {
        if !(min_speed > 0.0 && min_speed <= max_speed && max_speed.is_finite()) {
            return Err(MobilityError::InvalidSpeed { min: min_speed, max: max_speed });
        }
        if !area.contains(start) {
            return Err(MobilityError::StartOutsideArea(start));
        }
        let target = area.random_point(&mut rng);
        let speed = rng.gen_range(min_speed..=max_speed);
        Ok(Self { position: start, target, speed, min_speed, max_speed, area, rng })
    }

    /// The waypoint currently being walked to.
    pub fn target(&self) -> Position {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    fn next_leg(&mut self) {
        self.target = self.area.random_point(&mut self.rng);
        self.speed = self.rng.gen_range(self.min_speed..=self.max_speed);
    }
}

impl Mobility for RandomWaypoint {
    fn current_position(&self) -> Position {
        self.position
    }

    fn move_by(&mut self, delta_secs: f64) {
        let mut budget = self.speed * delta_secs;
        for _ in 0..MAX_LEGS_PER_MOVE {
            if budget <= 0.0 {
                return;
            }
            let remaining = self.position.distance(self.target);
            if budget < remaining {
                self.position = self.position.step_toward(self.target, budget);
                return;
            }
            budget -= remaining;
            self.position = self.target;
            self.next_leg();
        }
    }
}
