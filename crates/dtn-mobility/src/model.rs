//! The `Mobility` trait: the per-node movement strategy.

use dtn_core::Position;

/// Pluggable node movement.
///
/// A node holds one implementation for the whole run.  The driver advances it
/// with [`move_by`](Self::move_by) once per tick; everything else reads
/// [`current_position`](Self::current_position).
pub trait Mobility: Send {
    /// Where the node is now.
    fn current_position(&self) -> Position;

    /// Advance the model by `delta_secs` of simulated time.
    fn move_by(&mut self, delta_secs: f64);
}

/// A node that never moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stationary(pub Position);

impl Mobility for Stationary {
    fn current_position(&self) -> Position {
        self.0
    }

    fn move_by(&mut self, _delta_secs: f64) {}
}
