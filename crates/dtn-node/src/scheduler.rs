//! What a tick driver provides to the nodes it runs.

use dtn_core::{NodeId, SimConfig};
use dtn_spatial::GridIndex;

use crate::{CarryNode, NodeResult};

/// The driver contract seen by node construction and per-tick operations.
///
/// The driver owns the node population and the shared spatial grid.  Nodes
/// never build or own the grid.  During a tick the driver hands
/// [`tick_delta`](Self::tick_delta) and a mutable borrow of the grid to
/// [`Population::advance`](crate::Population::advance), which relocates each
/// node as it moves; outside of that, [`grid_index`](Self::grid_index) is the
/// read-only view for proximity queries.
pub trait Scheduler {
    /// Number of nodes registered so far.
    fn population_size(&self) -> usize;

    /// Take ownership of a freshly built node.  Fails on a duplicate id.
    fn register_node(&mut self, node: CarryNode) -> NodeResult<NodeId>;

    /// The grid for the current tick, or `None` before the first build.
    fn grid_index(&self) -> Option<&GridIndex>;

    /// Simulated seconds per tick, the `delta_secs` of every advance.
    fn tick_delta(&self) -> f64;

    /// Grid cell side, which caps the communication range of every node.
    fn cell_size(&self) -> f64;

    /// Range assigned to nodes that do not choose one.
    fn default_range(&self) -> f64 {
        SimConfig::DEFAULT_RANGE
    }
}
