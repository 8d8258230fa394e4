//! Validated node construction.
//!
//! # Usage
//!
//! ```rust,ignore
//! let id = NodeBuilder::new()
//!     .range(80.0)
//!     .mobility(Stationary(Position::new(10.0, 10.0)))
//!     .build(&mut sim)?;
//! ```

use dtn_core::NodeId;
use dtn_mobility::Mobility;

use crate::{CarryNode, NodeError, NodeResult, Scheduler};

/// Fluent builder for [`CarryNode`].
///
/// | Option        | Default                               |
/// |---------------|---------------------------------------|
/// | `.id(n)`      | `population_size + 1`                 |
/// | `.range(r)`   | `scheduler.default_range()` (50)      |
/// | `.mobility(m)`| *required*                            |
///
/// The scheduler is the argument to [`build`](Self::build), so a node can
/// never exist without one.  The monitor is supplied by the driver to every
/// event-producing operation.
#[derive(Default)]
pub struct NodeBuilder {
    id:       Option<NodeId>,
    range:    Option<f64>,
    mobility: Option<Box<dyn Mobility>>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit identity.  Must be unique within the population.
    pub fn id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Communication range in metres; must lie in `(0, cell_size]`.
    pub fn range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    pub fn mobility<M: Mobility + 'static>(mut self, mobility: M) -> Self {
        self.mobility = Some(Box::new(mobility));
        self
    }

    /// Like [`mobility`](Self::mobility) for an already boxed model.
    pub fn boxed_mobility(mut self, mobility: Box<dyn Mobility>) -> Self {
        self.mobility = Some(mobility);
        self
    }

    /// Validate, construct, and register the node with `scheduler`.
    ///
    /// # Errors
    ///
    /// - [`NodeError::MissingMobility`] if no mobility model was given.
    /// - [`NodeError::InvalidRange`] if the range is not in `(0, cell_size]`.
    /// - [`NodeError::DuplicateId`] from the scheduler on an id clash.
    pub fn build<S: Scheduler + ?Sized>(self, scheduler: &mut S) -> NodeResult<NodeId> {
        let mobility = self.mobility.ok_or(NodeError::MissingMobility)?;

        let max = scheduler.cell_size();
        let range = self.range.unwrap_or_else(|| scheduler.default_range());
        if !(range > 0.0 && range <= max) {
            return Err(NodeError::InvalidRange { range, max });
        }

        let id = match self.id {
            Some(id) => id,
            None => NodeId::try_from(scheduler.population_size() + 1)
                .map_err(|_| NodeError::IdSpaceExhausted)?,
        };

        scheduler.register_node(CarryNode::new(id, range, mobility))
    }
}
