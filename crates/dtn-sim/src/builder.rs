//! Fluent builder for constructing a [`Sim`].

use dtn_core::SimConfig;
use dtn_mobility::Area;
use dtn_scenario::{InjectionQueue, NodeSpec};
use dtn_spatial::GridIndex;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                         |
/// |-------------------|---------------------------------|
/// | `.nodes(v)`       | no nodes (spawn them later)     |
/// | `.bounds(a)`      | moving nodes travel unbounded   |
/// | `.injections(q)`  | empty `InjectionQueue`          |
///
/// # Example
///
/// ```rust,ignore
/// let nodes = load_nodes_csv(Path::new("nodes.csv"))?;
/// let msgs  = load_messages_csv(Path::new("messages.csv"))?;
/// let mut sim = SimBuilder::new(config)
///     .nodes(nodes)
///     .injections(msgs)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    nodes:      Vec<NodeSpec>,
    bounds:     Option<Area>,
    injections: Option<InjectionQueue>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            nodes:      Vec::new(),
            bounds:     None,
            injections: None,
        }
    }

    /// Nodes to register at build time, in this order.
    pub fn nodes(mut self, nodes: Vec<NodeSpec>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Area that moving nodes bounce off.
    pub fn bounds(mut self, area: Area) -> Self {
        self.bounds = Some(area);
        self
    }

    pub fn injections(mut self, queue: InjectionQueue) -> Self {
        self.injections = Some(queue);
        self
    }

    /// Validate the configuration, create the grid, register the nodes and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let grid = GridIndex::new(self.config.cell_size)?;
        let mut sim = Sim::new(self.config, grid, self.injections.unwrap_or_default());

        for spec in &self.nodes {
            sim.spawn_spec(spec, self.bounds)?;
        }
        Ok(sim)
    }
}
