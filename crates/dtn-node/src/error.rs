use dtn_core::{MessageId, NodeId};
use dtn_spatial::Cell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("node construction requires a mobility model")]
    MissingMobility,

    #[error("communication range {range} must lie in (0, {max}] (the grid cell size)")]
    InvalidRange { range: f64, max: f64 },

    #[error("{0} is already registered")]
    DuplicateId(NodeId),

    #[error("no default node id left: population exceeds the id space")]
    IdSpaceExhausted,

    #[error("{0} is not part of the population")]
    UnknownNode(NodeId),

    #[error("proximity query issued before the spatial grid was built")]
    GridNotBuilt,

    #[error("spatial grid is incomplete: {registered} of {population} nodes registered")]
    GridIncomplete { registered: usize, population: usize },

    #[error("{node} is not registered in grid cell {cell}")]
    NotInGrid { node: NodeId, cell: Cell },

    #[error("{node} does not carry message {msg}")]
    NotCarried { node: NodeId, msg: MessageId },
}

pub type NodeResult<T> = Result<T, NodeError>;
