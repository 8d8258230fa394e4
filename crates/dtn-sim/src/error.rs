use dtn_core::{DtnError, MessageId};
use dtn_node::NodeError;
use dtn_scenario::ScenarioError;
use dtn_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] DtnError),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("message {0} was scheduled at a source node that does not exist")]
    UnknownSource(MessageId),
}

pub type SimResult<T> = Result<T, SimError>;
