use dtn_core::NodeId;
use dtn_mobility::MobilityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("{0} appears more than once in the node table")]
    DuplicateNode(NodeId),

    #[error("invalid mobility for {node}: {source}")]
    Mobility {
        node:   NodeId,
        #[source]
        source: MobilityError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
