use thiserror::Error;

use cg_core::CoreError;
use cg_graph::GraphError;
use cg_mobility::MobilityError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Invalid config or transition table, whichever entry point found it.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(GraphError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),
}

impl From<GraphError> for SimError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Core(e) => SimError::Core(e),
            other               => SimError::Graph(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
