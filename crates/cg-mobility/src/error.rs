use thiserror::Error;

use cg_core::VenueType;
use cg_graph::GraphError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MobilityError {
    /// The chosen outcome names a venue type with no venues configured.
    #[error("cannot move to a {0}: none configured")]
    NoCandidate(VenueType),

    #[error("graph: {0}")]
    Graph(GraphError),
}

impl From<GraphError> for MobilityError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::NoCandidate(t) => MobilityError::NoCandidate(t),
            other                      => MobilityError::Graph(other),
        }
    }
}

pub type MobilityResult<T> = Result<T, MobilityError>;
