//! Graph error type.

use thiserror::Error;

use cg_core::{CoreError, VenueType};

/// Errors produced by `cg-graph`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No node carries this label.
    #[error("unknown node {0:?}")]
    UnknownNode(String),

    /// The label names an agent where a venue was required (e.g. locking).
    #[error("node {0:?} is not a venue")]
    NotAVenue(String),

    /// A venue type was requested but none is configured.
    #[error("no {0} venue to choose from")]
    NoCandidate(VenueType),
}

pub type GraphResult<T> = Result<T, GraphError>;
