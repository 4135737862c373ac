//! Node and edge records stored in the [`Graph`](crate::Graph) arena.

use cg_core::{AgentId, HealthState, Point, VenueId, VenueType};

/// A place agents can occupy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VenueNode {
    /// External label, e.g. `"supermarket-2"`.  Unique across the graph.
    pub id: String,

    pub venue_type: VenueType,

    /// Fixed layout position.  Assigned once by [`GridLayout`](crate::GridLayout);
    /// [`Point::ORIGIN`] until then.
    pub position: Point,

    /// Quarantine flag.  Written from outside the core between ticks; the
    /// simulation reads it through a per-tick snapshot.
    pub locked: bool,
}

/// A person.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentNode {
    /// External label, e.g. `"house-3-1"` (second resident of house 3).
    pub id: String,

    /// Home venue.  Never changes after construction.
    pub base: VenueId,

    /// Venue the agent is at.  Mirrors the agent's [`Edge`].
    pub location: VenueId,

    pub health: HealthState,
}

/// "Agent is present at venue".  Exactly one per agent, stored at
/// `edges[agent.index()]`; movement rewrites `venue` in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub agent: AgentId,
    pub venue: VenueId,
}

/// Typed handle to any node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRef {
    Venue(VenueId),
    Agent(AgentId),
}

/// Borrowed view of one node, yielded by [`Graph::nodes`](crate::Graph::nodes)
/// in construction order.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Venue(VenueId, &'a VenueNode),
    Agent(AgentId, &'a AgentNode),
}

impl<'a> Node<'a> {
    /// External label of the node.
    pub fn label(&self) -> &'a str {
        match self {
            Node::Venue(_, v) => &v.id,
            Node::Agent(_, a) => &a.id,
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        match *self {
            Node::Venue(id, _) => NodeRef::Venue(id),
            Node::Agent(id, _) => NodeRef::Agent(id),
        }
    }
}
