//! Read-only copy of the graph for display and export.
//!
//! A [`GraphSnapshot`] owns plain data keyed by external labels, so it can
//! outlive the graph (the next tick mutates the arena in place) and be
//! handed to a renderer or serialized with the `serde` feature.

use cg_core::{HealthState, Point, Tick, VenueType};

use crate::{Graph, Node};

/// One node as seen from outside.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum NodeSnapshot {
    Venue {
        id:         String,
        venue_type: VenueType,
        position:   Point,
        locked:     bool,
    },
    Agent {
        id:     String,
        base:   String,
        health: HealthState,
    },
}

impl NodeSnapshot {
    pub fn id(&self) -> &str {
        match self {
            NodeSnapshot::Venue { id, .. } | NodeSnapshot::Agent { id, .. } => id,
        }
    }
}

/// Presence edge by label: `source` is the agent, `target` the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSnapshot {
    pub source: String,
    pub target: String,
}

/// Nodes in construction order and one edge per agent, in agent order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub tick:  Tick,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl GraphSnapshot {
    pub fn capture(graph: &Graph, tick: Tick) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| match node {
                Node::Venue(_, v) => NodeSnapshot::Venue {
                    id:         v.id.clone(),
                    venue_type: v.venue_type,
                    position:   v.position,
                    locked:     v.locked,
                },
                Node::Agent(_, a) => NodeSnapshot::Agent {
                    id:     a.id.clone(),
                    base:   graph.venue(a.base).id.clone(),
                    health: a.health,
                },
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeSnapshot {
                source: graph.agent(e.agent).id.clone(),
                target: graph.venue(e.venue).id.clone(),
            })
            .collect();

        Self { tick, nodes, edges }
    }

    /// Label of the venue `agent` is at, if `agent` is in the snapshot.
    pub fn location_of(&self, agent: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.source == agent)
            .map(|e| e.target.as_str())
    }
}
