//! The venue/agent graph arena.
//!
//! # Data layout
//!
//! Venues and agents live in two typed vectors indexed by [`VenueId`] and
//! [`AgentId`].  Alongside them:
//!
//! ```text
//! edges[agent]        — the single (agent, venue) presence edge
//! occupants[venue]    — agents currently at the venue, ascending AgentId
//! by_type[venue_type] — venues of that type, in construction order
//! order               — every node in construction order (venue, residents, …)
//! labels              — external label → NodeRef
//! ```
//!
//! `agent.location`, `edges[agent].venue` and the occupancy index are only
//! ever changed together by [`Graph::relocate`], so they cannot disagree.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

use cg_core::{AgentId, HealthCounts, HealthState, Point, VenueId, VenueType};

use crate::{AgentNode, Edge, GraphError, GraphResult, Node, NodeRef, VenueNode};

#[cfg(feature = "fx-hash")]
type LabelMap = rustc_hash::FxHashMap<String, NodeRef>;
#[cfg(not(feature = "fx-hash"))]
type LabelMap = HashMap<String, NodeRef>;

/// Arena holding every node and edge of one simulation run.
///
/// Built by [`GraphBuilder`](crate::GraphBuilder); replaced wholesale on
/// restart.
#[derive(Debug, Clone)]
pub struct Graph {
    venues:    Vec<VenueNode>,
    agents:    Vec<AgentNode>,
    edges:     Vec<Edge>,
    order:     Vec<NodeRef>,
    labels:    LabelMap,
    occupants: Vec<Vec<AgentId>>,
    by_type:   [Vec<VenueId>; VenueType::COUNT],
}

impl Graph {
    /// An empty graph.
    pub fn empty() -> Self {
        Self::with_capacity(0, 0)
    }

    pub(crate) fn with_capacity(venues: usize, agents: usize) -> Self {
        Self {
            venues:    Vec::with_capacity(venues),
            agents:    Vec::with_capacity(agents),
            edges:     Vec::with_capacity(agents),
            order:     Vec::with_capacity(venues + agents),
            labels:    LabelMap::default(),
            occupants: Vec::with_capacity(venues),
            by_type:   Default::default(),
        }
    }

    // ── Construction (crate-private, used by GraphBuilder) ────────────────

    pub(crate) fn push_venue(&mut self, label: String, venue_type: VenueType) -> VenueId {
        let id = VenueId::from_index(self.venues.len());
        self.labels.insert(label.clone(), NodeRef::Venue(id));
        self.venues.push(VenueNode {
            id: label,
            venue_type,
            position: Point::ORIGIN,
            locked: false,
        });
        self.occupants.push(Vec::new());
        self.by_type[venue_type.index()].push(id);
        self.order.push(NodeRef::Venue(id));
        id
    }

    pub(crate) fn push_agent(&mut self, label: String, home: VenueId) -> AgentId {
        let id = AgentId::from_index(self.agents.len());
        self.labels.insert(label.clone(), NodeRef::Agent(id));
        self.agents.push(AgentNode {
            id: label,
            base: home,
            location: home,
            health: HealthState::Susceptible,
        });
        self.edges.push(Edge { agent: id, venue: home });
        // Ids are handed out in ascending order, so a push keeps this sorted.
        self.occupants[home.index()].push(id);
        self.order.push(NodeRef::Agent(id));
        id
    }

    pub(crate) fn set_position(&mut self, venue: VenueId, position: Point) {
        self.venues[venue.index()].position = position;
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn venue(&self, id: VenueId) -> &VenueNode {
        &self.venues[id.index()]
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> &AgentNode {
        &self.agents[id.index()]
    }

    /// All venues in ascending id order.
    pub fn venues(&self) -> impl Iterator<Item = (VenueId, &VenueNode)> + '_ {
        self.venues
            .iter()
            .enumerate()
            .map(|(i, v)| (VenueId::from_index(i), v))
    }

    /// All agents in ascending id order.  This is the fixed processing order
    /// of both the movement and the disease pass.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &AgentNode)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId::from_index(i), a))
    }

    /// Every node, venues and agents interleaved in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.order.iter().map(move |r| match *r {
            NodeRef::Venue(id) => Node::Venue(id, &self.venues[id.index()]),
            NodeRef::Agent(id) => Node::Agent(id, &self.agents[id.index()]),
        })
    }

    /// Presence edges, indexed by `AgentId`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, agent: AgentId) -> Edge {
        self.edges[agent.index()]
    }

    /// Venues of `venue_type` in construction order.  Empty if none are
    /// configured.
    pub fn venues_of_type(&self, venue_type: VenueType) -> &[VenueId] {
        &self.by_type[venue_type.index()]
    }

    // ── Labels ────────────────────────────────────────────────────────────

    pub fn lookup(&self, label: &str) -> Option<NodeRef> {
        self.labels.get(label).copied()
    }

    pub fn venue_by_label(&self, label: &str) -> GraphResult<VenueId> {
        match self.lookup(label) {
            Some(NodeRef::Venue(id)) => Ok(id),
            Some(NodeRef::Agent(_))  => Err(GraphError::NotAVenue(label.to_owned())),
            None                     => Err(GraphError::UnknownNode(label.to_owned())),
        }
    }

    pub fn agent_by_label(&self, label: &str) -> GraphResult<AgentId> {
        match self.lookup(label) {
            Some(NodeRef::Agent(id)) => Ok(id),
            _                        => Err(GraphError::UnknownNode(label.to_owned())),
        }
    }

    // ── Location ──────────────────────────────────────────────────────────

    /// Agents at `venue`, ascending `AgentId`.
    #[inline]
    pub fn occupants(&self, venue: VenueId) -> &[AgentId] {
        &self.occupants[venue.index()]
    }

    /// Other agents at `agent`'s venue.
    pub fn fellows(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        let venue = self.agents[agent.index()].location;
        self.occupants[venue.index()]
            .iter()
            .copied()
            .filter(move |&other| other != agent)
    }

    #[inline]
    pub fn location(&self, agent: AgentId) -> VenueId {
        self.agents[agent.index()].location
    }

    /// Position of the venue `agent` currently occupies.  Agents carry no
    /// coordinate of their own.
    #[inline]
    pub fn agent_position(&self, agent: AgentId) -> Point {
        self.venues[self.location(agent).index()].position
    }

    /// Move `agent` to `to`, keeping the edge and occupancy index in step.
    /// Returns the venue the agent left.  No lock or health checks: that is
    /// the mover's job.
    pub fn relocate(&mut self, agent: AgentId, to: VenueId) -> VenueId {
        let from = self.agents[agent.index()].location;
        if from == to {
            return from;
        }

        let here = &mut self.occupants[from.index()];
        if let Ok(pos) = here.binary_search(&agent) {
            here.remove(pos);
        }
        let there = &mut self.occupants[to.index()];
        if let Err(pos) = there.binary_search(&agent) {
            there.insert(pos, agent);
        }

        self.agents[agent.index()].location = to;
        self.edges[agent.index()].venue = to;
        from
    }

    // ── Locks ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_locked(&self, venue: VenueId) -> bool {
        self.venues[venue.index()].locked
    }

    pub fn set_locked(&mut self, venue: VenueId, locked: bool) {
        self.venues[venue.index()].locked = locked;
    }

    pub fn set_locked_by_label(&mut self, label: &str, locked: bool) -> GraphResult<()> {
        let venue = self.venue_by_label(label)?;
        self.set_locked(venue, locked);
        Ok(())
    }

    /// Flip a venue's quarantine flag, returning the new value.
    pub fn toggle_lock(&mut self, label: &str) -> GraphResult<bool> {
        let venue = self.venue_by_label(label)?;
        let locked = !self.is_locked(venue);
        self.set_locked(venue, locked);
        Ok(locked)
    }

    /// Current lock flags, indexed by `VenueId`.
    pub fn lock_flags(&self) -> Vec<bool> {
        self.venues.iter().map(|v| v.locked).collect()
    }

    // ── Health ────────────────────────────────────────────────────────────

    #[inline]
    pub fn health(&self, agent: AgentId) -> HealthState {
        self.agents[agent.index()].health
    }

    #[inline]
    pub fn set_health(&mut self, agent: AgentId, state: HealthState) {
        let node = &mut self.agents[agent.index()];
        debug_assert!(
            node.health != HealthState::Dead || state == HealthState::Dead,
            "{} left the Dead state",
            node.id
        );
        node.health = state;
    }

    pub fn health_counts(&self) -> HealthCounts {
        HealthCounts::tally(self.agents.iter().map(|a| a.health))
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// `true` if edges, agent locations, and the occupancy index agree and
    /// every agent has exactly one edge.
    pub fn is_consistent(&self) -> bool {
        if self.edges.len() != self.agents.len() {
            return false;
        }
        let edges_ok = self.agents().all(|(id, a)| {
            let e = self.edges[id.index()];
            e.agent == id && e.venue == a.location
        });
        let occupancy_ok = self.occupants.iter().enumerate().all(|(v, occ)| {
            occ.windows(2).all(|w| w[0] < w[1])
                && occ.iter().all(|&a| self.agents[a.index()].location.index() == v)
        });
        let total: usize = self.occupants.iter().map(Vec::len).sum();
        edges_ok && occupancy_ok && total == self.agents.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::empty()
    }
}
