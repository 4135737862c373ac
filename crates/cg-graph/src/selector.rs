//! Nearest-venue selection.
//!
//! # Pluggability
//!
//! The mover resolves "go to a supermarket" into a concrete venue through
//! the [`VenueSelector`] trait, so the search strategy can be swapped without
//! touching the movement rules.
//!
//! Both implementations share one contract: return the candidate with the
//! smallest Euclidean distance from `origin`; on a tie return the one that
//! comes first in [`Graph::venues_of_type`] order; fail with
//! [`GraphError::NoCandidate`] if there are no candidates.
//!
//! | Selector                 | Cost per query        | State                  |
//! |--------------------------|-----------------------|------------------------|
//! | [`LinearVenueSelector`]  | O(venues of type)     | none                   |
//! | [`IndexedVenueSelector`] | O(log n) + ties       | one R-tree per type    |

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cg_core::{Point, VenueId, VenueType};

use crate::{Graph, GraphError, GraphResult};

// ── VenueSelector trait ───────────────────────────────────────────────────────

/// Resolves a venue type to the nearest concrete venue.
pub trait VenueSelector {
    /// Nearest venue of `venue_type` to `origin`.
    fn closest(&self, graph: &Graph, origin: Point, venue_type: VenueType) -> GraphResult<VenueId>;

    /// Called after a new graph is built (initial build and every restart).
    /// Selectors that cache venue positions rebuild here.
    fn reindex(&mut self, _graph: &Graph) {}
}

/// Linear scan over `candidates`, ties to the earliest.
///
/// This is the reference rule; [`IndexedVenueSelector`] must agree with it.
pub fn closest_venue<I>(origin: Point, candidates: I) -> Option<VenueId>
where
    I: IntoIterator<Item = (VenueId, Point)>,
{
    let mut best: Option<(VenueId, f64)> = None;
    for (id, pos) in candidates {
        let d2 = origin.distance_2(pos);
        // Strict `<` keeps the first of equally distant candidates.
        if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
            best = Some((id, d2));
        }
    }
    best.map(|(id, _)| id)
}

// ── LinearVenueSelector ───────────────────────────────────────────────────────

/// Stateless scan over the graph's venues of the requested type.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearVenueSelector;

impl VenueSelector for LinearVenueSelector {
    fn closest(&self, graph: &Graph, origin: Point, venue_type: VenueType) -> GraphResult<VenueId> {
        let candidates = graph
            .venues_of_type(venue_type)
            .iter()
            .map(|&id| (id, graph.venue(id).position));
        closest_venue(origin, candidates).ok_or(GraphError::NoCandidate(venue_type))
    }
}

// ── IndexedVenueSelector ──────────────────────────────────────────────────────

/// Entry stored in the per-type R-tree: venue position plus its rank in
/// construction order (for tie-breaking).
#[derive(Clone, Debug)]
struct VenueEntry {
    point: [f64; 2],
    rank:  usize,
    id:    VenueId,
}

impl RTreeObject for VenueEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VenueEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// One R-tree per venue type, bulk-loaded from the graph's layout.
///
/// Positions are fixed for the life of a graph, so the index only needs
/// rebuilding when the graph itself is replaced ([`VenueSelector::reindex`]).
#[derive(Default)]
pub struct IndexedVenueSelector {
    trees: [RTree<VenueEntry>; VenueType::COUNT],
}

impl IndexedVenueSelector {
    pub fn new(graph: &Graph) -> Self {
        let mut selector = Self::default();
        selector.reindex(graph);
        selector
    }

    /// Number of indexed venues of `venue_type`.
    pub fn len(&self, venue_type: VenueType) -> usize {
        self.trees[venue_type.index()].size()
    }
}

impl VenueSelector for IndexedVenueSelector {
    fn closest(&self, _graph: &Graph, origin: Point, venue_type: VenueType) -> GraphResult<VenueId> {
        let query = origin.to_array();
        let mut nearest = self.trees[venue_type.index()].nearest_neighbor_iter_with_distance_2(&query);

        let (first, min_d2) = nearest.next().ok_or(GraphError::NoCandidate(venue_type))?;
        // The iterator yields ascending distance; scan the tied prefix for
        // the earliest-constructed venue.
        let winner = nearest
            .take_while(|&(_, d2)| d2 == min_d2)
            .map(|(entry, _)| entry)
            .fold(first, |best, entry| if entry.rank < best.rank { entry } else { best });
        Ok(winner.id)
    }

    fn reindex(&mut self, graph: &Graph) {
        for venue_type in VenueType::ALL {
            let entries: Vec<VenueEntry> = graph
                .venues_of_type(venue_type)
                .iter()
                .enumerate()
                .map(|(rank, &id)| VenueEntry {
                    point: graph.venue(id).position.to_array(),
                    rank,
                    id,
                })
                .collect();
            self.trees[venue_type.index()] = RTree::bulk_load(entries);
        }
    }
}
