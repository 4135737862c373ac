//! Arena indices for the two node kinds.
//!
//! `VenueId` and `AgentId` index the graph's venue and agent vectors; they are
//! assigned in construction order and never reused within one graph.  The
//! string labels (`"house-3"`, `"house-3-1"`) that external collaborators see
//! live in the graph's label map, not here.

use std::fmt;

macro_rules! arena_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Id of the `index`-th node of this kind.
            ///
            /// Graphs are bounded by `SimulationConfig::total_agents`, which
            /// rejects populations that overflow `u32`.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id! {
    /// Index of an agent in the graph arena.
    AgentId, "agent"
}

arena_id! {
    /// Index of a venue in the graph arena.
    VenueId, "venue"
}
