//! `cg-graph` — the venue/agent graph, its construction, and nearest-venue
//! selection.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`node`]     | `VenueNode`, `AgentNode`, `Edge`, `NodeRef`, `Node`        |
//! | [`graph`]    | `Graph` arena with occupancy and label indexes             |
//! | [`builder`]  | `GraphBuilder`, `build_initial_graph`                      |
//! | [`layout`]   | `GridLayout` (shuffled fixed grid for venues)              |
//! | [`selector`] | `VenueSelector` trait, linear and R-tree implementations   |
//! | [`snapshot`] | `GraphSnapshot` (label-keyed copy for display/export)      |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on nodes and snapshots.  |
//! | `fx-hash` | FxHash for the label index instead of SipHash.             |

pub mod builder;
pub mod error;
pub mod graph;
pub mod layout;
pub mod node;
pub mod selector;
pub mod snapshot;


pub use builder::{GraphBuilder, build_initial_graph};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use layout::GridLayout;
pub use node::{AgentNode, Edge, Node, NodeRef, VenueNode};
pub use selector::{IndexedVenueSelector, LinearVenueSelector, VenueSelector, closest_venue};
pub use snapshot::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};
