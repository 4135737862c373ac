//! Venue type enum shared by the graph, mobility, and output crates.
//!
//! The variant order is the construction order used by the graph builder:
//! houses first (each followed by its residents), then temples, hospitals,
//! supermarkets, and stations.

/// The kind of place a venue node represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    /// A dwelling.  The only venue type that spawns resident agents.
    #[default]
    House,
    Temple,
    Hospital,
    Supermarket,
    /// Bus station.
    Station,
}

impl VenueType {
    /// All venue types in construction order.
    pub const ALL: [VenueType; 5] = [
        VenueType::House,
        VenueType::Temple,
        VenueType::Hospital,
        VenueType::Supermarket,
        VenueType::Station,
    ];

    /// Number of variants; sizes per-type lookup arrays.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index in `0..COUNT`, matching the order of [`ALL`](Self::ALL).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `true` for the venue type agents call home.
    #[inline]
    pub fn is_residential(self) -> bool {
        matches!(self, VenueType::House)
    }

    /// Label prefix used in node ids, e.g. `"house"` in `"house-3"`.
    pub fn as_str(self) -> &'static str {
        match self {
            VenueType::House       => "house",
            VenueType::Temple      => "temple",
            VenueType::Hospital    => "hospital",
            VenueType::Supermarket => "supermarket",
            VenueType::Station     => "station",
        }
    }
}

impl std::fmt::Display for VenueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
