//! Planar coordinates for venue placement.
//!
//! Venues sit on a fixed grid in screen-like units (the default cell is 100
//! units wide), so plain Euclidean distance in `f64` is all the nearest-venue
//! search needs.

/// A point on the layout plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// and order-preserving, so comparisons use this form.
    #[inline]
    pub fn distance_2(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// `[x, y]` form used by the R-tree index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
