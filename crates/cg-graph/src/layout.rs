//! Fixed grid placement for venues.
//!
//! Venues are dealt onto a grid in shuffled order, filling columns of
//! `rows_per_column` cells top to bottom, then moving one column right:
//!
//! ```text
//! i = 0 → (1·cell, 1·cell)    i = 6 → (2·cell, 1·cell)
//! i = 1 → (1·cell, 2·cell)    i = 7 → (2·cell, 2·cell)
//! …                           …
//! ```
//!
//! Agents get no coordinate; an external force layout places them around
//! the venue they occupy.

use log::debug;

use cg_core::{Point, SimRng, VenueId};

use crate::Graph;

/// Grid geometry.  The default is 100-unit cells on a 600-unit tall canvas,
/// i.e. six venues per column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Side length of one grid cell.
    pub cell_size: f64,
    /// Canvas height; `⌊height / cell_size⌋` venues fit in one column.
    pub height: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { cell_size: 100.0, height: 600.0 }
    }
}

impl GridLayout {
    pub fn new(cell_size: f64, height: f64) -> Self {
        Self { cell_size, height }
    }

    /// Venues per column.  Never less than one, so a degenerate canvas still
    /// lays out as a single row.
    pub fn rows_per_column(&self) -> usize {
        if self.cell_size > 0.0 && self.height.is_finite() {
            ((self.height / self.cell_size).floor() as usize).max(1)
        } else {
            1
        }
    }

    /// Position of the venue dealt `index`-th.
    pub fn cell(&self, index: usize) -> Point {
        let rows = self.rows_per_column();
        let column = index / rows + 1;
        let row = index % rows + 1;
        Point::new(column as f64 * self.cell_size, row as f64 * self.cell_size)
    }

    /// Shuffle the venues and assign each its grid cell.
    pub fn apply(&self, graph: &mut Graph, rng: &mut SimRng) {
        let mut order: Vec<VenueId> = graph.venues().map(|(id, _)| id).collect();
        rng.shuffle(&mut order);
        for (i, &venue) in order.iter().enumerate() {
            graph.set_position(venue, self.cell(i));
        }
        debug!(
            "placed {} venues on a {}-row grid (cell {})",
            order.len(),
            self.rows_per_column(),
            self.cell_size
        );
    }
}
