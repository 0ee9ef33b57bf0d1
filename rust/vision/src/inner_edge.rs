// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inner-edge derivation along floor/wall boundaries
//!
//! Marks a 1-2 cell wide InnerEdge ribbon on the Floor side of every wall
//! boundary. Phase 1 collects every Floor cell with a Wall cell among its 8
//! neighbors and marks the whole batch after the scan; phase 2 dilates the
//! batch once into neighboring Floor cells. Phase 1 must observe the
//! pre-dilation boundary exactly once, so the phases never interleave.

use crate::types::{CellClass, Grid, NEIGHBORS_8};

/// Mark the inner-edge ribbon. Returns the number of cells converted.
pub fn detect_inner_edges(grid: &mut Grid) -> usize {
    let width = grid.width();
    let height = grid.height();

    // Phase 1: floor cells touching a wall.
    let mut boundary = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) == CellClass::Floor && grid.has_neighbor8(x, y, CellClass::Wall) {
                boundary.push((x, y));
            }
        }
    }
    for &(x, y) in &boundary {
        grid.set(x, y, CellClass::InnerEdge);
    }

    // Phase 2: one dilation step into the remaining floor.
    let mut dilated = 0usize;
    for &(x, y) in &boundary {
        for (dx, dy) in NEIGHBORS_8 {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if grid.get_signed(nx, ny) == Some(CellClass::Floor) {
                grid.set(nx as u32, ny as u32, CellClass::InnerEdge);
                dilated += 1;
            }
        }
    }

    tracing::debug!(
        boundary = boundary.len(),
        dilated,
        "inner edge detection complete"
    );

    boundary.len() + dilated
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wall column at x=0, floor everywhere else
    fn wall_and_floor(width: u32, height: u32) -> Grid {
        let mut grid = Grid::new(width, height);
        for y in 0..height {
            grid.set(0, y, CellClass::Wall);
            for x in 1..width {
                grid.set(x, y, CellClass::Floor);
            }
        }
        grid
    }

    #[test]
    fn test_ribbon_is_two_cells_wide() {
        let mut grid = wall_and_floor(6, 4);
        detect_inner_edges(&mut grid);

        for y in 0..4 {
            assert_eq!(grid.get(1, y), CellClass::InnerEdge, "boundary column");
            assert_eq!(grid.get(2, y), CellClass::InnerEdge, "dilated column");
            assert_eq!(grid.get(3, y), CellClass::Floor, "interior untouched");
        }
    }

    #[test]
    fn test_dilation_does_not_cascade() {
        // A single interleaved pass would let fresh InnerEdge marks seed
        // further marks and bleed across the whole floor.
        let mut grid = wall_and_floor(16, 3);
        detect_inner_edges(&mut grid);

        for x in 3..16 {
            assert_eq!(grid.get(x, 1), CellClass::Floor);
        }
    }

    #[test]
    fn test_diagonal_adjacency_counts() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, CellClass::Wall);
        grid.set(1, 1, CellClass::Floor);

        detect_inner_edges(&mut grid);

        assert_eq!(grid.get(1, 1), CellClass::InnerEdge);
    }

    #[test]
    fn test_no_walls_no_marks() {
        let mut grid = Grid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                grid.set(x, y, CellClass::Floor);
            }
        }

        assert_eq!(detect_inner_edges(&mut grid), 0);
        assert_eq!(grid.count(CellClass::InnerEdge), 0);
    }
}
