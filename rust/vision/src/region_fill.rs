// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flood-fill based floor-region discovery and wall-noise suppression
//!
//! Three passes over the classification grid, all 4-connected:
//! 1. Exterior fill from the border: everything reachable outside the wall
//!    envelope stays Background.
//! 2. Interior fill: each remaining connected component becomes Floor and a
//!    recorded [`Region`] when it reaches the minimum pixel count; smaller
//!    components stay unclassified (printed symbols, arrows).
//! 3. Wall-noise removal: Wall components below the same threshold are
//!    dropped to Background so hatching marks do not pollute line detection.

use crate::types::{CellClass, Grid, PlanConfig, Region, NEIGHBORS_4};
use std::collections::VecDeque;

/// Discover floor regions and freeze the wall set.
///
/// Mutates the grid in place: interior components at or above
/// `min_region_pixels` become Floor, and any TintedWall cell not absorbed
/// into such a component reverts to plain Wall.
pub fn fill_regions(grid: &mut Grid, config: &PlanConfig) -> Vec<Region> {
    let width = grid.width();
    let height = grid.height();
    let idx = |x: u32, y: u32| (y * width + x) as usize;

    // Pass 1: exterior flood from every non-Wall border cell.
    let mut exterior = vec![false; (width * height) as usize];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    for x in 0..width {
        for y in [0, height - 1] {
            if grid.get(x, y) != CellClass::Wall && !exterior[idx(x, y)] {
                exterior[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }
    }
    for y in 0..height {
        for x in [0, width - 1] {
            if grid.get(x, y) != CellClass::Wall && !exterior[idx(x, y)] {
                exterior[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS_4 {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            let Some(class) = grid.get_signed(nx, ny) else {
                continue;
            };
            let (nx, ny) = (nx as u32, ny as u32);
            if class == CellClass::Wall || exterior[idx(nx, ny)] {
                continue;
            }
            exterior[idx(nx, ny)] = true;
            queue.push_back((nx, ny));
        }
    }

    // Pass 2: interior components. Walls block; TintedWall is passable.
    let mut filled = vec![false; (width * height) as usize];
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) == CellClass::Wall || exterior[idx(x, y)] || filled[idx(x, y)] {
                continue;
            }

            let mut cells = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back((x, y));
            filled[idx(x, y)] = true;

            while let Some((cx, cy)) = queue.pop_front() {
                cells.push((cx, cy));
                for (dx, dy) in NEIGHBORS_4 {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    let Some(class) = grid.get_signed(nx, ny) else {
                        continue;
                    };
                    let (nx, ny) = (nx as u32, ny as u32);
                    if class == CellClass::Wall || exterior[idx(nx, ny)] || filled[idx(nx, ny)] {
                        continue;
                    }
                    filled[idx(nx, ny)] = true;
                    queue.push_back((nx, ny));
                }
            }

            if cells.len() >= config.min_region_pixels {
                for &(cx, cy) in &cells {
                    grid.set(cx, cy, CellClass::Floor);
                }
                regions.push(Region::from_cells(cells));
            }
            // Smaller components stay as classified: neither Wall nor Floor.
        }
    }

    // Pass 3: wall-like cells not absorbed into a room remain Wall.
    let mut reverted = 0usize;
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) == CellClass::TintedWall {
                grid.set(x, y, CellClass::Wall);
                reverted += 1;
            }
        }
    }

    tracing::info!(
        regions = regions.len(),
        tinted_reverted = reverted,
        "region fill complete"
    );

    regions
}

/// Remove small Wall components before line detection.
///
/// Components are marked with the transient WallNoise class while they are
/// being measured; sub-threshold components drop to Background and the rest
/// revert to Wall. Returns the number of cells removed.
pub fn remove_wall_noise(grid: &mut Grid, config: &PlanConfig) -> usize {
    let width = grid.width();
    let height = grid.height();
    let mut removed = 0usize;

    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) != CellClass::Wall {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back((x, y));
            grid.set(x, y, CellClass::WallNoise);

            while let Some((cx, cy)) = queue.pop_front() {
                component.push((cx, cy));
                for (dx, dy) in NEIGHBORS_4 {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    if grid.get_signed(nx, ny) != Some(CellClass::Wall) {
                        continue;
                    }
                    grid.set(nx as u32, ny as u32, CellClass::WallNoise);
                    queue.push_back((nx as u32, ny as u32));
                }
            }

            if component.len() < config.min_region_pixels {
                for &(cx, cy) in &component {
                    grid.set(cx, cy, CellClass::Background);
                }
                removed += component.len();
            }
            // Surviving components keep the transient mark until the sweep
            // below so the outer scan does not revisit them.
        }
    }

    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) == CellClass::WallNoise {
                grid.set(x, y, CellClass::Wall);
            }
        }
    }

    tracing::debug!(cells_removed = removed, "wall noise removal complete");

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1-cell black border around an open interior
    fn bordered_grid(size: u32) -> Grid {
        let mut grid = Grid::new(size, size);
        for i in 0..size {
            grid.set(i, 0, CellClass::Wall);
            grid.set(i, size - 1, CellClass::Wall);
            grid.set(0, i, CellClass::Wall);
            grid.set(size - 1, i, CellClass::Wall);
        }
        grid
    }

    fn config(min_pixels: usize) -> PlanConfig {
        PlanConfig {
            min_region_pixels: min_pixels,
            ..PlanConfig::default()
        }
    }

    #[test]
    fn test_enclosed_interior_becomes_one_region() {
        let mut grid = bordered_grid(10);
        let regions = fill_regions(&mut grid, &config(30));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].count(), 64);
        assert_eq!(grid.count(CellClass::Floor), 64);
    }

    #[test]
    fn test_exterior_cells_stay_background() {
        // Border walls inset by one: the outer ring is exterior
        let mut grid = Grid::new(12, 12);
        for i in 1..11 {
            grid.set(i, 1, CellClass::Wall);
            grid.set(i, 10, CellClass::Wall);
            grid.set(1, i, CellClass::Wall);
            grid.set(10, i, CellClass::Wall);
        }

        let regions = fill_regions(&mut grid, &config(30));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].count(), 64);
        // Outer ring never converts to Floor
        assert_eq!(grid.get(0, 0), CellClass::Background);
        assert_eq!(grid.get(11, 5), CellClass::Background);
    }

    #[test]
    fn test_threshold_boundary() {
        // Two sealed rooms: one of exactly threshold size, one a cell short
        let mut grid = Grid::new(9, 5);
        for x in 0..9 {
            grid.set(x, 0, CellClass::Wall);
            grid.set(x, 4, CellClass::Wall);
        }
        for y in 0..5 {
            grid.set(0, y, CellClass::Wall);
            grid.set(4, y, CellClass::Wall);
            grid.set(8, y, CellClass::Wall);
        }
        // Left room 3x3 = 9 cells, right room 3x3 = 9 cells; shrink right
        // room by one wall cell
        grid.set(5, 1, CellClass::Wall);

        let regions = fill_regions(&mut grid, &config(9));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].count(), 9);
        // The 8-cell component stays unclassified
        assert_eq!(grid.get(5, 2), CellClass::Background);
    }

    #[test]
    fn test_tinted_wall_absorbed_into_room() {
        let mut grid = bordered_grid(10);
        grid.set(4, 4, CellClass::TintedWall);

        let regions = fill_regions(&mut grid, &config(30));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].count(), 64);
        assert_eq!(grid.get(4, 4), CellClass::Floor);
    }

    #[test]
    fn test_unabsorbed_tinted_wall_reverts_to_wall() {
        let mut grid = bordered_grid(10);
        // Sub-threshold pocket sealed off in a corner of the interior
        grid.set(2, 1, CellClass::Wall);
        grid.set(2, 2, CellClass::Wall);
        grid.set(1, 2, CellClass::Wall);
        grid.set(1, 1, CellClass::TintedWall);

        let regions = fill_regions(&mut grid, &config(30));

        assert_eq!(regions.len(), 1);
        assert_eq!(grid.get(1, 1), CellClass::Wall);
    }

    #[test]
    fn test_small_wall_blob_removed() {
        let mut grid = bordered_grid(10);
        grid.set(4, 4, CellClass::Wall);
        grid.set(5, 4, CellClass::Wall);
        grid.set(5, 5, CellClass::Wall);

        fill_regions(&mut grid, &config(30));
        let removed = remove_wall_noise(&mut grid, &config(30));

        assert_eq!(removed, 3);
        assert_eq!(grid.get(4, 4), CellClass::Background);
        // Border wall (36 cells) survives
        assert_eq!(grid.get(0, 0), CellClass::Wall);
        assert_eq!(grid.count(CellClass::Wall), 36);
        assert_eq!(grid.count(CellClass::WallNoise), 0);
    }
}
