// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat slab mesh construction per floor region
//!
//! Each region cell becomes a thin box positioned relative to the region's
//! world center; the boxes merge into one mesh per region. Regions are
//! independent once the grid is frozen, so they build in parallel.

use crate::error::Result;
use crate::scene::{color_to_f32, FloorGroup};
use crate::types::{PlanConfig, Region};
use nalgebra::{Point3, Vector3};
use planrise_geometry::{axis_box, Mesh};
use rayon::prelude::*;

/// Build one slab group per region. Ordering across regions follows the
/// input slice but does not affect the generated geometry.
pub fn build_floor_meshes(
    regions: &[Region],
    grid_width: u32,
    grid_height: u32,
    config: &PlanConfig,
) -> Result<Vec<FloorGroup>> {
    let groups = regions
        .par_iter()
        .enumerate()
        .map(|(index, region)| build_region_mesh(index, region, grid_width, grid_height, config))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(floors = groups.len(), "floor meshes built");

    Ok(groups)
}

fn build_region_mesh(
    index: usize,
    region: &Region,
    grid_width: u32,
    grid_height: u32,
    config: &PlanConfig,
) -> Result<FloorGroup> {
    let (sx, sz) = config.scale(grid_width, grid_height);
    let (cx, cz) = region.world_center(grid_width, grid_height, config.plane_size);
    let half_height = config.floor_thickness * 0.5;

    let mut boxes = Vec::with_capacity(region.cells.len());
    for &(x, y) in &region.cells {
        let (px, pz) = config.world_xz(x as f64 + 0.5, y as f64 + 0.5, grid_width, grid_height);
        boxes.push(axis_box(
            Point3::new(px - cx, -half_height, pz - cz),
            Vector3::new(sx, config.floor_thickness, sz),
        )?);
    }

    let mut mesh = Mesh::new();
    mesh.merge_all(&boxes);

    Ok(FloorGroup {
        name: format!("Floor_{:02}", index),
        origin: Point3::new(cx, half_height, cz),
        mesh,
        color: color_to_f32(config.floor_color),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;
    use approx::assert_relative_eq;

    fn square_region(x0: u32, y0: u32, size: u32) -> Region {
        let mut cells = Vec::new();
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                cells.push((x, y));
            }
        }
        Region::from_cells(cells)
    }

    #[test]
    fn test_one_group_per_region() {
        let regions = vec![square_region(1, 1, 2), square_region(6, 6, 3)];
        let config = PlanConfig::default();

        let groups = build_floor_meshes(&regions, 10, 10, &config).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Floor_00");
        assert_eq!(groups[1].name, "Floor_01");
        // One box (24 vertices, 12 triangles) per cell
        assert_eq!(groups[0].mesh.vertex_count(), 4 * 24);
        assert_eq!(groups[1].mesh.triangle_count(), 9 * 12);
    }

    #[test]
    fn test_group_origin_is_region_world_center() {
        // 2x2 region centered in a 10x10 grid over a 10x10 plane
        let region = square_region(4, 4, 2);
        let config = PlanConfig::default();

        let groups = build_floor_meshes(&[region], 10, 10, &config).unwrap();

        assert_relative_eq!(groups[0].origin.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(groups[0].origin.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(groups[0].origin.y, config.floor_thickness * 0.5);
    }

    #[test]
    fn test_mesh_spans_region_footprint() {
        let region = square_region(2, 2, 3);
        let config = PlanConfig::default();

        let groups = build_floor_meshes(&[region], 10, 10, &config).unwrap();
        let (min, max) = groups[0].mesh.bounds();

        // 3 cells at 1.0 world units per cell
        assert_relative_eq!((max.x - min.x) as f64, 3.0, epsilon = 1e-5);
        assert_relative_eq!((max.z - min.z) as f64, 3.0, epsilon = 1e-5);
        assert_relative_eq!((max.y - min.y) as f64, config.floor_thickness, epsilon = 1e-5);
    }

    #[test]
    fn test_no_regions_no_groups() {
        let config = PlanConfig::default();
        let groups = build_floor_meshes(&[], 10, 10, &config).unwrap();
        assert!(groups.is_empty());
    }
}
