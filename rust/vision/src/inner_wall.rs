// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partition walls recovered from inner-edge clusters
//!
//! The coarse line detector misses thin partitions; the inner-edge ribbon
//! keeps them. Clusters of InnerEdge cells clear of detected walls become
//! per-cell box meshes, recentered on their own bounding box and split by
//! face direction so consumers can style each wall face independently.

use crate::animation::RiseAnimation;
use crate::error::Result;
use crate::scene::{DirectionalMesh, InnerWallGroup};
use crate::types::{CellClass, Grid, PlanConfig, Segment, NEIGHBORS_4};
use crate::wall_mesh::WALL_MATERIAL;
use nalgebra::{Point3, Vector3};
use planrise_geometry::{axis_box, split_by_normal, Mesh};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Decimal places kept when rounding canonical key coordinates. A collision
/// at the rounding boundary only drops a duplicate wall.
const DEDUP_DECIMALS: i32 = 1;

/// Dot-product threshold for assigning a triangle to a face direction
const NORMAL_AXIS_THRESHOLD: f32 = 0.9;

/// Order-normalized, fixed-precision segment identity in world space
type SegmentKey = ((i64, i64), (i64, i64));

fn canonical_key(a: (f64, f64), b: (f64, f64)) -> SegmentKey {
    let scale = 10f64.powi(DEDUP_DECIMALS);
    let quantize = |p: (f64, f64)| ((p.0 * scale).round() as i64, (p.1 * scale).round() as i64);
    let qa = quantize(a);
    let qb = quantize(b);
    if qa <= qb {
        (qa, qb)
    } else {
        (qb, qa)
    }
}

/// Build one wall group per inner-edge cluster not already represented by a
/// detected line segment.
pub fn build_inner_walls(
    grid: &Grid,
    segments: &[Segment],
    config: &PlanConfig,
) -> Result<Vec<InnerWallGroup>> {
    let width = grid.width();
    let height = grid.height();

    // Keys of the walls the segment detector already produced.
    let mut known: FxHashSet<SegmentKey> = FxHashSet::default();
    for seg in segments {
        known.insert(canonical_key(
            config.world_xz(seg.start.x, seg.start.y, width, height),
            config.world_xz(seg.end.x, seg.end.y, width, height),
        ));
    }

    // Cluster membership: InnerEdge cells clear of any wall pixel, so the
    // recovered partitions never double up against detected walls.
    let eligible = |x: u32, y: u32| {
        grid.get(x, y) == CellClass::InnerEdge && !grid.has_neighbor8(x, y, CellClass::Wall)
    };

    let mut visited = vec![false; (width * height) as usize];
    let idx = |x: u32, y: u32| (y * width + x) as usize;
    let mut groups = Vec::new();
    let mut deduplicated = 0usize;

    for y in 0..height {
        for x in 0..width {
            if visited[idx(x, y)] || !eligible(x, y) {
                continue;
            }

            let mut cells = Vec::new();
            let mut queue = VecDeque::new();
            visited[idx(x, y)] = true;
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                cells.push((cx, cy));
                for (dx, dy) in NEIGHBORS_4 {
                    let nx = cx as i32 + dx;
                    let ny = cy as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if visited[idx(nx, ny)] || !eligible(nx, ny) {
                        continue;
                    }
                    visited[idx(nx, ny)] = true;
                    queue.push_back((nx, ny));
                }
            }

            if cells.len() < config.min_region_pixels {
                continue;
            }

            // A cluster lying on an already-detected wall produces nothing.
            let lo = *cells.iter().min().unwrap();
            let hi = *cells.iter().max().unwrap();
            let key = canonical_key(
                config.world_xz(lo.0 as f64, lo.1 as f64, width, height),
                config.world_xz(hi.0 as f64, hi.1 as f64, width, height),
            );
            if known.contains(&key) {
                deduplicated += 1;
                continue;
            }

            let group = build_cluster_mesh(&cells, groups.len(), width, height, config)?;
            groups.push(group);
        }
    }

    tracing::info!(
        groups = groups.len(),
        deduplicated,
        "inner edge walls built"
    );

    Ok(groups)
}

fn build_cluster_mesh(
    cells: &[(u32, u32)],
    index: usize,
    grid_width: u32,
    grid_height: u32,
    config: &PlanConfig,
) -> Result<InnerWallGroup> {
    let thickness = config.wall_thickness(grid_width, grid_height);
    let y_offset = config.wall_height * 0.5;

    let mut boxes = Vec::with_capacity(cells.len());
    for &(x, y) in cells {
        let (px, pz) = config.world_xz(x as f64 + 0.5, y as f64 + 0.5, grid_width, grid_height);
        boxes.push(axis_box(
            Point3::new(px, y_offset, pz),
            Vector3::new(thickness, config.wall_height, thickness),
        )?);
    }

    let mut mesh = Mesh::new();
    mesh.merge_all(&boxes);

    // Normalize the pivot: vertices shift to the bounding-box centroid and
    // the group origin absorbs the same offset, preserving world position.
    let offset = mesh.recenter();

    let faces = split_by_normal(&mesh, NORMAL_AXIS_THRESHOLD)
        .into_iter()
        .map(|(direction, mesh)| DirectionalMesh { direction, mesh })
        .collect();

    Ok(InnerWallGroup {
        name: format!("InnerWall_{:02}", index),
        origin: Point3::new(offset.x as f64, offset.y as f64, offset.z as f64),
        color: WALL_MATERIAL,
        rise: RiseAnimation::new(config.wall_rise_speed),
        faces,
    })
}
