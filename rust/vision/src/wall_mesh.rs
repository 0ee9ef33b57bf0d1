// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merged wall mesh construction from detected line segments

use crate::animation::RiseAnimation;
use crate::error::Result;
use crate::scene::WallGroup;
use crate::types::{PlanConfig, Segment};
use nalgebra::{Point3, Vector3};
use planrise_geometry::{oriented_box, Mesh};

/// Segments shorter than this in world units are detector noise, not walls
pub const MIN_SEGMENT_LENGTH: f64 = 0.01;

/// Uniform material for generated wall groups
pub(crate) const WALL_MATERIAL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Build the single merged wall mesh from all detected segments.
///
/// Degenerate (near-zero length) segments are skipped silently. Returns
/// None when no mesh-worthy segment remains; an empty result is a valid
/// outcome, not an error.
pub fn build_wall_mesh(
    segments: &[Segment],
    grid_width: u32,
    grid_height: u32,
    config: &PlanConfig,
) -> Result<Option<WallGroup>> {
    if segments.is_empty() {
        return Ok(None);
    }

    let thickness = config.wall_thickness(grid_width, grid_height);
    let y_offset = config.wall_height * 0.5;

    let world = |seg: &Segment| {
        let (sx, sz) = config.world_xz(seg.start.x, seg.start.y, grid_width, grid_height);
        let (ex, ez) = config.world_xz(seg.end.x, seg.end.y, grid_width, grid_height);
        (Vector3::new(sx, 0.0, sz), Vector3::new(ex, 0.0, ez))
    };

    // Anchor the group at the mean of all segment midpoints.
    let mut anchor = Vector3::zeros();
    for seg in segments {
        let (p0, p1) = world(seg);
        anchor += (p0 + p1) * 0.5;
    }
    anchor /= segments.len() as f64;

    let mut boxes = Vec::with_capacity(segments.len());
    let mut skipped = 0usize;
    for seg in segments {
        let (p0, p1) = world(seg);
        let dir = p1 - p0;
        let length = dir.norm();
        if length < MIN_SEGMENT_LENGTH {
            skipped += 1;
            continue;
        }

        let mid = (p0 + p1) * 0.5 - anchor;
        let yaw = dir.x.atan2(dir.z);
        boxes.push(oriented_box(
            Point3::new(mid.x, y_offset, mid.z),
            Vector3::new(thickness, config.wall_height, length),
            yaw,
        )?);
    }

    tracing::debug!(
        segments = segments.len(),
        skipped,
        "wall mesh boxes assembled"
    );

    if boxes.is_empty() {
        return Ok(None);
    }

    let mut mesh = Mesh::new();
    mesh.merge_all(&boxes);

    Ok(Some(WallGroup {
        name: "MergedWalls".to_string(),
        origin: Point3::new(anchor.x, 0.0, anchor.z),
        mesh,
        color: WALL_MATERIAL,
        rise: RiseAnimation::new(config.wall_rise_speed),
    }))
}
