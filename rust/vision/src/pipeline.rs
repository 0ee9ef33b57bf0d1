// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full plan-to-scene pipeline
//!
//! The stages run strictly in sequence; each one requires the completed
//! grid/segment state of its predecessor and takes exclusive mutable access
//! to the grid for its duration.

use crate::classifier::classify_pixels;
use crate::error::Result;
use crate::hough::extract_segments;
use crate::inner_edge::detect_inner_edges;
use crate::inner_wall::build_inner_walls;
use crate::mask::{scrub_mask, wall_mask};
use crate::region_fill::{fill_regions, remove_wall_noise};
use crate::room_mesh::build_floor_meshes;
use crate::scene::Scene;
use crate::types::PlanConfig;
use crate::wall_mesh::build_wall_mesh;

/// Run the complete pipeline over an RGBA plan image.
///
/// Fails fast on a missing or mismatched input buffer; every later stage is
/// total. The grid is owned by this invocation and dropped with it; the
/// returned [`Scene`] is the only persisted artifact.
pub fn build_scene(
    rgba: &[u8],
    width: u32,
    height: u32,
    config: &PlanConfig,
) -> Result<Scene> {
    config.validate().map_err(crate::error::Error::InvalidConfig)?;

    let mut grid = classify_pixels(rgba, width, height, config)?;
    tracing::info!(width, height, "plan image classified");

    let regions = fill_regions(&mut grid, config);
    remove_wall_noise(&mut grid, config);
    detect_inner_edges(&mut grid);

    let mut mask = wall_mask(&grid);
    if config.mask_scrub_radius > 0 {
        mask = scrub_mask(&mask, config.mask_scrub_radius);
    }
    let segments = extract_segments(&mask, &config.hough);
    tracing::info!(segments = segments.len(), "wall segments detected");

    let floors = build_floor_meshes(&regions, width, height, config)?;
    let walls = build_wall_mesh(&segments, width, height, config)?;
    let inner_walls = build_inner_walls(&grid, &segments, config)?;

    let annotated_rgba = grid.render_rgba(config);

    Ok(Scene {
        grid_width: width,
        grid_height: height,
        floors,
        walls,
        inner_walls,
        segments,
        annotated_rgba,
    })
}
