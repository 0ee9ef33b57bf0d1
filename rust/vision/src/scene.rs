// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generated scene output: named mesh groups with world transforms

use crate::animation::RiseAnimation;
use crate::types::Segment;
use nalgebra::Point3;
use planrise_geometry::{FaceDirection, Mesh};

/// Flat slab mesh for one floor region
#[derive(Debug, Clone)]
pub struct FloorGroup {
    pub name: String,
    /// World position of the group pivot
    pub origin: Point3<f64>,
    pub mesh: Mesh,
    /// RGBA material color
    pub color: [f32; 4],
}

/// Single merged mesh for all line-segment walls
#[derive(Debug, Clone)]
pub struct WallGroup {
    pub name: String,
    pub origin: Point3<f64>,
    pub mesh: Mesh,
    pub color: [f32; 4],
    /// Vertical scale animation state
    pub rise: RiseAnimation,
}

/// One directional sub-mesh of an inner-edge wall
#[derive(Debug, Clone)]
pub struct DirectionalMesh {
    pub direction: FaceDirection,
    pub mesh: Mesh,
}

/// Wall group recovered from an inner-edge cluster, split per face direction
#[derive(Debug, Clone)]
pub struct InnerWallGroup {
    pub name: String,
    pub origin: Point3<f64>,
    pub color: [f32; 4],
    pub rise: RiseAnimation,
    /// Non-empty directional sub-meshes (at most four), sharing the group
    /// material
    pub faces: Vec<DirectionalMesh>,
}

/// Complete output of one pipeline run
#[derive(Debug, Clone)]
pub struct Scene {
    pub grid_width: u32,
    pub grid_height: u32,
    /// One slab group per detected region
    pub floors: Vec<FloorGroup>,
    /// Merged wall mesh; None when no non-degenerate segment survived
    pub walls: Option<WallGroup>,
    /// Partition walls recovered from inner-edge clusters
    pub inner_walls: Vec<InnerWallGroup>,
    /// Detected wall segments in grid coordinates
    pub segments: Vec<Segment>,
    /// The recolored plan image (RGBA), for display surfaces
    pub annotated_rgba: Vec<u8>,
}

impl Scene {
    /// Total number of emitted mesh groups (directional sub-meshes count
    /// toward their parent group)
    pub fn group_count(&self) -> usize {
        self.floors.len() + usize::from(self.walls.is_some()) + self.inner_walls.len()
    }

    /// Total triangle count across all groups
    pub fn triangle_count(&self) -> usize {
        let floors: usize = self.floors.iter().map(|f| f.mesh.triangle_count()).sum();
        let walls = self
            .walls
            .as_ref()
            .map_or(0, |w| w.mesh.triangle_count());
        let inner: usize = self
            .inner_walls
            .iter()
            .flat_map(|g| g.faces.iter())
            .map(|f| f.mesh.triangle_count())
            .sum();
        floors + walls + inner
    }
}

/// Convert an 8-bit reference color to a linear float material color
pub(crate) fn color_to_f32(color: [u8; 4]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        color[3] as f32 / 255.0,
    ]
}
