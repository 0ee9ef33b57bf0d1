// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting a mesh into directional sub-meshes by face normal
//!
//! Consumers want to style wall faces independently (e.g. the top edge vs
//! the two long sides) without re-deriving geometry, so a combined wall mesh
//! is bucketed per triangle by the dominant axis of its averaged vertex
//! normal. Triangles that do not clearly align with any axis are dropped.

use crate::mesh::Mesh;
use nalgebra::Vector3;

/// Directional bucket for a wall face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    Up,
    Down,
    Forward,
    Back,
}

impl FaceDirection {
    const ALL: [FaceDirection; 4] = [
        FaceDirection::Up,
        FaceDirection::Down,
        FaceDirection::Forward,
        FaceDirection::Back,
    ];

    fn axis(self) -> Vector3<f32> {
        match self {
            FaceDirection::Up => Vector3::new(0.0, 1.0, 0.0),
            FaceDirection::Down => Vector3::new(0.0, -1.0, 0.0),
            FaceDirection::Forward => Vector3::new(0.0, 0.0, 1.0),
            FaceDirection::Back => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// Display name used for generated group names
    pub fn label(self) -> &'static str {
        match self {
            FaceDirection::Up => "Up",
            FaceDirection::Down => "Down",
            FaceDirection::Forward => "Forward",
            FaceDirection::Back => "Back",
        }
    }
}

/// Split `mesh` into per-direction sub-meshes.
///
/// A triangle lands in the bucket whose axis its averaged vertex normal
/// aligns with (`dot >= threshold`, normals assumed unit length). Only
/// non-empty buckets are returned, in the fixed Up/Down/Forward/Back order.
pub fn split_by_normal(mesh: &Mesh, threshold: f32) -> Vec<(FaceDirection, Mesh)> {
    let mut buckets: [Mesh; 4] = Default::default();

    for tri in mesh.indices.chunks_exact(3) {
        let mut avg = Vector3::zeros();
        for &index in tri {
            let n = index as usize * 3;
            avg += Vector3::new(mesh.normals[n], mesh.normals[n + 1], mesh.normals[n + 2]);
        }
        let norm = avg.norm();
        if norm < f32::EPSILON {
            continue;
        }
        avg /= norm;

        let Some(slot) = FaceDirection::ALL
            .iter()
            .position(|dir| avg.dot(&dir.axis()) >= threshold)
        else {
            continue; // side faces and ambiguous triangles are dropped
        };

        let bucket = &mut buckets[slot];
        let base = bucket.vertex_count() as u32;
        for &index in tri {
            let n = index as usize * 3;
            bucket.positions.extend_from_slice(&mesh.positions[n..n + 3]);
            bucket.normals.extend_from_slice(&mesh.normals[n..n + 3]);
        }
        bucket.add_triangle(base, base + 1, base + 2);
    }

    FaceDirection::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, mesh)| !mesh.is_empty())
        .collect()
}
