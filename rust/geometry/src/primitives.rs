// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box primitive generators
//!
//! Floor cells and wall pieces are all boxes; instead of round-tripping
//! through a scene object, the boxes are generated directly as meshes with
//! per-face normals (24 vertices, 12 triangles).

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use nalgebra::{Point3, Rotation3, Vector3};

/// Axis-aligned box centered at `center` with full dimensions `dims`.
pub fn axis_box(center: Point3<f64>, dims: Vector3<f64>) -> Result<Mesh> {
    oriented_box(center, dims, 0.0)
}

/// Box centered at `center`, yawed about the vertical axis by `yaw` radians
/// so that its local Z axis (the `dims.z` extent) follows the yaw direction.
///
/// The up vector is fixed to +Y; walls only ever rotate in the ground plane.
pub fn oriented_box(center: Point3<f64>, dims: Vector3<f64>, yaw: f64) -> Result<Mesh> {
    if dims.x <= 0.0 || dims.y <= 0.0 || dims.z <= 0.0 {
        return Err(Error::InvalidDimensions(format!(
            "all dimensions must be positive, got ({}, {}, {})",
            dims.x, dims.y, dims.z
        )));
    }

    let hx = dims.x * 0.5;
    let hy = dims.y * 0.5;
    let hz = dims.z * 0.5;

    let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw);

    let mut mesh = Mesh::with_capacity(24, 36);

    // Each face: outward normal plus four corners, counter-clockwise when
    // viewed from the normal side.
    let faces: [(Vector3<f64>, [Point3<f64>; 4]); 6] = [
        (
            Vector3::new(0.0, 1.0, 0.0),
            [
                Point3::new(-hx, hy, -hz),
                Point3::new(-hx, hy, hz),
                Point3::new(hx, hy, hz),
                Point3::new(hx, hy, -hz),
            ],
        ),
        (
            Vector3::new(0.0, -1.0, 0.0),
            [
                Point3::new(-hx, -hy, -hz),
                Point3::new(hx, -hy, -hz),
                Point3::new(hx, -hy, hz),
                Point3::new(-hx, -hy, hz),
            ],
        ),
        (
            Vector3::new(0.0, 0.0, 1.0),
            [
                Point3::new(-hx, -hy, hz),
                Point3::new(hx, -hy, hz),
                Point3::new(hx, hy, hz),
                Point3::new(-hx, hy, hz),
            ],
        ),
        (
            Vector3::new(0.0, 0.0, -1.0),
            [
                Point3::new(hx, -hy, -hz),
                Point3::new(-hx, -hy, -hz),
                Point3::new(-hx, hy, -hz),
                Point3::new(hx, hy, -hz),
            ],
        ),
        (
            Vector3::new(1.0, 0.0, 0.0),
            [
                Point3::new(hx, -hy, hz),
                Point3::new(hx, -hy, -hz),
                Point3::new(hx, hy, -hz),
                Point3::new(hx, hy, hz),
            ],
        ),
        (
            Vector3::new(-1.0, 0.0, 0.0),
            [
                Point3::new(-hx, -hy, -hz),
                Point3::new(-hx, -hy, hz),
                Point3::new(-hx, hy, hz),
                Point3::new(-hx, hy, -hz),
            ],
        ),
    ];

    for (normal, corners) in &faces {
        let base = mesh.vertex_count() as u32;
        let world_normal = rotation * normal;

        for corner in corners {
            let world = center + rotation * corner.coords;
            mesh.add_vertex(world, world_normal);
        }

        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    Ok(mesh)
}
