// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

/// Triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Merge another mesh into this one
    #[inline]
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = (self.positions.len() / 3) as u32;

        self.positions.reserve(other.positions.len());
        self.normals.reserve(other.normals.len());
        self.indices.reserve(other.indices.len());

        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    /// Batch merge multiple meshes at once (more efficient than individual merges)
    pub fn merge_all(&mut self, meshes: &[Mesh]) {
        let total_positions: usize = meshes.iter().map(|m| m.positions.len()).sum();
        let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

        self.positions.reserve(total_positions);
        self.normals.reserve(total_positions);
        self.indices.reserve(total_indices);

        for mesh in meshes {
            if !mesh.is_empty() {
                let vertex_offset = (self.positions.len() / 3) as u32;
                self.positions.extend_from_slice(&mesh.positions);
                self.normals.extend_from_slice(&mesh.normals);
                self.indices
                    .extend(mesh.indices.iter().map(|&i| i + vertex_offset));
            }
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }

    /// Centroid of the bounding box
    pub fn bounds_center(&self) -> Point3<f32> {
        let (min, max) = self.bounds();
        Point3::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
            (min.z + max.z) * 0.5,
        )
    }

    /// Shift all vertices so the bounding-box centroid becomes the local origin.
    ///
    /// Returns the offset removed from the vertices; adding it to the parent
    /// transform preserves the mesh's world position while normalizing the
    /// pivot for downstream transforms.
    pub fn recenter(&mut self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::zeros();
        }

        let center = self.bounds_center();
        for chunk in self.positions.chunks_exact_mut(3) {
            chunk[0] -= center.x;
            chunk[1] -= center.y;
            chunk[2] -= center.z;
        }

        Vector3::new(center.x, center.y, center.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        let n = Vector3::new(0.0, 1.0, 0.0);
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), n);
        mesh.add_vertex(Point3::new(2.0, 0.0, 0.0), n);
        mesh.add_vertex(Point3::new(2.0, 0.0, 4.0), n);
        mesh.add_vertex(Point3::new(0.0, 0.0, 4.0), n);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        mesh
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = quad_mesh();
        let b = quad_mesh();

        a.merge(&b);

        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        // Second quad's first triangle must reference the appended vertices
        assert_eq!(&a.indices[6..9], &[4, 5, 6]);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut a = quad_mesh();
        a.merge(&Mesh::new());
        assert_eq!(a.vertex_count(), 4);
    }

    #[test]
    fn test_bounds() {
        let mesh = quad_mesh();
        let (min, max) = mesh.bounds();

        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.x, 2.0);
        assert_relative_eq!(max.z, 4.0);
    }

    #[test]
    fn test_recenter_returns_offset() {
        let mut mesh = quad_mesh();
        let offset = mesh.recenter();

        assert_relative_eq!(offset.x, 1.0);
        assert_relative_eq!(offset.z, 2.0);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x + max.x, 0.0);
        assert_relative_eq!(min.z + max.z, 0.0);
    }

    #[test]
    fn test_recenter_empty() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.recenter(), Vector3::zeros());
    }
}
