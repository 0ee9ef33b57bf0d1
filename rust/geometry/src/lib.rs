// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh construction primitives for floor plan proceduralization
//!
//! This crate provides the geometric building blocks used when converting a
//! classified floor plan into renderable 3D geometry:
//! - A flat-array triangle [`Mesh`](mesh::Mesh) (positions, normals, indices)
//! - Box primitive generators ([`primitives`]) for floor cells and wall pieces
//! - Face-direction splitting ([`split`]) for per-face material assignment

pub mod error;
pub mod mesh;
pub mod primitives;
pub mod split;

pub use error::{Error, Result};
pub use mesh::Mesh;
pub use primitives::{axis_box, oriented_box};
pub use split::{split_by_normal, FaceDirection};
