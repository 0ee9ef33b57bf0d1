// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan recognition and 3D room layout generation
//!
//! This crate turns a raster floor-plan image into a set of 3D mesh groups:
//! 1. Per-pixel classification of the plan (walls, candidate floor)
//! 2. Flood-fill discovery of floor regions with noise suppression
//! 3. Inner-edge derivation along floor/wall boundaries
//! 4. Probabilistic line-segment detection over the cleaned wall mask
//! 5. Mesh construction: one slab per region, one merged wall mesh, and
//!    partition walls recovered from inner-edge clusters
//!
//! # Usage
//!
//! ```rust,ignore
//! use planrise_vision::{build_scene, PlanConfig};
//!
//! let config = PlanConfig::default();
//! let scene = build_scene(&rgba_pixels, width, height, &config)?;
//!
//! for floor in &scene.floors {
//!     println!("{}: {} triangles", floor.name, floor.mesh.triangle_count());
//! }
//! ```

pub mod animation;
pub mod classifier;
pub mod error;
pub mod hough;
pub mod inner_edge;
pub mod inner_wall;
pub mod mask;
pub mod pipeline;
pub mod project;
pub mod region_fill;
pub mod room_mesh;
pub mod scene;
pub mod types;
pub mod wall_mesh;

// Re-export commonly used types and functions
pub use animation::RiseAnimation;
pub use classifier::{classify_color, classify_pixels};
pub use error::{Error, Result};
pub use hough::extract_segments;
pub use inner_edge::detect_inner_edges;
pub use inner_wall::build_inner_walls;
pub use mask::wall_mask;
pub use pipeline::build_scene;
pub use project::{OpeningKind, ProjectData};
pub use region_fill::{fill_regions, remove_wall_noise};
pub use room_mesh::build_floor_meshes;
pub use scene::{DirectionalMesh, FloorGroup, InnerWallGroup, Scene, WallGroup};
pub use types::{CellClass, Grid, HoughParams, PlanConfig, Point2D, Region, Segment};
pub use wall_mesh::build_wall_mesh;
