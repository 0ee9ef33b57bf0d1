// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a plan image into a scene
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing source image: width and height must be non-zero")]
    MissingImage,

    #[error("Image buffer size mismatch: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Mesh construction failed: {0}")]
    Geometry(#[from] planrise_geometry::Error),
}
