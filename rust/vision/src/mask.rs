// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary wall mask extraction

use crate::types::{CellClass, Grid};
use image::{GrayImage, Luma};

/// Build the binary wall mask: 255 where the cell is Wall, 0 elsewhere.
pub fn wall_mask(grid: &Grid) -> GrayImage {
    let mut mask = GrayImage::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) == CellClass::Wall {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }
    mask
}

/// Morphological opening (erode then dilate) over the mask.
///
/// The flood-fill noise removal already strips printed symbols; this extra
/// scrub only matters for scanned plans with single-pixel speckle, so the
/// pipeline applies it only when a non-zero radius is configured. Note that
/// opening also erases genuine walls thinner than `2 * radius + 1` pixels.
pub fn scrub_mask(mask: &GrayImage, radius: u8) -> GrayImage {
    let eroded = imageproc::morphology::erode(mask, imageproc::distance_transform::Norm::L1, radius);
    imageproc::morphology::dilate(&eroded, imageproc::distance_transform::Norm::L1, radius)
}
