// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-pixel semantic classification of the plan image

use crate::error::{Error, Result};
use crate::types::{CellClass, Grid, PlanConfig};

/// Classify a single RGBA color. Pure and total: no error cases, same color
/// always yields the same class.
///
/// Priority order:
/// 1. all channels dark -> Wall
/// 2. saturated red -> TintedWall (re-admittable as Floor by the region fill)
/// 3. dark neutral gray -> Wall
/// 4. anything else -> Background
pub fn classify_color(rgba: [u8; 4], config: &PlanConfig) -> CellClass {
    let [r, g, b, _a] = rgba;

    if r < config.dark_threshold && g < config.dark_threshold && b < config.dark_threshold {
        return CellClass::Wall;
    }

    if r > config.red_min && g < config.red_channel_max && b < config.red_channel_max {
        return CellClass::TintedWall;
    }

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min <= config.gray_window && r < config.gray_red_max {
        return CellClass::Wall;
    }

    CellClass::Background
}

/// Classify every pixel of an RGBA buffer into a fresh grid.
///
/// Fails fast before any stage runs when the image is absent or the buffer
/// does not match the stated dimensions.
pub fn classify_pixels(
    rgba: &[u8],
    width: u32,
    height: u32,
    config: &PlanConfig,
) -> Result<Grid> {
    if width == 0 || height == 0 || rgba.is_empty() {
        return Err(Error::MissingImage);
    }

    let expected = (width as usize) * (height as usize) * 4;
    if rgba.len() != expected {
        return Err(Error::BufferSize {
            width,
            height,
            expected,
            actual: rgba.len(),
        });
    }

    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 4) as usize;
            let class = classify_color(
                [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]],
                config,
            );
            if class != CellClass::Background {
                grid.set(x, y, class);
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlanConfig {
        PlanConfig::default()
    }

    #[test]
    fn test_dark_pixel_is_wall() {
        assert_eq!(classify_color([0, 0, 0, 255], &config()), CellClass::Wall);
        assert_eq!(classify_color([49, 49, 49, 255], &config()), CellClass::Wall);
    }

    #[test]
    fn test_dark_threshold_boundary() {
        // 50 in any channel escapes the dark rule; 50/50/50 is still a
        // neutral gray below 150, so the gray rule catches it
        assert_eq!(classify_color([50, 50, 50, 255], &config()), CellClass::Wall);
        // A bright neutral gray is background
        assert_eq!(
            classify_color([200, 200, 200, 255], &config()),
            CellClass::Background
        );
    }

    #[test]
    fn test_saturated_red_is_tinted_wall() {
        assert_eq!(
            classify_color([255, 0, 0, 255], &config()),
            CellClass::TintedWall
        );
        assert_eq!(
            classify_color([201, 49, 49, 255], &config()),
            CellClass::TintedWall
        );
        // Red channel not high enough
        assert_eq!(
            classify_color([200, 0, 0, 255], &config()),
            CellClass::Background
        );
    }

    #[test]
    fn test_gray_rule_requires_tight_channels() {
        assert_eq!(
            classify_color([100, 105, 95, 255], &config()),
            CellClass::Wall
        );
        // Spread of 20 exceeds the window
        assert_eq!(
            classify_color([100, 120, 100, 255], &config()),
            CellClass::Background
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let cfg = config();
        for sample in [[0u8, 0, 0, 255], [255, 0, 0, 255], [128, 128, 128, 255]] {
            assert_eq!(classify_color(sample, &cfg), classify_color(sample, &cfg));
        }
    }

    #[test]
    fn test_classify_pixels_grid() {
        let cfg = config();
        // 2x1: black wall, white background
        let rgba = vec![0, 0, 0, 255, 255, 255, 255, 255];
        let grid = classify_pixels(&rgba, 2, 1, &cfg).unwrap();

        assert_eq!(grid.get(0, 0), CellClass::Wall);
        assert_eq!(grid.get(1, 0), CellClass::Background);
    }

    #[test]
    fn test_missing_image_fails_fast() {
        let cfg = config();
        assert!(matches!(
            classify_pixels(&[], 0, 0, &cfg),
            Err(Error::MissingImage)
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let cfg = config();
        let rgba = vec![0u8; 7];
        assert!(matches!(
            classify_pixels(&rgba, 2, 1, &cfg),
            Err(Error::BufferSize { .. })
        ));
    }
}
