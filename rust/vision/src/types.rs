// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan classification and scene generation

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A 2D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-cell semantic classification of the plan grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellClass {
    /// Undetermined: candidate floor or exterior
    Background,
    /// Solid dark wall; blocks flood fill
    Wall,
    /// Red-marked wall candidate. Passable by flood fill and re-admitted as
    /// Floor when absorbed into a large interior region; reverts to Wall
    /// otherwise.
    TintedWall,
    /// Transient mark for a small wall component scheduled for removal
    WallNoise,
    /// Interior floor cell belonging to a detected region
    Floor,
    /// Floor-side ribbon along a wall boundary (internal partition candidate)
    InnerEdge,
}

/// Width×height classification grid, owned by one pipeline run and mutated
/// in place by successive stages.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellClass>,
}

/// The four axis-aligned neighbor offsets
pub const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Cardinal plus diagonal neighbor offsets
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CellClass::Background; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> CellClass {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, class: CellClass) {
        let i = self.index(x, y);
        self.cells[i] = class;
    }

    /// Checked signed-coordinate lookup; None outside the grid
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> Option<CellClass> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(self.get(x as u32, y as u32))
        }
    }

    /// Number of cells currently holding `class`
    pub fn count(&self, class: CellClass) -> usize {
        self.cells.iter().filter(|&&c| c == class).count()
    }

    /// True if any of the 8 neighbors of (x, y) holds `class`
    pub fn has_neighbor8(&self, x: u32, y: u32, class: CellClass) -> bool {
        NEIGHBORS_8
            .iter()
            .any(|&(dx, dy)| self.get_signed(x as i32 + dx, y as i32 + dy) == Some(class))
    }

    /// Render the classified grid as an RGBA buffer using the reference
    /// colors from `config`. This is the recolored plan the original design
    /// feeds back to its display surface.
    pub fn render_rgba(&self, config: &PlanConfig) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.cells.len() * 4);
        for &cell in &self.cells {
            let color = match cell {
                CellClass::Floor => config.floor_color,
                CellClass::Wall | CellClass::TintedWall => config.wall_color,
                CellClass::InnerEdge => config.inner_edge_color,
                CellClass::Background | CellClass::WallNoise => config.background_color,
            };
            rgba.extend_from_slice(&color);
        }
        rgba
    }
}

/// A maximal 4-connected interior floor component large enough to be a room
#[derive(Debug, Clone)]
pub struct Region {
    /// Member cells in grid coordinates
    pub cells: Vec<(u32, u32)>,
    /// Mean cell coordinates in grid space
    pub centroid: Point2D,
}

impl Region {
    pub fn from_cells(cells: Vec<(u32, u32)>) -> Self {
        let n = cells.len().max(1) as f64;
        let (sum_x, sum_y) = cells
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x as f64, sy + y as f64));
        Self {
            cells,
            centroid: Point2D::new(sum_x / n, sum_y / n),
        }
    }

    /// Pixel count of the region
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    /// Region center in world units: `(avg/dim - 0.5) * plane`
    pub fn world_center(&self, grid_width: u32, grid_height: u32, plane: (f64, f64)) -> (f64, f64) {
        (
            (self.centroid.x / grid_width as f64 - 0.5) * plane.0,
            (self.centroid.y / grid_height as f64 - 0.5) * plane.1,
        )
    }
}

/// A detected straight wall piece, endpoints in grid coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Parameters for the probabilistic line-segment detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoughParams {
    /// Distance resolution of the accumulator (pixels)
    pub rho: f64,
    /// Angle resolution of the accumulator (radians)
    pub theta: f64,
    /// Minimum accumulator votes for a candidate line
    pub vote_threshold: u32,
    /// Minimum segment length (pixels)
    pub min_length: f64,
    /// Maximum gap bridged within one segment (pixels)
    pub max_gap: f64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f64::consts::PI / 180.0,
            vote_threshold: 10,
            min_length: 20.0,
            max_gap: 15.0,
        }
    }
}

/// Configuration for the full plan-to-scene pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// World-space extent the grid maps onto (x, z)
    pub plane_size: (f64, f64),
    /// All channels below this value classify as Wall
    pub dark_threshold: u8,
    /// Red channel above this (with green/blue low) marks a tinted wall
    pub red_min: u8,
    /// Upper bound on green/blue for the tinted-wall rule
    pub red_channel_max: u8,
    /// Channels mutually within this window count as neutral gray
    pub gray_window: u8,
    /// Neutral gray darker than this classifies as Wall
    pub gray_red_max: u8,
    /// Minimum pixel count for a region or inner-edge cluster to materialize
    pub min_region_pixels: usize,
    /// Reference colors for the recolored plan (RGBA)
    pub wall_color: [u8; 4],
    pub floor_color: [u8; 4],
    pub inner_edge_color: [u8; 4],
    pub background_color: [u8; 4],
    /// Per-channel tolerance when comparing against reference colors
    pub color_tolerance: u8,
    /// Wall extrusion height in world units
    pub wall_height: f64,
    /// Vertical scale gained per second by the rise animation
    pub wall_rise_speed: f32,
    /// Floor slab thickness in world units
    pub floor_thickness: f64,
    /// Lower bound on wall thickness in world units
    pub min_wall_thickness: f64,
    /// Morphological-open radius applied to the wall mask before line
    /// detection; 0 disables. Flood-based noise removal already covers
    /// printed symbols, so this only helps scanned plans with speckle.
    pub mask_scrub_radius: u8,
    /// Line-segment detector parameters
    pub hough: HoughParams,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            plane_size: (10.0, 10.0),
            dark_threshold: 50,
            red_min: 200,
            red_channel_max: 50,
            gray_window: 10,
            gray_red_max: 150,
            min_region_pixels: 50,
            wall_color: [255, 0, 0, 255],
            floor_color: [128, 128, 128, 255],
            inner_edge_color: [255, 165, 0, 255],
            background_color: [255, 255, 255, 255],
            color_tolerance: 10,
            wall_height: 3.0,
            wall_rise_speed: 1.0,
            floor_thickness: 0.05,
            min_wall_thickness: 0.3,
            mask_scrub_radius: 0,
            hough: HoughParams::default(),
        }
    }
}

impl PlanConfig {
    /// Grid-to-world scale factors for a given grid size
    pub fn scale(&self, grid_width: u32, grid_height: u32) -> (f64, f64) {
        (
            self.plane_size.0 / grid_width as f64,
            self.plane_size.1 / grid_height as f64,
        )
    }

    /// Wall thickness in world units, floored at `min_wall_thickness`
    pub fn wall_thickness(&self, grid_width: u32, grid_height: u32) -> f64 {
        let (sx, sz) = self.scale(grid_width, grid_height);
        self.min_wall_thickness.max(sx.min(sz))
    }

    /// Map grid coordinates onto the world plane (x, z), plane-centered
    pub fn world_xz(&self, gx: f64, gy: f64, grid_width: u32, grid_height: u32) -> (f64, f64) {
        let (sx, sz) = self.scale(grid_width, grid_height);
        (
            gx * sx - self.plane_size.0 * 0.5,
            gy * sz - self.plane_size.1 * 0.5,
        )
    }

    /// Check the numeric options before any stage runs.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.plane_size.0 <= 0.0 || self.plane_size.1 <= 0.0 {
            return Err("plane size must be positive".to_string());
        }
        if self.wall_height <= 0.0 || self.floor_thickness <= 0.0 || self.min_wall_thickness <= 0.0
        {
            return Err("wall height and thicknesses must be positive".to_string());
        }
        if self.hough.rho <= 0.0 || self.hough.theta <= 0.0 {
            return Err("line detector resolutions must be positive".to_string());
        }
        if colors_match(self.wall_color, self.floor_color, self.color_tolerance) {
            return Err(
                "wall and floor reference colors fall within the color tolerance".to_string(),
            );
        }
        Ok(())
    }
}

/// True when two reference colors are indistinguishable within the
/// per-channel tolerance (alpha ignored)
pub fn colors_match(a: [u8; 4], b: [u8; 4], tolerance: u8) -> bool {
    a[..3]
        .iter()
        .zip(&b[..3])
        .all(|(x, y)| x.abs_diff(*y) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_roundtrip() {
        let mut grid = Grid::new(4, 3);
        assert_eq!(grid.get(3, 2), CellClass::Background);

        grid.set(1, 2, CellClass::Wall);
        assert_eq!(grid.get(1, 2), CellClass::Wall);
        assert_eq!(grid.count(CellClass::Wall), 1);
    }

    #[test]
    fn test_grid_signed_bounds() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.get_signed(0, 2), None);
        assert_eq!(grid.get_signed(1, 1), Some(CellClass::Background));
    }

    #[test]
    fn test_neighbor8_detects_diagonal() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, CellClass::Wall);

        assert!(grid.has_neighbor8(1, 1, CellClass::Wall));
        assert!(!grid.has_neighbor8(2, 2, CellClass::Wall));
    }

    #[test]
    fn test_region_centroid_and_world_center() {
        let region = Region::from_cells(vec![(1, 1), (3, 1), (1, 3), (3, 3)]);

        assert_relative_eq!(region.centroid.x, 2.0);
        assert_relative_eq!(region.centroid.y, 2.0);

        // Centered 4-cell region in a 4x4 grid maps to the plane origin
        let (wx, wz) = region.world_center(4, 4, (10.0, 10.0));
        assert_relative_eq!(wx, 0.0);
        assert_relative_eq!(wz, 0.0);
    }

    #[test]
    fn test_segment_length_midpoint() {
        let seg = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0));

        assert_relative_eq!(seg.length(), 5.0);
        assert_relative_eq!(seg.midpoint().x, 1.5);
        assert_relative_eq!(seg.midpoint().y, 2.0);
    }

    #[test]
    fn test_wall_thickness_floor() {
        let config = PlanConfig::default();
        // 100x100 grid over a 10x10 plane gives 0.1 per cell, floored at 0.3
        assert_relative_eq!(config.wall_thickness(100, 100), 0.3);
        // Coarse 10x10 grid gives 1.0 per cell
        assert_relative_eq!(config.wall_thickness(10, 10), 1.0);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(PlanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_ambiguous_reference_colors() {
        let config = PlanConfig {
            floor_color: [250, 5, 5, 255], // within tolerance of the red wall color
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_flat_walls() {
        let config = PlanConfig {
            wall_height: 0.0,
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colors_match_ignores_alpha() {
        assert!(colors_match([10, 10, 10, 0], [12, 12, 12, 255], 5));
        assert!(!colors_match([10, 10, 10, 255], [30, 10, 10, 255], 5));
    }

    #[test]
    fn test_render_rgba_uses_reference_colors() {
        let config = PlanConfig::default();
        let mut grid = Grid::new(2, 1);
        grid.set(0, 0, CellClass::Floor);
        grid.set(1, 0, CellClass::Wall);

        let rgba = grid.render_rgba(&config);
        assert_eq!(&rgba[0..4], &config.floor_color);
        assert_eq!(&rgba[4..8], &config.wall_color);
    }
}
