// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Probabilistic line-segment detection over the wall mask
//!
//! Accumulator-based Hough voting followed by a segment walk along each
//! candidate line with gap bridging. The contract is the interesting part:
//! given a binary mask and {rho, theta, votes, min length, max gap}, return
//! straight segments whose support exceeds the vote threshold, merging
//! collinear runs within the gap tolerance. Near-duplicate segments are NOT
//! merged here; consumers deduplicate with canonical keys.

use crate::types::{HoughParams, Point2D, Segment};
use image::GrayImage;

/// Cap on accumulator peaks walked per invocation
const PEAK_LIMIT: usize = 500;

struct Accumulator {
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
    num_rhos: usize,
    rho_offset: f64,
    rho_resolution: f64,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: u32, height: u32, params: &HoughParams) -> Self {
        let num_thetas = (std::f64::consts::PI / params.theta).round().max(1.0) as usize;
        let mut cos_table = Vec::with_capacity(num_thetas);
        let mut sin_table = Vec::with_capacity(num_thetas);
        for i in 0..num_thetas {
            let theta = i as f64 * params.theta;
            cos_table.push(theta.cos());
            sin_table.push(theta.sin());
        }

        let max_rho = ((width as f64).powi(2) + (height as f64).powi(2)).sqrt();
        let num_rhos = (2.0 * max_rho / params.rho) as usize + 1;

        Self {
            cos_table,
            sin_table,
            num_rhos,
            rho_offset: max_rho,
            rho_resolution: params.rho,
            votes: vec![0u32; num_thetas * num_rhos],
        }
    }

    fn vote(&mut self, points: &[(i32, i32)]) {
        for &(x, y) in points {
            for theta_idx in 0..self.cos_table.len() {
                let rho =
                    x as f64 * self.cos_table[theta_idx] + y as f64 * self.sin_table[theta_idx];
                let rho_idx = ((rho + self.rho_offset) / self.rho_resolution) as usize;
                if rho_idx < self.num_rhos {
                    self.votes[theta_idx * self.num_rhos + rho_idx] += 1;
                }
            }
        }
    }

    /// Peaks at or above the vote threshold, strongest first
    fn peaks(&self, threshold: u32) -> Vec<(usize, f64, u32)> {
        let mut peaks = Vec::new();
        for theta_idx in 0..self.cos_table.len() {
            for rho_idx in 0..self.num_rhos {
                let votes = self.votes[theta_idx * self.num_rhos + rho_idx];
                if votes >= threshold {
                    let rho = rho_idx as f64 * self.rho_resolution - self.rho_offset;
                    peaks.push((theta_idx, rho, votes));
                }
            }
        }
        peaks.sort_by(|a, b| b.2.cmp(&a.2));
        peaks.truncate(PEAK_LIMIT);
        peaks
    }
}

/// Detect line segments in a binary mask (support pixels are > 128).
pub fn extract_segments(mask: &GrayImage, params: &HoughParams) -> Vec<Segment> {
    let width = mask.width();
    let height = mask.height();

    let mut support: Vec<(i32, i32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y).0[0] > 128 {
                support.push((x as i32, y as i32));
            }
        }
    }
    if support.is_empty() {
        return Vec::new();
    }

    let mut accumulator = Accumulator::new(width, height, params);
    accumulator.vote(&support);

    let band = 2.0 * params.rho;
    let mut used = vec![false; support.len()];
    let mut segments = Vec::new();

    for (theta_idx, rho, _votes) in accumulator.peaks(params.vote_threshold) {
        let cos_t = accumulator.cos_table[theta_idx];
        let sin_t = accumulator.sin_table[theta_idx];

        // Unused support pixels within the band around this line.
        let mut line_points: Vec<(i32, i32, usize)> = Vec::new();
        for (i, &(x, y)) in support.iter().enumerate() {
            if used[i] {
                continue;
            }
            let point_rho = x as f64 * cos_t + y as f64 * sin_t;
            if (point_rho - rho).abs() < band {
                line_points.push((x, y, i));
            }
        }

        if line_points.len() < 2 {
            continue;
        }

        // Order along the line direction, then walk runs bridging gaps.
        line_points.sort_by(|a, b| {
            let proj_a = a.0 as f64 * (-sin_t) + a.1 as f64 * cos_t;
            let proj_b = b.0 as f64 * (-sin_t) + b.1 as f64 * cos_t;
            proj_a.partial_cmp(&proj_b).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut run_start = 0usize;
        for i in 1..=line_points.len() {
            let run_ends = if i == line_points.len() {
                true
            } else {
                let dx = (line_points[i].0 - line_points[i - 1].0) as f64;
                let dy = (line_points[i].1 - line_points[i - 1].1) as f64;
                (dx * dx + dy * dy).sqrt() > params.max_gap
            };
            if !run_ends {
                continue;
            }

            let run = &line_points[run_start..i];
            run_start = i;
            if run.len() < 2 {
                continue;
            }

            let (sx, sy, _) = run[0];
            let (ex, ey, _) = run[run.len() - 1];
            let start = Point2D::new(sx as f64, sy as f64);
            let end = Point2D::new(ex as f64, ey as f64);
            if start.distance_to(&end) < params.min_length {
                continue;
            }

            segments.push(Segment::new(start, end));
            for &(_, _, idx) in run {
                used[idx] = true;
            }
        }
    }

    tracing::debug!(
        support = support.len(),
        segments = segments.len(),
        "line detection complete"
    );

    segments
}
