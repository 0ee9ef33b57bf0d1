// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cosmetic rise animation for wall groups
//!
//! Poll-based rather than coroutine-based: the host advances the animation
//! with an explicit `tick(dt)` from its per-frame loop. The animation only
//! affects a vertical transform scale, never mesh topology; dropping the
//! target group simply stops future ticks, no cleanup required.

/// Vertical scale-up of a wall group from 0 toward 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseAnimation {
    scale: f32,
    rate: f32,
}

impl RiseAnimation {
    /// Start a new animation at scale 0, gaining `rate` per second.
    pub fn new(rate: f32) -> Self {
        Self { scale: 0.0, rate }
    }

    /// Current vertical scale factor in [0, 1]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// True once the scale has reached 1
    pub fn is_complete(&self) -> bool {
        self.scale >= 1.0
    }

    /// Advance by `dt` seconds; the scale clamps at 1. Returns true when the
    /// animation has completed (ticking a completed animation is a no-op).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.scale = (self.scale + self.rate * dt).min(1.0);
        self.is_complete()
    }
}
