//! Blob particles: generation, motion, and toroidal wraparound.

#[cfg(test)]
#[path = "blob_test.rs"]
mod blob_test;

use std::fmt;

use rand::Rng;

use crate::config::{BlobConfig, Range};

/// An HSL color as understood by CSS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// `hsla(...)` form at the given alpha, used for the transparent rim stop.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> String {
        format!("hsla({}, {}%, {}%, {alpha})", self.hue, self.saturation, self.lightness)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// A drifting radial-gradient disk. Radius, velocity and colors never change
/// after creation; only the position moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub dx: f64,
    pub dy: f64,
    /// Center color stop.
    pub c1: Hsl,
    /// Mid-radius color stop; fades to transparent at the rim.
    pub c2: Hsl,
}

impl Blob {
    /// Draw a blob uniformly placed inside a `width` x `height` viewport.
    pub fn random(rng: &mut impl Rng, width: f64, height: f64, config: &BlobConfig) -> Self {
        let velocity = Range::new(-config.speed, config.speed);
        let hsl = |hue| Hsl { hue, saturation: config.saturation, lightness: config.lightness };
        Self {
            x: sample(rng, Range::new(0.0, width)),
            y: sample(rng, Range::new(0.0, height)),
            r: sample(rng, config.radius),
            dx: sample(rng, velocity),
            dy: sample(rng, velocity),
            c1: hsl(sample(rng, config.inner_hue)),
            c2: hsl(sample(rng, config.outer_hue)),
        }
    }

    /// Advance one frame, then wrap each axis independently.
    pub fn step(&mut self, width: f64, height: f64) {
        self.x = wrap(self.x + self.dx, self.r, width);
        self.y = wrap(self.y + self.dy, self.r, height);
    }
}

/// Number of blobs for a viewport: one per `count_divisor` pixels of the
/// shorter side, never fewer than `min_count`.
#[must_use]
pub fn blob_count(width: f64, height: f64, config: &BlobConfig) -> usize {
    let per_side = (width.min(height) / config.count_divisor).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let derived = if per_side.is_finite() && per_side > 0.0 { per_side as usize } else { 0 };
    derived.max(config.min_count)
}

/// A full, fresh population for one viewport size.
pub fn populate(rng: &mut impl Rng, width: f64, height: f64, config: &BlobConfig) -> Vec<Blob> {
    (0..blob_count(width, height, config))
        .map(|_| Blob::random(rng, width, height, config))
        .collect()
}

/// Radius-aware toroidal wrap: leaving past `-r` re-enters at `extent + r`
/// and vice versa, so the disk is fully off-screen at the jump.
#[must_use]
pub fn wrap(pos: f64, r: f64, extent: f64) -> f64 {
    if pos < -r {
        extent + r
    } else if pos > extent + r {
        -r
    } else {
        pos
    }
}

// Scaled unit sample rather than `random_range`, which rejects empty ranges
// such as a zero-width viewport.
fn sample(rng: &mut impl Rng, range: Range) -> f64 {
    range.lerp(rng.random::<f64>())
}
