//! Animated background: drawing-surface sizing and the per-frame blob update.
//!
//! Split the same way as a canvas engine: [`BackdropCore`] holds every piece
//! of state and logic and runs natively in tests, while [`Backdrop`] pairs it
//! with a [`BackdropSurface`] (the real canvas in the browser).

#[cfg(test)]
#[path = "backdrop_test.rs"]
mod backdrop_test;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::blob::{self, Blob};
use crate::config::BlobConfig;
use crate::error::ChromeError;

/// Drawing-surface geometry for one viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    /// Logical (CSS) width.
    pub width: f64,
    /// Logical (CSS) height.
    pub height: f64,
    /// Effective density ratio; always finite and positive.
    pub dpr: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl SurfaceSize {
    /// Backing store is `floor(logical * dpr)` per axis. A zero, negative or
    /// non-finite `dpr` counts as 1.
    #[must_use]
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self { width, height, dpr, backing_width: backing(width, dpr), backing_height: backing(height, dpr) }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing(logical: f64, dpr: f64) -> u32 {
    (logical * dpr).floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Something blobs can be painted onto.
pub trait BackdropSurface {
    /// Apply backing resolution, CSS size, and a `dpr` scale transform so
    /// later calls use logical coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying canvas call throws.
    fn resize(&mut self, size: &SurfaceSize) -> Result<(), ChromeError>;

    /// Erase the whole logical area.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying canvas call throws.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), ChromeError>;

    /// Paint one blob as an additive radial gradient disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying canvas call throws.
    fn paint_blob(&mut self, blob: &Blob) -> Result<(), ChromeError>;
}

/// Viewport, blob population and RNG, independent of any canvas.
pub struct BackdropCore {
    config: BlobConfig,
    rng: SmallRng,
    size: SurfaceSize,
    blobs: Vec<Blob>,
    frames: u64,
}

impl BackdropCore {
    #[must_use]
    pub fn new(config: BlobConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            size: SurfaceSize::new(0.0, 0.0, 1.0),
            blobs: Vec::new(),
            frames: 0,
        }
    }

    /// Record a new viewport. Existing blobs are left as they are until
    /// [`Self::regenerate`] runs.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> SurfaceSize {
        self.size = SurfaceSize::new(width, height, dpr);
        self.size
    }

    /// Discard every blob and draw a fresh population for the current viewport.
    pub fn regenerate(&mut self) {
        self.blobs = blob::populate(&mut self.rng, self.size.width, self.size.height, &self.config);
    }

    /// Clear, then paint and advance each blob in order.
    ///
    /// Every blob advances even if painting fails part way through.
    ///
    /// # Errors
    ///
    /// Returns the first surface error of the frame.
    pub fn frame(&mut self, surface: &mut impl BackdropSurface) -> Result<(), ChromeError> {
        let SurfaceSize { width, height, .. } = self.size;
        let mut outcome = surface.clear(width, height);
        for blob in &mut self.blobs {
            let painted = surface.paint_blob(blob);
            blob.step(width, height);
            if outcome.is_ok() {
                outcome = painted;
            }
        }
        self.frames += 1;
        outcome
    }

    /// The current population, in paint order.
    #[must_use]
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Geometry recorded by the last [`Self::set_viewport`].
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Frames drawn since construction.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// The background animator: a [`BackdropCore`] bound to its surface.
pub struct Backdrop<S> {
    surface: S,
    pub core: BackdropCore,
}

impl<S: BackdropSurface> Backdrop<S> {
    #[must_use]
    pub fn new(surface: S, config: BlobConfig, seed: u64) -> Self {
        Self { surface, core: BackdropCore::new(config, seed) }
    }

    /// Resize the surface, then regenerate the population for the new size.
    ///
    /// Regeneration happens even when the surface call fails, so the blob set
    /// always matches the recorded viewport.
    ///
    /// # Errors
    ///
    /// Returns the surface error, if any.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Result<(), ChromeError> {
        let size = self.core.set_viewport(width, height, dpr);
        let sized = self.surface.resize(&size);
        self.core.regenerate();
        log::debug!(
            "backdrop: {}x{} @{} -> {} blobs",
            size.width,
            size.height,
            size.dpr,
            self.core.blobs().len()
        );
        sized
    }

    /// Draw one frame and advance the simulation.
    ///
    /// # Errors
    ///
    /// Returns the first surface error of the frame.
    pub fn tick(&mut self) -> Result<(), ChromeError> {
        self.core.frame(&mut self.surface)
    }

    /// The surface blobs are painted onto.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
