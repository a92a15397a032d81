//! Canvas 2D drawing for the background blobs.
//!
//! This module is the only place that touches [`CanvasRenderingContext2d`].
//! All fallible calls propagate through [`ChromeError`]; the animation loop
//! decides what to do with a failed frame.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::backdrop::{BackdropSurface, SurfaceSize};
use crate::blob::Blob;
use crate::error::ChromeError;

/// Offset of the `c2` stop between the center and the transparent rim.
const MID_STOP: f32 = 0.5;

/// Additive blending so overlapping blobs brighten.
const BLEND_MODE: &str = "lighter";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to `canvas` and obtain its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::ContextUnavailable`] when the browser has no 2D
    /// context for this element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, ChromeError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(ChromeError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChromeError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl BackdropSurface for CanvasSurface {
    fn resize(&mut self, size: &SurfaceSize) -> Result<(), ChromeError> {
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", size.width))?;
        style.set_property("height", &format!("{}px", size.height))?;
        self.canvas.set_width(size.backing_width);
        self.canvas.set_height(size.backing_height);
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.scale(size.dpr, size.dpr)?;
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), ChromeError> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn paint_blob(&mut self, blob: &Blob) -> Result<(), ChromeError> {
        let gradient = self
            .ctx
            .create_radial_gradient(blob.x, blob.y, 0.0, blob.x, blob.y, blob.r)?;
        gradient.add_color_stop(0.0, &blob.c1.to_string())?;
        gradient.add_color_stop(MID_STOP, &blob.c2.to_string())?;
        gradient.add_color_stop(1.0, &blob.c2.with_alpha(0.0))?;

        self.ctx.set_global_composite_operation(BLEND_MODE)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx.arc(blob.x, blob.y, blob.r, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }
}
