#![allow(clippy::float_cmp)]

use super::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Resize(SurfaceSize),
    Clear(f64, f64),
    Paint { x: f64, y: f64, r: f64 },
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
    fail_paints: bool,
}

impl RecordingSurface {
    fn paints(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Paint { .. })).count()
    }
}

impl BackdropSurface for RecordingSurface {
    fn resize(&mut self, size: &SurfaceSize) -> Result<(), ChromeError> {
        self.calls.push(Call::Resize(*size));
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), ChromeError> {
        self.calls.push(Call::Clear(width, height));
        Ok(())
    }

    fn paint_blob(&mut self, blob: &Blob) -> Result<(), ChromeError> {
        self.calls.push(Call::Paint { x: blob.x, y: blob.y, r: blob.r });
        if self.fail_paints {
            return Err(ChromeError::Js("InvalidStateError".into()));
        }
        Ok(())
    }
}

fn backdrop(width: f64, height: f64) -> Backdrop<RecordingSurface> {
    let mut backdrop = Backdrop::new(RecordingSurface::default(), BlobConfig::default(), 7);
    backdrop.resize(width, height, 1.0).unwrap();
    backdrop
}

// =============================================================
// SurfaceSize
// =============================================================

#[test]
fn backing_store_scales_by_density() {
    let size = SurfaceSize::new(375.0, 667.0, 2.0);
    assert_eq!((size.backing_width, size.backing_height), (750, 1334));
    assert_eq!((size.width, size.height), (375.0, 667.0));
}

#[test]
fn fractional_density_floors_backing_store() {
    let size = SurfaceSize::new(333.0, 100.0, 1.5);
    assert_eq!((size.backing_width, size.backing_height), (499, 150));
}

#[test]
fn invalid_density_falls_back_to_one() {
    for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let size = SurfaceSize::new(800.0, 600.0, dpr);
        assert_eq!(size.dpr, 1.0);
        assert_eq!(size.backing_width, 800);
    }
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_sizes_surface_then_populates() {
    let backdrop = backdrop(600.0, 800.0);
    assert_eq!(backdrop.surface().calls, vec![Call::Resize(SurfaceSize::new(600.0, 800.0, 1.0))]);
    assert_eq!(backdrop.core.blobs().len(), 10);
}

#[test]
fn resize_discards_old_population() {
    let mut backdrop = backdrop(600.0, 800.0);
    let before = backdrop.core.blobs().to_vec();
    backdrop.resize(1920.0, 1080.0, 2.0).unwrap();
    assert_eq!(backdrop.core.blobs().len(), 18);
    assert_ne!(backdrop.core.blobs()[..10], before[..]);
    assert!(backdrop.core.blobs().iter().all(|b| b.x <= 1920.0 && b.y <= 1080.0));
}

#[test]
fn frame_between_viewport_change_and_regeneration_is_safe() {
    let mut core = BackdropCore::new(BlobConfig::default(), 3);
    core.set_viewport(1600.0, 1200.0, 1.0);
    core.regenerate();
    core.set_viewport(200.0, 150.0, 1.0);
    let mut surface = RecordingSurface::default();
    core.frame(&mut surface).unwrap();
    for blob in core.blobs() {
        assert!(blob.x >= -blob.r && blob.x <= 200.0 + blob.r);
        assert!(blob.y >= -blob.r && blob.y <= 150.0 + blob.r);
    }
}

#[test]
fn frame_before_any_resize_only_clears() {
    let mut core = BackdropCore::new(BlobConfig::default(), 1);
    let mut surface = RecordingSurface::default();
    core.frame(&mut surface).unwrap();
    assert_eq!(surface.calls, vec![Call::Clear(0.0, 0.0)]);
}

// =============================================================
// Frames
// =============================================================

#[test]
fn frame_clears_then_paints_every_blob() {
    let mut backdrop = backdrop(600.0, 800.0);
    backdrop.tick().unwrap();
    let calls = &backdrop.surface().calls;
    assert_eq!(calls[1], Call::Clear(600.0, 800.0));
    assert_eq!(backdrop.surface().paints(), 10);
    assert_eq!(calls.len(), 12);
}

#[test]
fn blobs_are_painted_before_moving() {
    let mut backdrop = backdrop(600.0, 800.0);
    let first = backdrop.core.blobs()[0].clone();
    backdrop.tick().unwrap();
    assert_eq!(backdrop.surface().calls[2], Call::Paint { x: first.x, y: first.y, r: first.r });
    let moved = &backdrop.core.blobs()[0];
    assert_eq!(moved.x, blob::wrap(first.x + first.dx, first.r, 600.0));
}

#[test]
fn radius_and_velocity_are_fixed_across_frames() {
    let mut backdrop = backdrop(600.0, 800.0);
    let before = backdrop.core.blobs().to_vec();
    for _ in 0..250 {
        backdrop.tick().unwrap();
    }
    for (a, b) in before.iter().zip(backdrop.core.blobs()) {
        assert_eq!((a.r, a.dx, a.dy, a.c1, a.c2), (b.r, b.dx, b.dy, b.c1, b.c2));
    }
    assert_eq!(backdrop.core.frames(), 250);
}

#[test]
fn paint_failure_is_reported_but_every_blob_moves() {
    let mut core = BackdropCore::new(BlobConfig::default(), 11);
    core.set_viewport(600.0, 800.0, 1.0);
    core.regenerate();
    let before = core.blobs().to_vec();
    let mut surface = RecordingSurface { fail_paints: true, ..RecordingSurface::default() };
    assert!(core.frame(&mut surface).is_err());
    assert_eq!(surface.paints(), 10);
    for (a, b) in before.iter().zip(core.blobs()) {
        assert_eq!(b.x, blob::wrap(a.x + a.dx, a.r, 600.0));
    }
}
