#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

fn still(x: f64, y: f64, r: f64) -> Blob {
    let color = Hsl { hue: 270.0, saturation: 80.0, lightness: 60.0 };
    Blob { x, y, r, dx: 0.0, dy: 0.0, c1: color, c2: color }
}

// =============================================================
// Counting
// =============================================================

#[test]
fn count_for_600_by_800_is_ten() {
    assert_eq!(blob_count(600.0, 800.0, &BlobConfig::default()), 10);
}

#[test]
fn count_scales_with_shorter_side() {
    let config = BlobConfig::default();
    assert_eq!(blob_count(1920.0, 1080.0, &config), 18);
    assert_eq!(blob_count(3000.0, 2000.0, &config), 33);
}

#[test]
fn count_rounds_half_up() {
    assert_eq!(blob_count(690.0, 2000.0, &BlobConfig::default()), 12);
    assert_eq!(blob_count(689.0, 2000.0, &BlobConfig::default()), 11);
}

#[test]
fn count_never_drops_below_minimum() {
    let config = BlobConfig::default();
    assert_eq!(blob_count(320.0, 568.0, &config), 10);
    assert_eq!(blob_count(0.0, 0.0, &config), 10);
    assert_eq!(blob_count(-50.0, 400.0, &config), 10);
}

// =============================================================
// Generation
// =============================================================

#[test]
fn generated_blobs_respect_configured_ranges() {
    let config = BlobConfig::default();
    let mut rng = rng();
    for blob in populate(&mut rng, 1280.0, 720.0, &config) {
        assert!((0.0..=1280.0).contains(&blob.x));
        assert!((0.0..=720.0).contains(&blob.y));
        assert!(config.radius.contains(blob.r));
        assert!(blob.dx.abs() <= config.speed);
        assert!(blob.dy.abs() <= config.speed);
        assert!(config.inner_hue.contains(blob.c1.hue));
        assert!(config.outer_hue.contains(blob.c2.hue));
        assert_eq!(blob.c1.saturation, 80.0);
        assert_eq!(blob.c2.lightness, 60.0);
    }
}

#[test]
fn populate_matches_count() {
    let config = BlobConfig::default();
    assert_eq!(populate(&mut rng(), 1920.0, 1080.0, &config).len(), 18);
}

#[test]
fn zero_sized_viewport_does_not_panic() {
    let blobs = populate(&mut rng(), 0.0, 0.0, &BlobConfig::default());
    assert!(blobs.iter().all(|b| b.x == 0.0 && b.y == 0.0));
}

#[test]
fn same_seed_same_population() {
    let config = BlobConfig::default();
    assert_eq!(populate(&mut rng(), 800.0, 600.0, &config), populate(&mut rng(), 800.0, 600.0, &config));
}

// =============================================================
// Motion
// =============================================================

#[test]
fn step_advances_by_velocity() {
    let mut blob = still(100.0, 100.0, 50.0);
    blob.dx = 0.5;
    blob.dy = -0.25;
    blob.step(800.0, 600.0);
    assert_eq!((blob.x, blob.y), (100.5, 99.75));
}

#[test]
fn leaving_left_edge_reenters_right() {
    let mut blob = still(-50.0, 10.0, 50.0);
    blob.dx = -0.5;
    blob.step(800.0, 600.0);
    assert_eq!(blob.x, 850.0);
    assert_eq!(blob.y, 10.0);
}

#[test]
fn leaving_bottom_edge_reenters_top() {
    let mut blob = still(10.0, 640.0, 40.0);
    blob.dy = 0.6;
    blob.step(800.0, 600.0);
    assert_eq!(blob.y, -40.0);
}

#[test]
fn wrap_keeps_in_range_values() {
    assert_eq!(wrap(-40.0, 40.0, 100.0), -40.0);
    assert_eq!(wrap(140.0, 40.0, 100.0), 140.0);
    assert_eq!(wrap(-40.1, 40.0, 100.0), 140.0);
    assert_eq!(wrap(140.1, 40.0, 100.0), -40.0);
}

#[test]
fn positions_stay_in_bounds_over_many_frames() {
    let config = BlobConfig::default();
    let (w, h) = (600.0, 800.0);
    let mut blobs = populate(&mut rng(), w, h, &config);
    for _ in 0..5_000 {
        for blob in &mut blobs {
            blob.step(w, h);
            assert!(blob.x >= -blob.r && blob.x <= w + blob.r);
            assert!(blob.y >= -blob.r && blob.y <= h + blob.r);
        }
    }
}

// =============================================================
// Colors
// =============================================================

#[test]
fn hsl_formats_as_css() {
    let color = Hsl { hue: 270.5, saturation: 80.0, lightness: 60.0 };
    assert_eq!(color.to_string(), "hsl(270.5, 80%, 60%)");
    assert_eq!(color.with_alpha(0.0), "hsla(270.5, 80%, 60%, 0)");
}
