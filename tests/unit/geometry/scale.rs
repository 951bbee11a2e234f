use super::*;
use crate::{foundation::core::AspectRatio, geometry::fit::fit_frame};

fn dims(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h).unwrap()
}

#[test]
fn perfect_fit_is_base_resolution() {
    let scale = resolve_scale(dims(1920, 1080), dims(1920, 1080), 100.0).unwrap();
    assert_eq!(scale, 100.0);
}

#[test]
fn scale_averages_axis_ratios() {
    let bg = dims(3840, 1200);
    let frame = fit_frame(bg, AspectRatio::default()).unwrap();
    let scale = resolve_scale(bg, frame.size, 100.0).unwrap();
    let expected = 0.5 * (3840.0 / 2133.0 + 1.0) * 100.0;
    assert!((scale - expected).abs() < 1e-9);
    assert!(scale > 100.0);
}

#[test]
fn rejects_non_positive_base_resolution() {
    assert!(matches!(
        resolve_scale(dims(10, 10), dims(10, 10), 0.0),
        Err(GazerError::Config(_))
    ));
    assert!(resolve_scale(dims(10, 10), dims(10, 10), f64::NAN).is_err());
}

#[test]
fn blur_radius_tracks_scale() {
    assert_eq!(blur_radius_for_scale(2.0, 100.0, 100.0), 2.0);
    assert_eq!(blur_radius_for_scale(2.0, 250.0, 100.0), 5.0);
    assert_eq!(blur_radius_for_scale(0.0, 250.0, 100.0), 0.0);
}
