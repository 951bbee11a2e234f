use super::*;

#[test]
fn dimensions_reject_zero_sides() {
    assert!(Dimensions::new(0, 10).is_err());
    assert!(Dimensions::new(10, 0).is_err());
    assert!(Dimensions::new(1, 1).is_ok());
}

#[test]
fn aspect_ratio_rejects_non_positive_and_nan() {
    assert!(AspectRatio::new(0.0, 9.0).is_err());
    assert!(AspectRatio::new(16.0, -1.0).is_err());
    assert!(AspectRatio::new(f64::NAN, 1.0).is_err());
    assert!(AspectRatio::new(16.0, 9.0).is_ok());
}

#[test]
fn aspect_ratio_parses_common_spellings() {
    let r: AspectRatio = "16:9".parse().unwrap();
    assert_eq!((r.width, r.height), (16.0, 9.0));
    let r: AspectRatio = "21x9".parse().unwrap();
    assert_eq!((r.width, r.height), (21.0, 9.0));
    let r: AspectRatio = "1.6".parse().unwrap();
    assert!((r.as_f64() - 1.6).abs() < 1e-12);
    assert!("wide".parse::<AspectRatio>().is_err());
    assert!("0:9".parse::<AspectRatio>().is_err());
}

#[test]
fn compare_is_tolerant_to_equivalent_ratios() {
    let target = AspectRatio::default();
    assert_eq!(
        Dimensions::new(1920, 1080).unwrap().aspect_ratio().compare(target),
        Ordering::Equal
    );
    assert_eq!(
        Dimensions::new(3840, 1200).unwrap().aspect_ratio().compare(target),
        Ordering::Greater
    );
    assert_eq!(
        Dimensions::new(1080, 1920).unwrap().aspect_ratio().compare(target),
        Ordering::Less
    );
}

#[test]
fn derived_lengths_multiply_before_dividing() {
    let r = AspectRatio::default();
    assert_eq!(r.height_for_width(1080.0), 607.5);
    assert_eq!(r.width_for_height(1080.0), 1920.0);
}

#[test]
fn frame_fits_within_checks_both_axes() {
    let bg = Dimensions::new(100, 50).unwrap();
    let frame = Frame {
        size: Dimensions::new(80, 50).unwrap(),
        shift: Shift::new(20, 0),
    };
    assert!(frame.fits_within(bg));
    let frame = Frame {
        shift: Shift::new(21, 0),
        ..frame
    };
    assert!(!frame.fits_within(bg));
}
