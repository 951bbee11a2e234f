use super::*;

#[test]
fn transparent_source_is_noop() {
    let dst = Rgb([10, 20, 30]);
    assert_eq!(paste_pixel(dst, Rgba([255, 255, 255, 0])), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let dst = Rgb([0, 0, 0]);
    assert_eq!(paste_pixel(dst, Rgba([255, 0, 0, 255])), Rgb([255, 0, 0]));
}

#[test]
fn half_alpha_blends_linearly() {
    let out = paste_pixel(Rgb([0, 0, 200]), Rgba([255, 255, 255, 128]));
    assert_eq!(out, Rgb([128, 128, 228]));
}

#[test]
fn opaque_rectangle_at_origin_reproduces_mask_inside_and_keeps_outside() {
    let bg_px = Rgb([12, 34, 56]);
    let mut bg = RgbImage::from_pixel(8, 6, bg_px);
    let mask = RgbaImage::from_pixel(5, 4, Rgba([255, 255, 255, 255]));
    let chart = RgbaImage::from_pixel(5, 4, Rgba([0, 0, 0, 0]));

    composite_layers(&mut bg, Some(&mask), &chart, Shift::ZERO);

    for (x, y, px) in bg.enumerate_pixels() {
        if x < 5 && y < 4 {
            assert_eq!(*px, Rgb([255, 255, 255]), "inside at {x},{y}");
        } else {
            assert_eq!(*px, bg_px, "outside at {x},{y}");
        }
    }
}

#[test]
fn chart_is_painted_after_shadow() {
    let mut bg = RgbImage::from_pixel(3, 1, Rgb([0, 0, 0]));
    let mask = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
    let mut chart = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 0, 0]));
    chart.put_pixel(1, 0, Rgba([255, 192, 203, 255]));

    composite_layers(&mut bg, Some(&mask), &chart, Shift::ZERO);

    assert_eq!(*bg.get_pixel(0, 0), Rgb([255, 255, 255]));
    assert_eq!(*bg.get_pixel(1, 0), Rgb([255, 192, 203]));
    assert_eq!(*bg.get_pixel(2, 0), Rgb([255, 255, 255]));
}

#[test]
fn paste_respects_shift_and_clips() {
    let mut bg = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
    let src = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));

    paste_with_alpha(&mut bg, &src, Shift::new(2, 3));

    assert_eq!(*bg.get_pixel(1, 3), Rgb([0, 0, 0]));
    assert_eq!(*bg.get_pixel(2, 3), Rgb([9, 9, 9]));
    assert_eq!(*bg.get_pixel(3, 3), Rgb([9, 9, 9]));
    assert_eq!(*bg.get_pixel(3, 2), Rgb([0, 0, 0]));

    paste_with_alpha(&mut bg, &src, Shift::new(4, 0));
}

#[test]
fn composite_writes_output_and_fails_on_missing_background() {
    let dir = tempfile::tempdir().unwrap();
    let bg_path = dir.path().join("bg.png");
    RgbImage::from_pixel(6, 4, Rgb([40, 40, 40]))
        .save(&bg_path)
        .unwrap();
    let chart = RgbaImage::from_pixel(2, 2, Rgba([250, 0, 0, 255]));
    let out = dir.path().join("out.png");

    let written = composite(&bg_path, None, &chart, Shift::new(1, 1), &out).unwrap();
    assert_eq!(written, out);
    let img = image::open(&out).unwrap().to_rgb8();
    assert_eq!(*img.get_pixel(1, 1), Rgb([250, 0, 0]));
    assert_eq!(*img.get_pixel(0, 0), Rgb([40, 40, 40]));

    let missing = dir.path().join("nope.png");
    assert!(composite(&missing, None, &chart, Shift::ZERO, &out).is_err());
}
