use super::*;

#[test]
fn transparent_chart_yields_transparent_mask() {
    let chart = RgbaImage::from_pixel(17, 9, Rgba([0, 0, 0, 0]));
    let mask = build_mask(&chart, 3.0).unwrap();
    assert_eq!(mask.dimensions(), (17, 9));
    assert!(mask.pixels().all(|px| px[3] == 0));
    assert!(mask.pixels().all(|px| px[0] == 255 && px[1] == 255 && px[2] == 255));
}

#[test]
fn radius_0_is_binary_alpha_coverage() {
    let mut chart = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
    chart.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
    chart.put_pixel(2, 3, Rgba([200, 10, 10, 1]));
    chart.put_pixel(3, 0, Rgba([255, 255, 255, 0]));

    let mask = build_mask(&chart, 0.0).unwrap();

    assert_eq!(*mask.get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    assert_eq!(*mask.get_pixel(2, 3), Rgba([255, 255, 255, 255]));
    assert_eq!(*mask.get_pixel(3, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*mask.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
}

#[test]
fn blurred_mask_has_soft_halo_around_content() {
    let mut chart = RgbaImage::from_pixel(21, 21, Rgba([0, 0, 0, 0]));
    for y in 8..13 {
        for x in 8..13 {
            chart.put_pixel(x, y, Rgba([255, 192, 203, 255]));
        }
    }

    let mask = build_mask(&chart, 2.0).unwrap();

    let center = mask.get_pixel(10, 10)[3];
    let edge = mask.get_pixel(6, 10)[3];
    let far = mask.get_pixel(0, 0)[3];
    assert!(center > edge, "center {center} edge {edge}");
    assert!(edge > 0, "halo should extend past the content");
    assert_eq!(far, 0);
}

#[test]
fn negative_radius_is_rejected() {
    let chart = RgbaImage::from_pixel(2, 2, Rgba([1, 1, 1, 255]));
    assert!(build_mask(&chart, -1.0).is_err());
}
