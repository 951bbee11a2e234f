use image::{Rgba, RgbaImage};

use crate::{effects::blur::gaussian_blur_u8, foundation::error::GazerResult};

/// Colour of the backing plate; only the alpha channel varies across a mask.
pub const SHADOW_RGB: [u8; 3] = [255, 255, 255];

/// Whether a chart pixel counts as drawn content. Any non-zero alpha does, colour is ignored.
pub fn is_content(px: &Rgba<u8>) -> bool {
    px[3] != 0
}

/// Soft backing plate for `chart`: content becomes opaque white, the rest transparent white,
/// and the alpha plane is blurred with a Gaussian of `blur_radius`.
///
/// The result has the chart's dimensions. A chart with no content yields a fully transparent
/// mask.
#[tracing::instrument(skip(chart), fields(w = chart.width(), h = chart.height()))]
pub fn build_mask(chart: &RgbaImage, blur_radius: f64) -> GazerResult<RgbaImage> {
    let (width, height) = chart.dimensions();

    let mut any_content = false;
    let coverage: Vec<u8> = chart
        .pixels()
        .map(|px| {
            if is_content(px) {
                any_content = true;
                255
            } else {
                0
            }
        })
        .collect();

    let alpha = if any_content {
        gaussian_blur_u8(&coverage, width, height, 1, blur_radius)?
    } else {
        coverage
    };

    let [r, g, b] = SHADOW_RGB;
    let mut mask = RgbaImage::new(width, height);
    for (px, a) in mask.pixels_mut().zip(alpha) {
        *px = Rgba([r, g, b, a]);
    }
    Ok(mask)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
