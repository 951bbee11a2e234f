use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::{
    assets::io::{read_background, write_image},
    foundation::{core::Shift, error::GazerResult, math::mul_div255_u8},
};

/// Paste one straight-alpha pixel onto an opaque one: `src * a + dst * (1 - a)`.
pub fn paste_pixel(dst: Rgb<u8>, src: Rgba<u8>) -> Rgb<u8> {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return Rgb([src[0], src[1], src[2]]);
    }
    let inv = 255 - a;
    let mut out = [0u8; 3];
    for (i, o) in out.iter_mut().enumerate() {
        let s = mul_div255_u8(u16::from(src[i]), a);
        let d = mul_div255_u8(u16::from(dst[i]), inv);
        *o = s.saturating_add(d);
    }
    Rgb(out)
}

/// Paste `src` onto `dst` at `shift`, using `src`'s own alpha as the paste mask.
///
/// Parts of `src` that fall outside `dst` are clipped.
pub fn paste_with_alpha(dst: &mut RgbImage, src: &RgbaImage, shift: Shift) {
    let (dw, dh) = dst.dimensions();
    if shift.dx >= dw || shift.dy >= dh {
        return;
    }
    let w = src.width().min(dw - shift.dx);
    let h = src.height().min(dh - shift.dy);
    for y in 0..h {
        for x in 0..w {
            let s = *src.get_pixel(x, y);
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel_mut(x + shift.dx, y + shift.dy);
            *d = paste_pixel(*d, s);
        }
    }
}

/// Layer the optional shadow mask and then the chart onto `background` at `shift`.
///
/// The chart always goes last so its opaque pixels override the shadow and its transparent
/// pixels let the softened shadow tone through.
pub fn composite_layers(
    background: &mut RgbImage,
    mask: Option<&RgbaImage>,
    chart: &RgbaImage,
    shift: Shift,
) {
    if let Some(mask) = mask {
        paste_with_alpha(background, mask, shift);
    }
    paste_with_alpha(background, chart, shift);
}

/// Open `background_path`, composite the layers and persist the result to `output_path`.
#[tracing::instrument(skip(mask, chart), fields(bg = %background_path.display()))]
pub fn composite(
    background_path: &Path,
    mask: Option<&RgbaImage>,
    chart: &RgbaImage,
    shift: Shift,
    output_path: &Path,
) -> GazerResult<PathBuf> {
    let mut background = read_background(background_path)?;
    composite_layers(&mut background, mask, chart, shift);
    write_image(&DynamicImage::ImageRgb8(background), output_path)?;
    tracing::debug!(out = %output_path.display(), "composited overlay");
    Ok(output_path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
