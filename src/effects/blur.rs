use rayon::prelude::*;

use crate::foundation::error::{GazerError, GazerResult};

/// Separable Gaussian blur over an interleaved 8-bit buffer with `channels` per pixel.
///
/// `sigma` is the Gaussian radius; the discrete kernel spans `ceil(3 * sigma)` pixels on each
/// side, capped at the larger image side since further taps only repeat the clamped edge.
/// Edges clamp. `sigma == 0` returns the input unchanged.
pub fn gaussian_blur_u8(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    sigma: f64,
) -> GazerResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| GazerError::resource("blur buffer size overflow"))?;
    if channels == 0 || src.len() != expected_len {
        return Err(GazerError::render(
            "gaussian_blur_u8 expects src matching width*height*channels",
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(GazerError::config(format!(
            "blur radius must be >= 0, got {sigma}"
        )));
    }

    let max_radius = f64::from(width.max(height));
    let radius = (3.0 * sigma).ceil().min(max_radius) as u32;
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, channels, &kernel);
    vertical_pass(&tmp, &mut out, width, height, channels, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> GazerResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(GazerError::config("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(GazerError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold the quantization residue into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, channels: usize, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as i64;
    let row_len = width as usize * channels;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(dst_row, src_row)| {
            let mut acc = vec![0u64; channels];
            for x in 0..w {
                acc.iter_mut().for_each(|a| *a = 0);
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i64 - radius).clamp(0, w - 1) as usize;
                    let idx = sx * channels;
                    for c in 0..channels {
                        acc[c] += u64::from(kw) * u64::from(src_row[idx + c]);
                    }
                }
                let out_idx = x as usize * channels;
                for c in 0..channels {
                    dst_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(
    src: &[u8],
    dst: &mut [u8],
    width: u32,
    height: u32,
    channels: usize,
    k: &[u32],
) {
    let radius = (k.len() / 2) as i64;
    let h = height as i64;
    let row_len = width as usize * channels;
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y = y as i64;
            let mut acc = vec![0u64; row_len];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1) as usize;
                let src_row = &src[sy * row_len..(sy + 1) * row_len];
                for (a, &s) in acc.iter_mut().zip(src_row) {
                    *a += u64::from(kw) * u64::from(s);
                }
            }
            for (d, a) in dst_row.iter_mut().zip(acc) {
                *d = q16_to_u8(a);
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
