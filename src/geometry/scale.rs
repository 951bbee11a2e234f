use crate::foundation::{
    core::Dimensions,
    error::{GazerError, GazerResult},
};

/// Render resolution for a chart that fills `frame` on `background`.
///
/// The mean of the per-axis ratios absorbs the rounding that fitting applied to one axis, then
/// `base_resolution` (the "100%" unit) turns it into a resolution for the renderer.
pub fn resolve_scale(
    background: Dimensions,
    frame: Dimensions,
    base_resolution: f64,
) -> GazerResult<f64> {
    background.validate()?;
    frame.validate()?;
    if !base_resolution.is_finite() || base_resolution <= 0.0 {
        return Err(GazerError::config(format!(
            "base resolution must be > 0, got {base_resolution}"
        )));
    }

    let rx = f64::from(background.width) / f64::from(frame.width);
    let ry = f64::from(background.height) / f64::from(frame.height);
    Ok(0.5 * (rx + ry) * base_resolution)
}

/// Gaussian radius for the shadow mask at a given render scale.
pub fn blur_radius_for_scale(blur_radius_base: f64, scale: f64, base_resolution: f64) -> f64 {
    if base_resolution <= 0.0 {
        return 0.0;
    }
    (blur_radius_base * scale / base_resolution).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scale.rs"]
mod tests;
