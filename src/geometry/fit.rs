use std::cmp::Ordering;

use crate::foundation::{
    core::{AspectRatio, Dimensions, Frame, Shift},
    error::{GazerError, GazerResult},
    math::round_half_down_u32,
};

/// Largest centered frame of `target` aspect ratio that fits inside `background`.
///
/// - matching ratios: the whole background, shift `(0, 0)`
/// - wider background: full height, centered horizontally
/// - taller background: full width, centered vertically
pub fn fit_frame(background: Dimensions, target: AspectRatio) -> GazerResult<Frame> {
    background.validate()?;
    target.validate()?;

    let bg_w = f64::from(background.width);
    let bg_h = f64::from(background.height);

    let frame = match background.aspect_ratio().compare(target) {
        Ordering::Equal => Frame {
            size: background,
            shift: Shift::ZERO,
        },
        Ordering::Greater => {
            let width = round_half_down_u32(target.width_for_height(bg_h))
                .clamp(1, background.width);
            Frame {
                size: Dimensions {
                    width,
                    height: background.height,
                },
                shift: Shift::new(center_offset(background.width, width), 0),
            }
        }
        Ordering::Less => {
            let height = round_half_down_u32(target.height_for_width(bg_w))
                .clamp(1, background.height);
            Frame {
                size: Dimensions {
                    width: background.width,
                    height,
                },
                shift: Shift::new(0, center_offset(background.height, height)),
            }
        }
    };

    debug_assert!(frame.fits_within(background));
    Ok(frame)
}

/// Frame of a caller-fixed size centered in `background`, bypassing ratio fitting.
pub fn center_fixed_frame(background: Dimensions, size: Dimensions) -> GazerResult<Frame> {
    background.validate()?;
    size.validate()?;
    if !background.contains(size) {
        return Err(GazerError::input(format!(
            "fixed output size {size} does not fit background {background}"
        )));
    }
    Ok(Frame {
        size,
        shift: Shift::new(
            center_offset(background.width, size.width),
            center_offset(background.height, size.height),
        ),
    })
}

fn center_offset(outer: u32, inner: u32) -> u32 {
    round_half_down_u32(0.5 * f64::from(outer.saturating_sub(inner)))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
