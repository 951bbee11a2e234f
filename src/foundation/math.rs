/// Round to the nearest integer, resolving exact halves downwards (`853.5 -> 853`).
///
/// Centering offsets and fitted lengths all go through this so a frame never grows past the
/// half-pixel it was computed from.
pub(crate) fn round_half_down(v: f64) -> f64 {
    (v - 0.5).ceil()
}

pub(crate) fn round_half_down_u32(v: f64) -> u32 {
    round_half_down(v).clamp(0.0, f64::from(u32::MAX)) as u32
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
