use std::{cmp::Ordering, fmt, str::FromStr};

use crate::foundation::error::{GazerError, GazerResult};

/// Relative tolerance used when deciding whether two aspect ratios are the same.
pub const ASPECT_TOLERANCE: f64 = 1e-9;

/// Pixel size of an image or frame. Both sides are > 0 once validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> GazerResult<Self> {
        let d = Self { width, height };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(self) -> GazerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GazerError::config(format!(
                "dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The aspect ratio derived from these dimensions; never cached separately.
    pub fn aspect_ratio(self) -> AspectRatio {
        AspectRatio {
            width: f64::from(self.width),
            height: f64::from(self.height),
        }
    }

    pub fn contains(self, other: Dimensions) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Width:height ratio kept as its two defining numbers (`16:9` stays `16` and `9`).
///
/// Lengths derived from a ratio multiply before dividing, so `1080 * 9 / 16` lands exactly on
/// `607.5` instead of drifting through a pre-divided `1.777...`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> GazerResult<Self> {
        let r = Self { width, height };
        r.validate()?;
        Ok(r)
    }

    pub fn validate(self) -> GazerResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(GazerError::config("aspect ratio must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GazerError::config(format!(
                "aspect ratio must be > 0, got {}:{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn as_f64(self) -> f64 {
        self.width / self.height
    }

    /// Length along x matching `height` at this ratio.
    pub fn width_for_height(self, height: f64) -> f64 {
        height * self.width / self.height
    }

    /// Length along y matching `width` at this ratio.
    pub fn height_for_width(self, width: f64) -> f64 {
        width * self.height / self.width
    }

    /// Compare two ratios, treating values within [`ASPECT_TOLERANCE`] (relative) as equal.
    ///
    /// `Greater` means `self` is wider than `other`.
    pub fn compare(self, other: AspectRatio) -> Ordering {
        // a/b vs c/d  <=>  a*d vs c*b, both denominators positive.
        let lhs = self.width * other.height;
        let rhs = other.width * self.height;
        let scale = lhs.abs().max(rhs.abs());
        if (lhs - rhs).abs() <= ASPECT_TOLERANCE * scale {
            Ordering::Equal
        } else if lhs > rhs {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = GazerError;

    /// Accepts `W:H`, `WxH` or a single decimal ratio such as `1.6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| GazerError::config(format!("invalid aspect ratio '{s}'")))
        };
        match s.split_once([':', 'x', '/']) {
            Some((w, h)) => Self::new(parse(w)?, parse(h)?),
            None => Self::new(parse(s)?, 1.0),
        }
    }
}

/// Top-left pixel offset of an overlay on its background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shift {
    pub dx: u32,
    pub dy: u32,
}

impl Shift {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub fn new(dx: u32, dy: u32) -> Self {
        Self { dx, dy }
    }
}

/// Region of a background an overlay occupies: its size and its centering shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub size: Dimensions,
    pub shift: Shift,
}

impl Frame {
    /// Whether the frame, placed at its shift, stays inside `background`.
    pub fn fits_within(self, background: Dimensions) -> bool {
        u64::from(self.shift.dx) + u64::from(self.size.width) <= u64::from(background.width)
            && u64::from(self.shift.dy) + u64::from(self.size.height)
                <= u64::from(background.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
