use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    batch::select::validate_frequency,
    foundation::{
        core::{AspectRatio, Dimensions},
        error::{GazerError, GazerResult},
    },
};

/// Parameters of one overlay run. Every field has a default, so a partial JSON file is fine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub target_aspect_ratio: AspectRatio,
    pub appearance_frequency_percent: f64,
    pub blur_radius_base: f64,
    pub base_resolution: f64,
    pub with_shadow_mask: bool,
    /// Take the target ratio from the display instead of `target_aspect_ratio`.
    pub auto_detect_target_ratio: bool,
    /// Render at this size centered on the background instead of fitting a frame.
    pub fixed_output_size: Option<Dimensions>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub temp_dir: Option<PathBuf>,
    pub toggle_slideshow: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            target_aspect_ratio: AspectRatio::default(),
            appearance_frequency_percent: 100.0,
            blur_radius_base: 2.0,
            base_resolution: 100.0,
            with_shadow_mask: true,
            auto_detect_target_ratio: false,
            fixed_output_size: None,
            seed: None,
            parallel: false,
            temp_dir: None,
            toggle_slideshow: true,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_path(path: &Path) -> GazerResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| GazerError::serde(format!("parse config '{}': {e}", path.display())))
    }

    /// Reject every caller-controlled parameter that would make jobs meaningless.
    pub fn validate(&self) -> GazerResult<()> {
        self.target_aspect_ratio.validate()?;
        validate_frequency(self.appearance_frequency_percent)?;
        if !self.blur_radius_base.is_finite() || self.blur_radius_base < 0.0 {
            return Err(GazerError::config(format!(
                "blur radius base must be >= 0, got {}",
                self.blur_radius_base
            )));
        }
        if !self.base_resolution.is_finite() || self.base_resolution <= 0.0 {
            return Err(GazerError::config(format!(
                "base resolution must be > 0, got {}",
                self.base_resolution
            )));
        }
        if let Some(size) = self.fixed_output_size {
            size.validate()?;
        }
        Ok(())
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/config.rs"]
mod tests;
