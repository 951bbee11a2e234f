use std::sync::Mutex;

use crate::foundation::{core::AspectRatio, error::GazerResult};

/// Desktop side effects the batch runner needs, injected so runs stay testable headless.
pub trait DisplayEnvironment {
    /// Aspect ratio of the current screen.
    fn current_aspect_ratio(&self) -> GazerResult<AspectRatio>;

    /// Pause (`false`) or resume (`true`) the wallpaper slideshow.
    fn set_slideshow_enabled(&self, enabled: bool) -> GazerResult<()>;
}

/// Fixed screen ratio with no real slideshow; remembers every toggle it was asked for.
#[derive(Debug, Default)]
pub struct StaticDisplay {
    ratio: AspectRatio,
    toggles: Mutex<Vec<bool>>,
}

impl StaticDisplay {
    pub fn new(ratio: AspectRatio) -> Self {
        Self {
            ratio,
            toggles: Mutex::new(Vec::new()),
        }
    }

    pub fn slideshow_toggles(&self) -> Vec<bool> {
        self.toggles
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl DisplayEnvironment for StaticDisplay {
    fn current_aspect_ratio(&self) -> GazerResult<AspectRatio> {
        Ok(self.ratio)
    }

    fn set_slideshow_enabled(&self, enabled: bool) -> GazerResult<()> {
        if let Ok(mut t) = self.toggles.lock() {
            t.push(enabled);
        }
        Ok(())
    }
}
