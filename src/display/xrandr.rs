use std::process::{Command, Stdio};

use crate::{
    display::environment::DisplayEnvironment,
    foundation::{
        core::{AspectRatio, Dimensions},
        error::{GazerError, GazerResult},
    },
};

/// X11 display queried through `xrandr`; slideshow toggles run user-supplied commands.
#[derive(Clone, Debug, Default)]
pub struct XrandrDisplay {
    pub enable_cmd: Option<Vec<String>>,
    pub disable_cmd: Option<Vec<String>>,
}

impl XrandrDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slideshow_commands(
        mut self,
        enable_cmd: Option<Vec<String>>,
        disable_cmd: Option<Vec<String>>,
    ) -> Self {
        self.enable_cmd = enable_cmd;
        self.disable_cmd = disable_cmd;
        self
    }
}

impl DisplayEnvironment for XrandrDisplay {
    fn current_aspect_ratio(&self) -> GazerResult<AspectRatio> {
        let out = Command::new("xrandr")
            .arg("--current")
            .stderr(Stdio::null())
            .output()
            .map_err(|e| GazerError::config(format!("cannot run xrandr: {e}")))?;
        if !out.status.success() {
            return Err(GazerError::config(format!(
                "xrandr exited with {}",
                out.status
            )));
        }
        let screen = parse_current_screen(&String::from_utf8_lossy(&out.stdout))?;
        tracing::debug!(%screen, "detected screen size");
        Ok(screen.aspect_ratio())
    }

    fn set_slideshow_enabled(&self, enabled: bool) -> GazerResult<()> {
        let cmd = if enabled {
            &self.enable_cmd
        } else {
            &self.disable_cmd
        };
        let Some((program, args)) = cmd.as_deref().and_then(|c| c.split_first()) else {
            tracing::debug!(enabled, "no slideshow command configured");
            return Ok(());
        };

        let status = Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .status()
            .map_err(|e| GazerError::resource(format!("run '{program}': {e}")))?;
        if !status.success() {
            return Err(GazerError::resource(format!(
                "slideshow command '{program}' exited with {status}"
            )));
        }
        Ok(())
    }
}

/// Extract the `current W x H` screen size from `xrandr --current` output.
pub fn parse_current_screen(output: &str) -> GazerResult<Dimensions> {
    let not_found = || GazerError::config("xrandr output has no current screen size");
    let line = output
        .lines()
        .find(|l| l.starts_with("Screen "))
        .ok_or_else(not_found)?;
    let rest = line.split("current").nth(1).ok_or_else(not_found)?;
    let geometry = rest.split(',').next().ok_or_else(not_found)?;
    let (w, h) = geometry.split_once('x').ok_or_else(not_found)?;
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|_| not_found());
    Dimensions::new(parse(w)?, parse(h)?)
}

#[cfg(test)]
#[path = "../../tests/unit/display/xrandr.rs"]
mod tests;
