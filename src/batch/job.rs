use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::{
    assets::io::{has_image_extension, read_rgba, write_image},
    batch::{config::OverlayConfig, ledger::TempFileLedger},
    chart::renderer::ChartRenderer,
    effects::{composite::composite, shadow::build_mask},
    foundation::{
        core::{AspectRatio, Dimensions, Frame},
        error::{GazerError, GazerResult},
    },
    geometry::{
        fit::{center_fixed_frame, fit_frame},
        scale::{blur_radius_for_scale, resolve_scale},
    },
};

/// One background to overlay and where its result goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayJob {
    pub id: u64,
    pub background: PathBuf,
    pub output: PathBuf,
}

/// Read-only state shared by every job of a run.
pub struct JobContext<'a> {
    pub config: &'a OverlayConfig,
    pub target_ratio: AspectRatio,
    pub renderer: &'a dyn ChartRenderer,
    pub ledger: &'a TempFileLedger,
}

/// `{stem}-overlay-{token}.{ext}`; names without a writable image extension get `.png`.
pub fn overlay_file_name(source: &Path, run_token: &str) -> String {
    let prefix = overlay_prefix(source);
    match source.extension() {
        Some(ext) if has_image_extension(source) => {
            format!("{prefix}{run_token}.{}", ext.to_string_lossy())
        }
        _ => format!("{prefix}{run_token}.png"),
    }
}

/// Leading part shared by every overlay ever produced from `source`, whatever the run token.
pub fn overlay_prefix(source: &Path) -> String {
    let base = if has_image_extension(source) {
        source.file_stem()
    } else {
        source.file_name()
    };
    let base = base
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "wallpaper".to_string());
    format!("{base}-overlay-")
}

/// Frame the chart occupies on a background of `background` size.
pub fn plan_frame(
    background: Dimensions,
    target_ratio: AspectRatio,
    fixed_output_size: Option<Dimensions>,
) -> GazerResult<Frame> {
    match fixed_output_size {
        Some(size) => center_fixed_frame(background, size),
        None => fit_frame(background, target_ratio),
    }
}

/// Fit, render, mask and composite one background. Temp artifacts never outlive the call.
#[tracing::instrument(skip(ctx), fields(job = job.id, bg = %job.background.display()))]
pub fn run_overlay_job(job: &OverlayJob, ctx: &JobContext<'_>) -> GazerResult<PathBuf> {
    let (w, h) = image::image_dimensions(&job.background).map_err(|e| {
        GazerError::input(format!("read '{}': {e}", job.background.display()))
    })?;
    let background = Dimensions::new(w, h).map_err(|_| {
        GazerError::input(format!(
            "background '{}' is empty ({w}x{h})",
            job.background.display()
        ))
    })?;

    let frame = plan_frame(background, ctx.target_ratio, ctx.config.fixed_output_size)?;
    let scale = resolve_scale(background, frame.size, ctx.config.base_resolution)?;
    tracing::debug!(
        %background,
        frame = %frame.size,
        dx = frame.shift.dx,
        dy = frame.shift.dy,
        scale,
        "planned overlay"
    );

    let rendered = ctx.renderer.render_chart(frame.size, scale)?;
    if rendered.dimensions() != (frame.size.width, frame.size.height) {
        return Err(GazerError::render(format!(
            "renderer returned {}x{}, expected {}",
            rendered.width(),
            rendered.height(),
            frame.size
        )));
    }

    let artifact = ctx.ledger.allocate(job.id, "chart.png")?;
    write_image(&DynamicImage::ImageRgba8(rendered), artifact.path())?;
    let chart = read_rgba(artifact.path())?;
    artifact.release()?;

    let mask = if ctx.config.with_shadow_mask {
        let radius = blur_radius_for_scale(
            ctx.config.blur_radius_base,
            scale,
            ctx.config.base_resolution,
        );
        Some(build_mask(&chart, radius)?)
    } else {
        None
    };

    composite(&job.background, mask.as_ref(), &chart, frame.shift, &job.output)
}

#[cfg(test)]
#[path = "../../tests/unit/batch/job.rs"]
mod tests;
