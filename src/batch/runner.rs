use std::path::{Path, PathBuf};

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    assets::io::enumerate_directory,
    batch::{
        config::OverlayConfig,
        job::{JobContext, OverlayJob, overlay_file_name, overlay_prefix, run_overlay_job},
        ledger::{TempFileLedger, run_token_now},
        select::{Partition, select},
    },
    chart::renderer::ChartRenderer,
    display::environment::DisplayEnvironment,
    foundation::{
        core::AspectRatio,
        error::{GazerError, GazerResult},
    },
};

/// A wallpaper that could not be processed, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobFailure {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of a run: what was copied, what got the overlay and what was skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub copied: Vec<PathBuf>,
    pub overlaid: Vec<PathBuf>,
    pub failed: Vec<JobFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives a whole run: select, copy, overlay, with the display side effects around it.
pub struct BatchRunner<'a> {
    config: OverlayConfig,
    renderer: &'a dyn ChartRenderer,
    display: &'a dyn DisplayEnvironment,
    run_token: String,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        config: OverlayConfig,
        renderer: &'a dyn ChartRenderer,
        display: &'a dyn DisplayEnvironment,
    ) -> Self {
        Self {
            config,
            renderer,
            display,
            run_token: run_token_now(),
        }
    }

    /// Override the timestamp embedded in overlay file names.
    pub fn with_run_token(mut self, run_token: impl Into<String>) -> Self {
        self.run_token = run_token.into();
        self
    }

    /// Populate `output_dir` with one file per file in `source_dir`.
    ///
    /// Configuration problems fail before any file is touched; failures of individual
    /// wallpapers are collected in the report and never stop the run.
    #[tracing::instrument(skip(self), fields(run = %self.run_token))]
    pub fn run(&self, source_dir: &Path, output_dir: &Path) -> GazerResult<BatchReport> {
        self.config.validate()?;
        check_directories(source_dir, output_dir)?;
        let target_ratio = self.target_ratio()?;

        let files = enumerate_directory(source_dir).map_err(|e| {
            GazerError::config(format!("cannot list '{}': {e}", source_dir.display()))
        })?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let partition = select(&files, self.config.appearance_frequency_percent, &mut rng)?;
        if partition.is_empty() {
            tracing::info!(source = %source_dir.display(), "no wallpapers found, nothing to do");
            return Ok(BatchReport::default());
        }

        let ledger = TempFileLedger::with_run_token(
            self.config.temp_dir(),
            format!("{}-{}", self.run_token, std::process::id()),
        )?;

        self.toggle_slideshow(false);
        let report = self.process(&partition, output_dir, target_ratio, &ledger);
        self.toggle_slideshow(true);

        tracing::info!(
            copied = report.copied.len(),
            overlaid = report.overlaid.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }

    fn target_ratio(&self) -> GazerResult<AspectRatio> {
        if !self.config.auto_detect_target_ratio {
            return Ok(self.config.target_aspect_ratio);
        }
        let ratio = self.display.current_aspect_ratio()?;
        ratio.validate()?;
        tracing::info!(%ratio, "using display aspect ratio");
        Ok(ratio)
    }

    fn process(
        &self,
        partition: &Partition,
        output_dir: &Path,
        target_ratio: AspectRatio,
        ledger: &TempFileLedger,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        clear_stale_outputs(partition, output_dir);

        for source in &partition.passthrough {
            match copy_passthrough(source, output_dir) {
                Ok(dest) => report.copied.push(dest),
                Err(e) => report.failed.push(failure(source, e)),
            }
        }

        let jobs: Vec<OverlayJob> = partition
            .overlay
            .iter()
            .enumerate()
            .map(|(id, source)| OverlayJob {
                id: id as u64,
                background: source.clone(),
                output: output_dir.join(overlay_file_name(source, &self.run_token)),
            })
            .collect();
        let ctx = JobContext {
            config: &self.config,
            target_ratio,
            renderer: self.renderer,
            ledger,
        };

        let results: Vec<GazerResult<PathBuf>> = if self.config.parallel {
            jobs.par_iter().map(|job| run_overlay_job(job, &ctx)).collect()
        } else {
            jobs.iter().map(|job| run_overlay_job(job, &ctx)).collect()
        };

        for (job, result) in jobs.iter().zip(results) {
            match result {
                Ok(out) => report.overlaid.push(out),
                Err(e) => report.failed.push(failure(&job.background, e)),
            }
        }
        report
    }

    fn toggle_slideshow(&self, enabled: bool) {
        if !self.config.toggle_slideshow {
            return;
        }
        if let Err(e) = self.display.set_slideshow_enabled(enabled) {
            tracing::warn!(enabled, "slideshow toggle failed: {e}");
        }
    }
}

fn check_directories(source_dir: &Path, output_dir: &Path) -> GazerResult<()> {
    if !source_dir.is_dir() {
        return Err(GazerError::config(format!(
            "wallpaper directory '{}' does not exist",
            source_dir.display()
        )));
    }
    std::fs::create_dir_all(output_dir).map_err(|e| {
        GazerError::config(format!(
            "cannot create output directory '{}': {e}",
            output_dir.display()
        ))
    })?;
    let same = match (source_dir.canonicalize(), output_dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(GazerError::config(
            "output directory must differ from the wallpaper directory",
        ));
    }
    Ok(())
}

/// Remove what earlier runs left for these sources so the output keeps one file per input:
/// every previous overlay of a source, and the plain copy of a source overlaid this time.
fn clear_stale_outputs(partition: &Partition, output_dir: &Path) {
    let existing = match enumerate_directory(output_dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("cannot scan output directory for stale files: {e}");
            return;
        }
    };
    let prefixes: Vec<String> = partition
        .overlay
        .iter()
        .chain(&partition.passthrough)
        .map(|source| overlay_prefix(source))
        .collect();
    let overlaid: Vec<&std::ffi::OsStr> = partition
        .overlay
        .iter()
        .filter_map(|source| source.file_name())
        .collect();

    for path in existing {
        let Some(name) = path.file_name() else {
            continue;
        };
        let stale_overlay = prefixes
            .iter()
            .any(|prefix| name.to_string_lossy().starts_with(prefix.as_str()));
        if !stale_overlay && !overlaid.contains(&name) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed stale output"),
            Err(e) => tracing::warn!(path = %path.display(), "cannot remove stale output: {e}"),
        }
    }
}

fn copy_passthrough(source: &Path, output_dir: &Path) -> GazerResult<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| GazerError::input(format!("'{}' has no file name", source.display())))?;
    let dest = output_dir.join(name);
    std::fs::copy(source, &dest).map_err(|e| {
        GazerError::resource(format!(
            "copy '{}' to '{}': {e}",
            source.display(),
            dest.display()
        ))
    })?;
    Ok(dest)
}

fn failure(source: &Path, e: GazerError) -> JobFailure {
    tracing::warn!(source = %source.display(), "skipping wallpaper: {e}");
    JobFailure {
        source: source.to_path_buf(),
        error: e.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/runner.rs"]
mod tests;
