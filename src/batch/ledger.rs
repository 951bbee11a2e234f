use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::foundation::error::{GazerError, GazerResult};

const TEMP_PREFIX: &str = ".weight-gazer";

/// Millisecond local timestamp used to tell runs (and their artifacts) apart.
pub fn run_token_now() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S%3f").to_string()
}

/// Hands out collision-free temp files inside one working directory.
///
/// Names embed the run token and the owning job id for diagnostics; uniqueness comes from
/// exclusive creation, so ledgers sharing a directory and a token never hand out one path twice.
#[derive(Debug)]
pub struct TempFileLedger {
    dir: PathBuf,
    run_token: String,
}

impl TempFileLedger {
    pub fn new(dir: impl Into<PathBuf>) -> GazerResult<Self> {
        Self::with_run_token(dir, format!("{}-{}", run_token_now(), std::process::id()))
    }

    pub fn with_run_token(
        dir: impl Into<PathBuf>,
        run_token: impl Into<String>,
    ) -> GazerResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(GazerError::config(format!(
                "temp directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            run_token: run_token.into(),
        })
    }

    /// Create a fresh, empty file shaped like `template` (e.g. `chart.png`) for `job`.
    ///
    /// The returned guard deletes the file when released or dropped.
    pub fn allocate(&self, job: u64, template: &str) -> GazerResult<TempArtifact> {
        let template = Path::new(template);
        let stem = template
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("artifact");
        let suffix = template
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let prefix = format!("{TEMP_PREFIX}-{stem}-{}-{job}-", self.run_token);

        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&self.dir)
            .map_err(|e| {
                GazerError::resource(format!(
                    "create temp file in '{}': {e}",
                    self.dir.display()
                ))
            })?;
        let path = file.into_temp_path();
        tracing::trace!(path = %path.display(), job, "allocated temp artifact");
        Ok(TempArtifact { path })
    }

    /// Delete `path` if it exists. Missing files are not an error.
    pub fn release(path: &Path) -> GazerResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) => not_found_ok(path, e),
        }
    }
}

fn not_found_ok(path: &Path, e: std::io::Error) -> GazerResult<()> {
    if e.kind() == std::io::ErrorKind::NotFound {
        return Ok(());
    }
    Err(GazerError::resource(format!(
        "remove temp file '{}': {e}",
        path.display()
    )))
}

/// Temp file owned by one job. Released exactly once: explicitly or on drop.
#[derive(Debug)]
pub struct TempArtifact {
    path: TempPath,
}

impl TempArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(self) -> GazerResult<()> {
        let path = self.path.to_path_buf();
        match self.path.close() {
            Ok(()) => Ok(()),
            Err(e) => not_found_ok(&path, e),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/ledger.rs"]
mod tests;
