/// Convenience result type used across weight-gazer.
pub type GazerResult<T> = Result<T, GazerError>;

/// Error taxonomy for the compositing engine.
///
/// `Config` and `Serde` errors are caller mistakes and abort a run before any job starts.
/// Everything else is scoped to the single wallpaper being processed.
#[derive(thiserror::Error, Debug)]
pub enum GazerError {
    /// Invalid parameters, degenerate geometry or missing directories.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unreadable or corrupt input (background image, data table).
    #[error("input error: {0}")]
    Input(String),

    /// Unwritable output, full disk, temp artifacts that cannot be created or removed.
    #[error("resource error: {0}")]
    Resource(String),

    /// The chart renderer failed or returned a raster of the wrong size.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration or data (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Context-wrapped failure from a lower layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GazerError {
    /// Build a [`GazerError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GazerError::Input`].
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`GazerError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`GazerError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GazerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error must abort the whole run rather than a single job.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Serde(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
