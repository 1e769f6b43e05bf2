//! Error types for cpi-generate.

use std::path::PathBuf;

use thiserror::Error;

use cpi_renderer::RenderError;

/// All errors that can arise from generating a file.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An error from the rendering engine (including unknown template kinds).
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// True when the caller asked for a kind the active catalog lacks.
    pub fn is_unknown_template(&self) -> bool {
        matches!(self, GenerateError::Render(RenderError::UnknownTemplate { .. }))
    }
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
