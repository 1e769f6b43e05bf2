//! Error types for cpi-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry operations.
///
/// A missing record is not an error: `remove` and `set_migrated` report it
/// through their outcome enums instead.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying I/O failure, with the path being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry file exists but is not a valid registry document.
    ///
    /// Fatal: the file is left exactly as found so no user data is lost.
    #[error("registry at {path} is corrupt: {source}")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error (save path).
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `dirs::home_dir()` returned `None` — cannot locate the config directory.
    #[error("cannot determine home directory; set $HOME or CPI_CONFIG_DIR")]
    HomeNotFound,
}

/// Convenience constructor for [`RegistryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RegistryError {
    RegistryError::Io {
        path: path.into(),
        source,
    }
}
