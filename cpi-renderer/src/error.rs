//! Error types for cpi-renderer.

use thiserror::Error;

use cpi_core::RegistryError;

use crate::catalog::CatalogVersion;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested kind does not exist, or is not part of the active
    /// catalog (e.g. a retired metaprompt under 2.0.0).
    #[error("unknown template '{kind}' in catalog {catalog}")]
    UnknownTemplate { kind: String, catalog: CatalogVersion },

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Reading the live tag index from the registry failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}
