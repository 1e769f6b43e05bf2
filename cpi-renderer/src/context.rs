//! Template context — serializable rendering payload.

use serde::{Deserialize, Serialize};

use cpi_core::Stamp;

use crate::catalog::CatalogVersion;
use crate::error::RenderError;

/// Caller-supplied project parameters. Any field may be empty; each kind
/// only reads the ones it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParams {
    pub name: String,
    pub tag: String,
    pub role: String,
    pub stack: String,
}

impl ProjectParams {
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<String>,
        role: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        ProjectParams {
            name: name.into(),
            tag: tag.into(),
            role: role.into(),
            stack: stack.into(),
        }
    }
}

/// Generation metadata shared by every document kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub catalog_version: String,
    /// `YYYYMMDD-HHMM`
    pub generated_compact: String,
    /// `YYYY-MM-DD HH:MM`
    pub generated_human: String,
}

/// Everything a template can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    pub project: ProjectParams,
    /// Known-tags listing read from the registry at render time. Empty for
    /// kinds that do not embed it.
    pub tag_index: String,
    pub meta: MetaCtx,
}

impl TemplateContext {
    pub fn new(
        version: CatalogVersion,
        project: &ProjectParams,
        tag_index: String,
        stamp: &Stamp,
    ) -> Self {
        TemplateContext {
            project: project.clone(),
            tag_index,
            meta: MetaCtx {
                catalog_version: version.as_str().to_string(),
                generated_compact: stamp.compact.clone(),
                generated_human: stamp.human.clone(),
            },
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
