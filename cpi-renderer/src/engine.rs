//! Tera rendering engine — [`TagIndexSource`] seam and [`TemplateEngine`].
//!
//! # Output files (as written by the front end)
//!
//! | Kind                    | Conventional file name       |
//! |-------------------------|------------------------------|
//! | description             | `DESCRICAO.txt`              |
//! | instructions            | `INSTRUCOES.md`              |
//! | readme                  | `README.md`                  |
//! | migration               | `CHECKLIST-MIGRACAO.md`      |
//! | metaprompt_*            | `metaprompt-<name>.md`       |

use std::collections::HashMap;

use tera::Tera;

use cpi_core::{Clock, Registry, RegistryError, Stamp};

use crate::catalog::{CatalogVersion, TemplateKind, PARTIALS};
use crate::context::{ProjectParams, TemplateContext};
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// TagIndexSource
// ---------------------------------------------------------------------------

/// Live source of the known-tags listing embedded in `instructions`.
///
/// Queried at render time, so the document reflects the registry as it is
/// when generated rather than whatever the caller last saw.
pub trait TagIndexSource {
    fn tag_index_text(&self) -> Result<String, RegistryError>;
}

impl TagIndexSource for Registry {
    fn tag_index_text(&self) -> Result<String, RegistryError> {
        Registry::tag_index_text(self)
    }
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(name: &str) -> String {
    name.replace('\\', "/").to_lowercase()
}

fn build_tera(version: CatalogVersion) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in PARTIALS.iter().chain(version.sources()) {
        templates.insert(normalize_template_name(name), content.replace("\r\n", "\n"));
    }

    let mut tera = Tera::default();
    // Plain-text documents: nothing is HTML, nothing gets escaped.
    tera.autoescape_on(vec![]);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Renders the documents of one catalog version.
///
/// Only that version's templates are loaded. Create once and reuse.
pub struct TemplateEngine {
    version: CatalogVersion,
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(version: CatalogVersion) -> Result<Self, RenderError> {
        let tera = build_tera(version)?;
        Ok(TemplateEngine { version, tera })
    }

    /// Engine for [`CatalogVersion::latest`].
    pub fn latest() -> Result<Self, RenderError> {
        Self::new(CatalogVersion::latest())
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    /// Parse a wire name against the active catalog.
    pub fn resolve(&self, name: &str) -> Result<TemplateKind, RenderError> {
        self.version.resolve(name)
    }

    /// Render `kind` with a single sample of `clock`.
    pub fn render(
        &self,
        kind: TemplateKind,
        params: &ProjectParams,
        tags: &dyn TagIndexSource,
        clock: &dyn Clock,
    ) -> Result<String, RenderError> {
        let stamp = Stamp::capture(clock);
        self.render_at(kind, params, tags, &stamp)
    }

    /// Render `kind` at an already captured instant.
    pub fn render_at(
        &self,
        kind: TemplateKind,
        params: &ProjectParams,
        tags: &dyn TagIndexSource,
        stamp: &Stamp,
    ) -> Result<String, RenderError> {
        let name = self
            .version
            .template_name(kind)
            .ok_or_else(|| RenderError::UnknownTemplate {
                kind: kind.as_str().to_string(),
                catalog: self.version,
            })?;

        let tag_index = if kind.needs_tag_index() {
            tags.tag_index_text()?
        } else {
            String::new()
        };

        let ctx = TemplateContext::new(self.version, params, tag_index, stamp);
        let content = self.tera.render(name, &ctx.to_tera_context()?)?;
        tracing::debug!(catalog = %self.version, %kind, bytes = content.len(), "rendered");
        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
