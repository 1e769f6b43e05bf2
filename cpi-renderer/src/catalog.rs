//! Document-set versions and the template kinds each one provides.
//!
//! | Catalog | Kinds |
//! |---------|-------|
//! | `1.2.0` | description, instructions, readme, migration, metaprompt_resumo, metaprompt_retomar, metaprompt_iniciar |
//! | `1.3.0` | 1.2.0 + metaprompt_checkpoint |
//! | `2.0.0` | description, instructions, readme, migration (metaprompts inlined into instructions) |
//!
//! A catalog is resolved as a whole: every kind of a version maps to that
//! version's own embedded template, so documents from different generations
//! can never be mixed.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

pub(crate) const PARTIALS: &[(&str, &str)] = &[
    ("shared/_semver.md.tera", include_str!("templates/_partials/semver.md.tera")),
    ("shared/_tags.md.tera", include_str!("templates/_partials/tags.md.tera")),
];

const V1_TPLS: &[(&str, &str)] = &[
    ("v1/description.txt.tera", include_str!("templates/v1/description.txt.tera")),
    ("v1/instructions.md.tera", include_str!("templates/v1/instructions.md.tera")),
    ("v1/readme.md.tera", include_str!("templates/v1/readme.md.tera")),
    ("v1/migration.md.tera", include_str!("templates/v1/migration.md.tera")),
    (
        "v1/metaprompt-resumo.md.tera",
        include_str!("templates/v1/metaprompt-resumo.md.tera"),
    ),
    (
        "v1/metaprompt-retomar.md.tera",
        include_str!("templates/v1/metaprompt-retomar.md.tera"),
    ),
    (
        "v1/metaprompt-iniciar.md.tera",
        include_str!("templates/v1/metaprompt-iniciar.md.tera"),
    ),
];

const V2_TPLS: &[(&str, &str)] = &[
    ("v2/description.txt.tera", include_str!("templates/v2/description.txt.tera")),
    ("v2/instructions.md.tera", include_str!("templates/v2/instructions.md.tera")),
    ("v2/readme.md.tera", include_str!("templates/v2/readme.md.tera")),
    ("v2/migration.md.tera", include_str!("templates/v2/migration.md.tera")),
    (
        "v2/metaprompt-checkpoint.md.tera",
        include_str!("templates/v2/metaprompt-checkpoint.md.tera"),
    ),
    // Unchanged from 1.2.0.
    (
        "v1/metaprompt-resumo.md.tera",
        include_str!("templates/v1/metaprompt-resumo.md.tera"),
    ),
    (
        "v1/metaprompt-retomar.md.tera",
        include_str!("templates/v1/metaprompt-retomar.md.tera"),
    ),
    (
        "v1/metaprompt-iniciar.md.tera",
        include_str!("templates/v1/metaprompt-iniciar.md.tera"),
    ),
];

const V3_TPLS: &[(&str, &str)] = &[
    ("v3/description.txt.tera", include_str!("templates/v3/description.txt.tera")),
    ("v3/instructions.md.tera", include_str!("templates/v3/instructions.md.tera")),
    ("v3/readme.md.tera", include_str!("templates/v3/readme.md.tera")),
    ("v3/migration.md.tera", include_str!("templates/v3/migration.md.tera")),
];

// ---------------------------------------------------------------------------
// TemplateKind
// ---------------------------------------------------------------------------

/// Every document kind any catalog has ever shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Description,
    Instructions,
    Readme,
    Migration,
    MetapromptResumo,
    MetapromptRetomar,
    MetapromptIniciar,
    MetapromptCheckpoint,
}

impl TemplateKind {
    /// All variants in a stable order.
    pub fn all() -> &'static [TemplateKind] {
        &[
            TemplateKind::Description,
            TemplateKind::Instructions,
            TemplateKind::Readme,
            TemplateKind::Migration,
            TemplateKind::MetapromptResumo,
            TemplateKind::MetapromptRetomar,
            TemplateKind::MetapromptIniciar,
            TemplateKind::MetapromptCheckpoint,
        ]
    }

    /// Wire name used by the command surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Description          => "description",
            TemplateKind::Instructions         => "instructions",
            TemplateKind::Readme               => "readme",
            TemplateKind::Migration            => "migration",
            TemplateKind::MetapromptResumo     => "metaprompt_resumo",
            TemplateKind::MetapromptRetomar    => "metaprompt_retomar",
            TemplateKind::MetapromptIniciar    => "metaprompt_iniciar",
            TemplateKind::MetapromptCheckpoint => "metaprompt_checkpoint",
        }
    }

    pub fn from_name(name: &str) -> Option<TemplateKind> {
        TemplateKind::all().iter().copied().find(|k| k.as_str() == name)
    }

    /// Whether rendering this kind reads the registry's tag index.
    pub fn needs_tag_index(&self) -> bool {
        matches!(self, TemplateKind::Instructions)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CatalogVersion
// ---------------------------------------------------------------------------

/// A complete, coherent document set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CatalogVersion {
    /// `1.2.0` — standalone resumo/retomar/iniciar metaprompts.
    V1,
    /// `1.3.0` — adds the standalone checkpoint metaprompt.
    V2,
    /// `2.0.0` — metaprompts retired, commands inlined into instructions.
    #[default]
    V3,
}

impl CatalogVersion {
    pub fn all() -> &'static [CatalogVersion] {
        &[CatalogVersion::V1, CatalogVersion::V2, CatalogVersion::V3]
    }

    pub fn latest() -> CatalogVersion {
        CatalogVersion::V3
    }

    /// Semantic-version identifier reported by the version query.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogVersion::V1 => "1.2.0",
            CatalogVersion::V2 => "1.3.0",
            CatalogVersion::V3 => "2.0.0",
        }
    }

    /// Embedded template backing `kind` in this catalog, if the kind is part
    /// of it.
    pub fn template_name(&self, kind: TemplateKind) -> Option<&'static str> {
        use CatalogVersion::*;
        use TemplateKind::*;
        match (self, kind) {
            (V1, Description)          => Some("v1/description.txt.tera"),
            (V1, Instructions)         => Some("v1/instructions.md.tera"),
            (V1, Readme)               => Some("v1/readme.md.tera"),
            (V1, Migration)            => Some("v1/migration.md.tera"),
            (V1, MetapromptResumo)     => Some("v1/metaprompt-resumo.md.tera"),
            (V1, MetapromptRetomar)    => Some("v1/metaprompt-retomar.md.tera"),
            (V1, MetapromptIniciar)    => Some("v1/metaprompt-iniciar.md.tera"),
            (V1, MetapromptCheckpoint) => None,

            (V2, Description)          => Some("v2/description.txt.tera"),
            (V2, Instructions)         => Some("v2/instructions.md.tera"),
            (V2, Readme)               => Some("v2/readme.md.tera"),
            (V2, Migration)            => Some("v2/migration.md.tera"),
            (V2, MetapromptResumo)     => Some("v1/metaprompt-resumo.md.tera"),
            (V2, MetapromptRetomar)    => Some("v1/metaprompt-retomar.md.tera"),
            (V2, MetapromptIniciar)    => Some("v1/metaprompt-iniciar.md.tera"),
            (V2, MetapromptCheckpoint) => Some("v2/metaprompt-checkpoint.md.tera"),

            (V3, Description)          => Some("v3/description.txt.tera"),
            (V3, Instructions)         => Some("v3/instructions.md.tera"),
            (V3, Readme)               => Some("v3/readme.md.tera"),
            (V3, Migration)            => Some("v3/migration.md.tera"),
            (V3, MetapromptResumo
                | MetapromptRetomar
                | MetapromptIniciar
                | MetapromptCheckpoint) => None,
        }
    }

    /// Kinds this catalog can render, in [`TemplateKind::all`] order.
    pub fn kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::all()
            .iter()
            .copied()
            .filter(|k| self.template_name(*k).is_some())
            .collect()
    }

    /// Parse a wire name and check it against this catalog.
    pub fn resolve(&self, name: &str) -> Result<TemplateKind, RenderError> {
        TemplateKind::from_name(name)
            .filter(|k| self.template_name(*k).is_some())
            .ok_or_else(|| RenderError::UnknownTemplate {
                kind: name.to_string(),
                catalog: *self,
            })
    }

    /// Embedded sources this catalog loads (partials excluded).
    pub(crate) fn sources(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            CatalogVersion::V1 => V1_TPLS,
            CatalogVersion::V2 => V2_TPLS,
            CatalogVersion::V3 => V3_TPLS,
        }
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix(|c: char| c == 'v' || c == 'V').unwrap_or(trimmed);
        match bare {
            "1.2.0" | "1.2" => Ok(CatalogVersion::V1),
            "1.3.0" | "1.3" => Ok(CatalogVersion::V2),
            "2.0.0" | "2.0" | "2" => Ok(CatalogVersion::V3),
            "latest" => Ok(CatalogVersion::latest()),
            other => Err(format!(
                "unknown catalog version '{other}'; expected: 1.2.0, 1.3.0, 2.0.0"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
