//! # cpi-renderer
//!
//! Tera-based engine rendering the fixed project documents (description,
//! instructions, readme, migration checklist, metaprompts) of a versioned
//! document catalog.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cpi_core::{Registry, SystemClock};
//! use cpi_renderer::{CatalogVersion, ProjectParams, TemplateEngine};
//!
//! fn instructions(registry: &Registry) -> Option<String> {
//!     let engine = TemplateEngine::new(CatalogVersion::latest()).ok()?;
//!     let kind = engine.resolve("instructions").ok()?;
//!     let params = ProjectParams::new("Proj", "Team/X", "engineer", "Go");
//!     engine.render(kind, &params, registry, &SystemClock).ok()
//! }
//! ```

pub mod catalog;
pub mod context;
pub mod engine;
pub mod error;

pub use catalog::{CatalogVersion, TemplateKind};
pub use context::{ProjectParams, TemplateContext};
pub use engine::{TagIndexSource, TemplateEngine};
pub use error::RenderError;
