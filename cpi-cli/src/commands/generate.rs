//! `cpi-engine generate <path> <template> [name] [tag] [role] [stack]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cpi_core::Registry;
use cpi_generate::FileGenerator;
use cpi_renderer::{CatalogVersion, ProjectParams};

/// Render one document of the active catalog to a file.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Destination file; overwritten if it exists.
    pub path: PathBuf,

    /// Template kind, e.g. `instructions`, `readme`, `migration`.
    pub template: String,

    /// Project name.
    #[arg(default_value = "")]
    pub name: String,

    /// Project tag, e.g. `Home/Dev`.
    #[arg(default_value = "")]
    pub tag: String,

    /// Role the assistant should take.
    #[arg(default_value = "")]
    pub role: String,

    /// Technology stack.
    #[arg(default_value = "")]
    pub stack: String,
}

impl GenerateArgs {
    pub fn run(self, catalog: CatalogVersion, registry: Registry) -> Result<()> {
        let generator =
            FileGenerator::new(catalog, registry).context("failed to load embedded templates")?;
        let params = ProjectParams::new(self.name, self.tag, self.role, self.stack);

        generator
            .generate(&self.path, &self.template, &params)
            .with_context(|| {
                format!(
                    "failed to generate '{}' at {}",
                    self.template,
                    self.path.display()
                )
            })?;
        Ok(())
    }
}
