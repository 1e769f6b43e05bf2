//! cpi-engine — project registry and document generator for the
//! claude-project-init shell front end.
//!
//! # Usage
//!
//! ```text
//! cpi-engine registry_add <name> <tag>
//! cpi-engine registry_list | registry_get_tags | registry_count | registry_names
//! cpi-engine registry_exists <name>
//! cpi-engine registry_remove <name>
//! cpi-engine registry_set_migrated <name>
//! cpi-engine generate <path> <template> [name] [tag] [role] [stack]
//! cpi-engine templates
//! cpi-engine version
//! ```
//!
//! Global: `--catalog <VERSION>` (`$CPI_CATALOG`), `--config-dir <DIR>` (`$CPI_CONFIG_DIR`).

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::generate::GenerateArgs;
use cpi_core::{Registry, RegistryStore};
use cpi_renderer::CatalogVersion;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cpi-engine",
    about = "Project registry and document templates for claude-project-init",
    long_about = None,
)]
struct Cli {
    /// Document catalog to render: 1.2.0, 1.3.0 or 2.0.0.
    #[arg(long, global = true, env = "CPI_CATALOG", default_value_t = CatalogVersion::latest())]
    catalog: CatalogVersion,

    /// Directory holding registry.json. Defaults to ~/.config/claude-project-init.
    #[arg(long, global = true, env = "CPI_CONFIG_DIR", value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
enum Commands {
    /// Register a project, or retag it if the name already exists.
    RegistryAdd { name: String, tag: String },

    /// List projects (`__EMPTY__` or one line each plus `__COUNT__<n>`).
    RegistryList,

    /// Print `name -> (tag)` for every project.
    RegistryGetTags,

    /// Print the number of registered projects.
    RegistryCount,

    /// Print `yes` or `no`.
    RegistryExists { name: String },

    /// Delete a project. Prints `ok` or `not_found`.
    RegistryRemove { name: String },

    /// Print project names, one per line.
    RegistryNames,

    /// Flag a project as migrated to the current catalog. Prints `ok` or `not_found`.
    RegistrySetMigrated { name: String },

    /// Render a template to a file.
    Generate(GenerateArgs),

    /// List the template kinds of the active catalog.
    Templates,

    /// Print the active catalog version (the only version query; there is no `--version`).
    Version,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = match cli.config_dir {
        Some(dir) => RegistryStore::at(dir),
        None => RegistryStore::from_env().context("cannot locate the registry")?,
    };
    tracing::debug!(registry = %store.path().display(), catalog = %cli.catalog, "starting");
    let registry = Registry::new(store);

    match cli.command {
        Commands::RegistryAdd { name, tag } => commands::registry::add(&registry, name, tag),
        Commands::RegistryList => commands::registry::list(&registry),
        Commands::RegistryGetTags => commands::registry::get_tags(&registry),
        Commands::RegistryCount => commands::registry::count(&registry),
        Commands::RegistryExists { name } => commands::registry::exists(&registry, name),
        Commands::RegistryRemove { name } => commands::registry::remove(&registry, name),
        Commands::RegistryNames => commands::registry::names(&registry),
        Commands::RegistrySetMigrated { name } => {
            commands::registry::set_migrated(&registry, name)
        }
        Commands::Generate(args) => args.run(cli.catalog, registry),
        Commands::Templates => {
            for kind in cli.catalog.kinds() {
                println!("{kind}");
            }
            Ok(())
        }
        Commands::Version => {
            println!("{}", cli.catalog);
            Ok(())
        }
    }
}

/// Diagnostics go to stderr; stdout carries only the command's payload.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
