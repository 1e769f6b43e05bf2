//! `cpi-engine registry_*` — registry commands and their stdout formats.
//!
//! The shell front end parses this output, so the formats are fixed:
//! sentinels (`__EMPTY__`, `__COUNT__<n>`) and the `ok` / `not_found` /
//! `yes` / `no` answers must not change.

use anyhow::{Context, Result};

use cpi_core::{MarkOutcome, ProjectRecord, Registry, RemoveOutcome};

pub const EMPTY_MARKER: &str = "__EMPTY__";
pub const COUNT_MARKER: &str = "__COUNT__";

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// `registry_list` output, one `\n`-terminated line per entry.
pub fn format_list(records: &[ProjectRecord]) -> String {
    if records.is_empty() {
        return format!("{EMPTY_MARKER}\n");
    }
    let mut out = String::new();
    for p in records {
        out.push_str(&format!("  {:<35} ({})\n", p.name.0, p.tag));
    }
    out.push_str(&format!("{COUNT_MARKER}{}\n", records.len()));
    out
}

/// `registry_get_tags` output.
pub fn format_tags(records: &[ProjectRecord]) -> String {
    records
        .iter()
        .map(|p| format!("{} -> ({})\n", p.name, p.tag))
        .collect()
}

pub fn format_remove(outcome: RemoveOutcome) -> &'static str {
    match outcome {
        RemoveOutcome::Removed => "ok",
        RemoveOutcome::NotFound => "not_found",
    }
}

pub fn format_mark(outcome: MarkOutcome) -> &'static str {
    match outcome {
        MarkOutcome::Found => "ok",
        MarkOutcome::NotFound => "not_found",
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn add(registry: &Registry, name: String, tag: String) -> Result<()> {
    registry
        .upsert(name.as_str(), tag)
        .with_context(|| format!("failed to register '{name}'"))?;
    Ok(())
}

pub fn list(registry: &Registry) -> Result<()> {
    let records = registry.list_sorted().context("failed to read registry")?;
    print!("{}", format_list(&records));
    Ok(())
}

pub fn get_tags(registry: &Registry) -> Result<()> {
    let records = registry.list_sorted().context("failed to read registry")?;
    print!("{}", format_tags(&records));
    Ok(())
}

pub fn count(registry: &Registry) -> Result<()> {
    println!("{}", registry.count().context("failed to read registry")?);
    Ok(())
}

pub fn exists(registry: &Registry, name: String) -> Result<()> {
    let found = registry.exists(name).context("failed to read registry")?;
    println!("{}", if found { "yes" } else { "no" });
    Ok(())
}

pub fn remove(registry: &Registry, name: String) -> Result<()> {
    let outcome = registry
        .remove(name.as_str())
        .with_context(|| format!("failed to remove '{name}'"))?;
    println!("{}", format_remove(outcome));
    Ok(())
}

pub fn names(registry: &Registry) -> Result<()> {
    for name in registry.names_sorted().context("failed to read registry")? {
        println!("{name}");
    }
    Ok(())
}

pub fn set_migrated(registry: &Registry, name: String) -> Result<()> {
    let outcome = registry
        .set_migrated(name.as_str())
        .with_context(|| format!("failed to mark '{name}' as migrated"))?;
    println!("{}", format_mark(outcome));
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
