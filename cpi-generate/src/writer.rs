//! Atomic writer and the file generator.
//!
//! ## `generate` — write protocol
//!
//! 1. Resolve the kind name against the active catalog (unknown → error,
//!    nothing on disk is touched).
//! 2. Render with a single sample of the clock.
//! 3. Ensure the parent directory exists.
//! 4. Write to `<path>.cpi.tmp`.
//! 5. Rename to the final path, replacing whatever was there.

use std::path::{Path, PathBuf};

use cpi_core::{Clock, Registry, SystemClock};
use cpi_renderer::{CatalogVersion, ProjectParams, TemplateEngine, TemplateKind};

use crate::error::{io_err, GenerateError};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a successful `generate` call wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub path: PathBuf,
    pub kind: TemplateKind,
    pub bytes: usize,
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Write `content` to `path` through a sibling temp file, overwriting
/// unconditionally.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), GenerateError> {
    let tmp = PathBuf::from(format!("{}.cpi.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), GenerateError> {
    // Normalise line endings to LF before writing.
    let content = content.replace("\r\n", "\n");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// FileGenerator
// ---------------------------------------------------------------------------

/// Renders documents of one catalog and writes them to caller-chosen paths.
///
/// Holds the registry so `instructions` can embed the tag index as it is at
/// generation time.
pub struct FileGenerator {
    engine: TemplateEngine,
    registry: Registry,
    clock: Box<dyn Clock>,
}

impl FileGenerator {
    pub fn new(version: CatalogVersion, registry: Registry) -> Result<Self, GenerateError> {
        Self::with_clock(version, registry, SystemClock)
    }

    pub fn with_clock(
        version: CatalogVersion,
        registry: Registry,
        clock: impl Clock + 'static,
    ) -> Result<Self, GenerateError> {
        Ok(FileGenerator {
            engine: TemplateEngine::new(version)?,
            registry,
            clock: Box::new(clock),
        })
    }

    pub fn version(&self) -> CatalogVersion {
        self.engine.version()
    }

    /// Render `template` for `params` and write it to `path`.
    ///
    /// Returns [`GenerateError::Render`] wrapping `UnknownTemplate` when
    /// `template` is not in the active catalog; `path` is left untouched.
    pub fn generate(
        &self,
        path: &Path,
        template: &str,
        params: &ProjectParams,
    ) -> Result<GenerateOutcome, GenerateError> {
        let kind = self.engine.resolve(template)?;
        let content = self
            .engine
            .render(kind, params, &self.registry, self.clock.as_ref())?;

        atomic_write(path, &content)?;
        tracing::info!(%kind, path = %path.display(), "wrote");
        Ok(GenerateOutcome {
            path: path.to_path_buf(),
            kind,
            bytes: content.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cpi_core::{FixedClock, RegistryStore};
    use std::fs;
    use tempfile::TempDir;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 12, 24)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        )
    }

    fn generator(home: &TempDir, version: CatalogVersion) -> FileGenerator {
        let registry = Registry::with_clock(RegistryStore::at(home.path().join("cfg")), clock());
        FileGenerator::with_clock(version, registry, clock()).expect("generator")
    }

    fn params() -> ProjectParams {
        ProjectParams::new("Proj", "Team/X", "engineer", "Go")
    }

    #[test]
    fn atomic_write_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("README.md");
        atomic_write(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.md");
        atomic_write(&path, "data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.cpi.tmp", path.display()));
        assert!(!tmp_path.exists(), ".cpi.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("nested").join("INSTRUCOES.md");
        atomic_write(&path, "content").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn crlf_is_normalised() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("normalize.md");
        atomic_write(&path, "line1\r\nline2\r\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nline2\n");
    }

    #[test]
    fn generate_overwrites_existing_file() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = out.path().join("DESCRICAO.txt");
        fs::write(&path, "old contents that are much longer than anything we render here, surely").unwrap();

        let outcome = generator(&home, CatalogVersion::V3)
            .generate(&path, "description", &params())
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(outcome.kind, TemplateKind::Description);
        assert_eq!(outcome.bytes, written.len());
        assert!(written.starts_with("Proj — "));
        assert!(!written.contains("old contents"));
    }

    #[test]
    fn unknown_template_leaves_path_untouched() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let existing = out.path().join("keep.md");
        fs::write(&existing, "previous").unwrap();
        let missing = out.path().join("never.md");

        let gen = generator(&home, CatalogVersion::V3);
        let err = gen.generate(&existing, "bogus", &params()).unwrap_err();
        assert!(err.is_unknown_template(), "got: {err}");
        let err = gen.generate(&missing, "metaprompt_resumo", &params()).unwrap_err();
        assert!(err.is_unknown_template(), "retired kind, got: {err}");

        assert_eq!(fs::read_to_string(&existing).unwrap(), "previous");
        assert!(!missing.exists());
    }

    #[test]
    fn legacy_catalog_still_generates_metaprompts() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = out.path().join("metaprompt-checkpoint.md");
        generator(&home, CatalogVersion::V2)
            .generate(&path, "metaprompt_checkpoint", &params())
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# Created: 2025-12-24 18:00"));
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_existing_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("file.md");
        fs::write(&path, "previous").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("file.md.cpi.tmp");

        let result = atomic_write_with_tmp(&path, "new content", &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename failed.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
            assert!(!tmp_path.exists(), ".cpi.tmp should be cleaned up");
        }
    }
}
