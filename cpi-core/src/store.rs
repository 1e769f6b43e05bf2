//! Persistent store — one JSON registry document on disk.
//!
//! # Write flow
//!
//! serialize → `registry.json.tmp` sibling → `chmod 0600` → `rename`.
//! The `.tmp` lives in the same directory as the target so the rename never
//! crosses filesystems. This keeps readers from seeing a torn file; it does
//! not serialize concurrent writers (last writer wins).

use std::path::{Path, PathBuf};

use crate::error::{io_err, RegistryError};
use crate::paths;
use crate::types::RegistryDocument;

/// Handle on the registry file. Cheap to clone; holds no open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStore {
    dir: PathBuf,
    path: PathBuf,
}

impl RegistryStore {
    /// Store rooted at `dir` (the file is `dir/registry.json`).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(paths::REGISTRY_FILE);
        RegistryStore { dir, path }
    }

    /// Store at the user's configuration directory (see [`paths::config_dir`]).
    pub fn from_env() -> Result<Self, RegistryError> {
        Ok(Self::at(paths::config_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory and an empty document if absent. Idempotent.
    pub fn ensure(&self) -> Result<(), RegistryError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
            set_dir_permissions(&self.dir)?;
        }
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "initializing empty registry");
            self.save(&RegistryDocument::default())?;
        }
        Ok(())
    }

    /// Load the document, initializing it first if needed.
    ///
    /// Returns [`RegistryError::CorruptState`] if the file does not parse as
    /// a registry document. The file is not modified in that case.
    pub fn load(&self) -> Result<RegistryDocument, RegistryError> {
        self.ensure()?;
        let contents = std::fs::read_to_string(&self.path).map_err(|e| io_err(&self.path, e))?;
        let doc: RegistryDocument =
            serde_json::from_str(&contents).map_err(|source| RegistryError::CorruptState {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), projects = doc.projects.len(), "registry loaded");
        Ok(doc)
    }

    /// Atomically replace the document on disk.
    pub fn save(&self, doc: &RegistryDocument) -> Result<(), RegistryError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
            set_dir_permissions(&self.dir)?;
        }
        // Non-ASCII is written as raw UTF-8; legacy `\uXXXX` escapes do not survive a save.
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), RegistryError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), RegistryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), RegistryError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
