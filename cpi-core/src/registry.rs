//! Registry operations over the persisted document.
//!
//! # API pattern
//!
//! Every call is one self-contained cycle:
//! - queries: `load` → compute
//! - mutations: `load` → mutate → `save`
//!
//! Nothing is cached between calls, and a mutation that has no effect
//! (`remove` / `set_migrated` of an unknown name) never writes the file.

use crate::clock::{Clock, SystemClock};
use crate::error::RegistryError;
use crate::store::RegistryStore;
use crate::types::{
    MarkOutcome, ProjectName, ProjectRecord, ProjectTag, RemoveOutcome, UpsertOutcome,
};

/// Project registry bound to one store.
pub struct Registry {
    store: RegistryStore,
    clock: Box<dyn Clock>,
}

impl Registry {
    /// Registry over `store` using the local system clock.
    pub fn new(store: RegistryStore) -> Self {
        Self::with_clock(store, SystemClock)
    }

    /// Registry over `store` with an explicit clock (tests freeze time here).
    pub fn with_clock(store: RegistryStore, clock: impl Clock + 'static) -> Self {
        Registry {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert `name` or retag it. `created` is only ever set here, on insert.
    pub fn upsert(
        &self,
        name: impl Into<ProjectName>,
        tag: impl Into<ProjectTag>,
    ) -> Result<UpsertOutcome, RegistryError> {
        let (name, tag) = (name.into(), tag.into());
        let mut doc = self.store.load()?;
        let now = self.clock.now();

        let outcome = match doc.find_mut(&name) {
            Some(existing) => {
                existing.tag = tag;
                existing.updated = now;
                UpsertOutcome::Updated
            }
            None => {
                doc.projects.push(ProjectRecord::new(name.clone(), tag, now));
                UpsertOutcome::Created
            }
        };

        self.store.save(&doc)?;
        tracing::info!(project = %name, ?outcome, "registry upsert");
        Ok(outcome)
    }

    /// Flag `name` as migrated to the current document set.
    pub fn set_migrated(&self, name: impl Into<ProjectName>) -> Result<MarkOutcome, RegistryError> {
        let name = name.into();
        let mut doc = self.store.load()?;
        let now = self.clock.now();

        let Some(record) = doc.find_mut(&name) else {
            tracing::debug!(project = %name, "set_migrated: not found");
            return Ok(MarkOutcome::NotFound);
        };
        record.migrated = true;
        record.updated = now;

        self.store.save(&doc)?;
        tracing::info!(project = %name, "registry marked migrated");
        Ok(MarkOutcome::Found)
    }

    /// Delete every record named `name`.
    pub fn remove(&self, name: impl Into<ProjectName>) -> Result<RemoveOutcome, RegistryError> {
        let name = name.into();
        let mut doc = self.store.load()?;
        let before = doc.projects.len();
        doc.projects.retain(|p| p.name != name);

        if doc.projects.len() == before {
            tracing::debug!(project = %name, "remove: not found");
            return Ok(RemoveOutcome::NotFound);
        }

        self.store.save(&doc)?;
        tracing::info!(project = %name, "registry remove");
        Ok(RemoveOutcome::Removed)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn exists(&self, name: impl Into<ProjectName>) -> Result<bool, RegistryError> {
        let name = name.into();
        Ok(self.store.load()?.find(&name).is_some())
    }

    pub fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.store.load()?.projects.len())
    }

    /// All records ordered by name (stable).
    pub fn list_sorted(&self) -> Result<Vec<ProjectRecord>, RegistryError> {
        let doc = self.store.load()?;
        Ok(doc.sorted().into_iter().cloned().collect())
    }

    pub fn names_sorted(&self) -> Result<Vec<ProjectName>, RegistryError> {
        Ok(self.list_sorted()?.into_iter().map(|p| p.name).collect())
    }

    /// `(name, tag)` pairs in name order.
    pub fn tag_index(&self) -> Result<Vec<(ProjectName, ProjectTag)>, RegistryError> {
        Ok(self
            .list_sorted()?
            .into_iter()
            .map(|p| (p.name, p.tag))
            .collect())
    }

    /// The known-tags listing embedded in generated instructions:
    /// one `- <name> -> (<tag>)` line per record, no trailing newline.
    pub fn tag_index_text(&self) -> Result<String, RegistryError> {
        let lines: Vec<String> = self
            .tag_index()?
            .iter()
            .map(|(name, tag)| format!("- {name} -> ({tag})"))
            .collect();
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn registry(tmp: &TempDir, h: u32) -> Registry {
        Registry::with_clock(RegistryStore::at(tmp.path()), FixedClock(at(h)))
    }

    #[test]
    fn upsert_reports_created_then_updated() {
        let tmp = TempDir::new().unwrap();
        let reg = registry(&tmp, 9);
        assert_eq!(reg.upsert("Alpha", "Home/Dev").unwrap(), UpsertOutcome::Created);
        assert_eq!(reg.upsert("Alpha", "Home/Ops").unwrap(), UpsertOutcome::Updated);
        assert_eq!(reg.count().unwrap(), 1);
    }

    #[test]
    fn upsert_keeps_created_and_advances_updated() {
        let tmp = TempDir::new().unwrap();
        registry(&tmp, 9).upsert("Alpha", "Home/Dev").unwrap();
        registry(&tmp, 11).upsert("Alpha", "Home/Ops").unwrap();

        let rec = &registry(&tmp, 12).list_sorted().unwrap()[0];
        assert_eq!(rec.created, at(9));
        assert_eq!(rec.updated, at(11));
        assert_eq!(rec.tag, ProjectTag::from("Home/Ops"));
    }

    #[test]
    fn set_migrated_found_and_not_found() {
        let tmp = TempDir::new().unwrap();
        registry(&tmp, 9).upsert("Alpha", "Home/Dev").unwrap();

        let reg = registry(&tmp, 10);
        assert_eq!(reg.set_migrated("Alpha").unwrap(), MarkOutcome::Found);
        assert_eq!(reg.set_migrated("Beta").unwrap(), MarkOutcome::NotFound);
        assert!(!reg.exists("Beta").unwrap(), "set_migrated must not create");

        let rec = &reg.list_sorted().unwrap()[0];
        assert!(rec.migrated);
        assert_eq!(rec.updated, at(10));
        assert_eq!(rec.created, at(9));
    }

    #[test]
    fn upsert_preserves_migrated_flag() {
        let tmp = TempDir::new().unwrap();
        let reg = registry(&tmp, 9);
        reg.upsert("Alpha", "A").unwrap();
        reg.set_migrated("Alpha").unwrap();
        reg.upsert("Alpha", "B").unwrap();
        assert!(reg.list_sorted().unwrap()[0].migrated);
    }

    #[test]
    fn tag_index_text_lines() {
        let tmp = TempDir::new().unwrap();
        let reg = registry(&tmp, 9);
        assert_eq!(reg.tag_index_text().unwrap(), "");
        reg.upsert("beta", "Work/B").unwrap();
        reg.upsert("Alpha", "Home/A").unwrap();
        assert_eq!(
            reg.tag_index_text().unwrap(),
            "- Alpha -> (Home/A)\n- beta -> (Work/B)"
        );
    }

    #[test]
    fn names_sorted_is_bytewise() {
        let tmp = TempDir::new().unwrap();
        let reg = registry(&tmp, 9);
        for n in ["zeta", "Zeta", "alpha", "Alpha"] {
            reg.upsert(n, "t").unwrap();
        }
        let names: Vec<String> = reg.names_sorted().unwrap().into_iter().map(|n| n.0).collect();
        assert_eq!(names, ["Alpha", "Zeta", "alpha", "zeta"]);
    }
}
