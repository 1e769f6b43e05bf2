//! Domain types for the project registry.
//!
//! The on-disk shape is a single JSON document:
//!
//! ```json
//! {
//!   "projects": [
//!     { "name": "Alpha", "tag": "Home/Dev", "created": "2025-01-01T10:00:00", "updated": "2025-01-01T10:00:00" }
//!   ]
//! }
//! ```
//!
//! Fields this crate does not know about are kept in `extra` and written back
//! untouched.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Primary key of a project record. Compared by exact, case-sensitive equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Free-form classification label, e.g. `Home/Dev`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectTag(pub String);

impl fmt::Display for ProjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectTag {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One registered project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: ProjectName,
    pub tag: ProjectTag,
    /// Set once, on first insertion.
    pub created: NaiveDateTime,
    /// Refreshed on every upsert and on `set_migrated`.
    pub updated: NaiveDateTime,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub migrated: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectRecord {
    /// A fresh record with `created == updated == now`.
    pub fn new(name: ProjectName, tag: ProjectTag, now: NaiveDateTime) -> Self {
        ProjectRecord {
            name,
            tag,
            created: now,
            updated: now,
            migrated: false,
            extra: Map::new(),
        }
    }
}

/// Root of the registry file. Records stay in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub projects: Vec<ProjectRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistryDocument {
    pub fn find(&self, name: &ProjectName) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| &p.name == name)
    }

    pub fn find_mut(&mut self, name: &ProjectName) -> Option<&mut ProjectRecord> {
        self.projects.iter_mut().find(|p| &p.name == name)
    }

    /// Records ordered by name. `sort_by` is stable, so duplicate names (only
    /// possible in hand-edited files) keep insertion order.
    pub fn sorted(&self) -> Vec<&ProjectRecord> {
        let mut projects: Vec<&ProjectRecord> = self.projects.iter().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of [`Registry::upsert`](crate::registry::Registry::upsert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Result of [`Registry::remove`](crate::registry::Registry::remove).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Result of [`Registry::set_migrated`](crate::registry::Registry::set_migrated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Found,
    NotFound,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn newtype_display() {
        assert_eq!(ProjectName::from("Alpha").to_string(), "Alpha");
        assert_eq!(ProjectTag::from("Home/Dev").to_string(), "Home/Dev");
    }

    #[test]
    fn names_compare_case_sensitively() {
        assert_ne!(ProjectName::from("alpha"), ProjectName::from("Alpha"));
    }

    #[test]
    fn record_serializes_in_legacy_field_order() {
        let rec = ProjectRecord::new("Alpha".into(), "Home/Dev".into(), at(9, 30));
        let json = serde_json::to_string(&rec).expect("serialize");
        assert_eq!(
            json,
            r#"{"name":"Alpha","tag":"Home/Dev","created":"2025-03-14T09:30:00","updated":"2025-03-14T09:30:00"}"#
        );
    }

    #[test]
    fn migrated_is_written_only_when_set() {
        let mut rec = ProjectRecord::new("Alpha".into(), "Home/Dev".into(), at(9, 30));
        rec.migrated = true;
        let json = serde_json::to_string(&rec).expect("serialize");
        assert!(json.ends_with(r#""migrated":true}"#), "got: {json}");
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let raw = r#"{"projects":[{"name":"A","tag":"T","created":"2025-03-14T09:30:00","updated":"2025-03-14T09:30:00","note":"keep me"}],"owner":"me"}"#;
        let doc: RegistryDocument = serde_json::from_str(raw).expect("parse");
        assert_eq!(doc.projects[0].extra["note"], "keep me");
        assert_eq!(doc.extra["owner"], "me");
        let back = serde_json::to_string(&doc).expect("serialize");
        let reparsed: RegistryDocument = serde_json::from_str(&back).expect("reparse");
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn sorted_is_by_name_and_stable() {
        let mut doc = RegistryDocument::default();
        doc.projects.push(ProjectRecord::new("b".into(), "1".into(), at(1, 0)));
        doc.projects.push(ProjectRecord::new("a".into(), "2".into(), at(1, 0)));
        doc.projects.push(ProjectRecord::new("b".into(), "3".into(), at(1, 0)));
        let tags: Vec<&str> = doc.sorted().iter().map(|p| p.tag.0.as_str()).collect();
        assert_eq!(tags, ["2", "1", "3"]);
    }
}
