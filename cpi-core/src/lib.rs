//! cpi core library — registry types, persistent store, registry operations.
//!
//! - [`types`] — newtypes, records, outcome enums
//! - [`error`] — [`RegistryError`]
//! - [`store`] — [`RegistryStore`]: ensure / load / save of the JSON document
//! - [`registry`] — [`Registry`]: upsert / remove / set_migrated / queries
//! - [`clock`] — injectable clock and the document timestamp formats
//! - [`paths`] — default configuration locations

pub mod clock;
pub mod error;
pub mod paths;
pub mod registry;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, Stamp, SystemClock};
pub use error::RegistryError;
pub use registry::Registry;
pub use store::RegistryStore;
pub use types::{
    MarkOutcome, ProjectName, ProjectRecord, ProjectTag, RegistryDocument, RemoveOutcome,
    UpsertOutcome,
};
