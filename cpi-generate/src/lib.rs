//! # cpi-generate
//!
//! Binds a rendered document to a destination path.
//!
//! Call [`FileGenerator::generate`] with a template kind name as received
//! from the command line; the kind is resolved against the active catalog
//! before anything touches the filesystem.

pub mod error;
pub mod writer;

pub use error::GenerateError;
pub use writer::{FileGenerator, GenerateOutcome};
