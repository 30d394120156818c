//! Domain models.

pub mod file;

pub use file::{Credential, FileRecord, FileSummary, NewFile};
