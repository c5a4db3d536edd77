//! Obituary record model
//!
//! Read-only hydrated snapshots of archive records, as handed to the report
//! renderers by the storage layer.

mod record;

pub use record::{AlsoKnownAs, ObituaryRecord, Relative};
