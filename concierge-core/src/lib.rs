//! Activity Concierge core library: record model, line codec, catalog and
//! data-file persistence.
//!
//! - [`types`] / [`tags`]: activities, tags, scores and the tag registry
//! - [`codec`]: the `NAME:DESCRIPTION:[TAGS]:(EASE:REWARD)` line format
//! - [`catalog`]: add / remove / edit / find over the in-memory catalog
//! - [`store`]: load, atomic save, backup
//! - [`audit`]: the audit log capability used by [`store`]
//! - [`paths`]: default file locations

pub mod audit;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod paths;
pub mod store;
pub mod tags;
pub mod types;

pub use audit::{AuditLog, FileAuditLog, MemoryAuditLog, NullAuditLog};
pub use catalog::Catalog;
pub use error::{ModelError, StoreError};
pub use paths::ConciergePaths;
pub use store::{BackupOutcome, BackupReport, LoadReport, MalformedLine};
pub use tags::{Tag, TagRegistry};
pub use types::{Activity, ActivityEdit, ActivityName, NewActivity, Score};
