//! Compact storage for the members of an entity stack.
//!
//! A stack of N like entities keeps exactly one live host object resident.
//! The other N-1 members live here as data: one shared base tag-tree
//! captured from the first entity, plus one sparse diff tag-tree per member
//! holding only the fields that deviate from the base.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  EntityDataStore                                          │
//! │    base:  full stripped snapshot of the first entity      │
//! │    diffs: [ {Health: 5.0}, {}, {CustomName: "Jeb"}, … ]   │
//! │    entity: Weak ──► the one live representative           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Merging an entity in: save its full state through the version adapter,
//! strip transient/world-bound fields and attribute UUIDs, delete every
//! top-level key equal to the base's, append the remainder. Merging out:
//! overlay the diff onto a copy of the base, regenerate fresh attribute
//! UUIDs, and materialize a live entity from the result.

mod adapter;
mod entry;
mod error;
mod store;

pub use adapter::{StorageType, VersionAdapter};
pub use entry::EntityDataEntry;
pub use error::{StorageError, StorageResult};
pub use store::EntityDataStore;
