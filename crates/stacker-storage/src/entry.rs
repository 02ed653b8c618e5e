//! Immutable wrappers around one reconstructed entity snapshot.

use std::sync::Arc;

use stacker_host::{EntityKind, LiveEntity, Location};
use stacker_nbt::{NbtCompound, NbtValue};

use crate::{StorageResult, VersionAdapter};

/// One reconstructed entity snapshot: a tag-tree already overlaid onto its
/// base and filled with fresh attribute UUIDs.
///
/// Entries are value objects; there are no mutation methods.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDataEntry {
    tag: NbtCompound,
}

impl EntityDataEntry {
    #[must_use]
    pub fn new(tag: NbtCompound) -> Self {
        Self { tag }
    }

    #[must_use]
    pub fn tag(&self) -> &NbtCompound {
        &self.tag
    }

    #[must_use]
    pub fn into_tag(self) -> NbtCompound {
        self.tag
    }

    /// Elapsed-lifetime ticks, extracted without materializing.
    ///
    /// `None` when the snapshot carries no age field.
    #[must_use]
    pub fn age_ticks(&self) -> Option<i32> {
        match self.tag.get("Age") {
            Some(NbtValue::Int(v)) => Some(*v),
            Some(NbtValue::Short(v)) => Some(i32::from(*v)),
            _ => None,
        }
    }

    /// Materialize a live entity of `kind` at `location` from this snapshot.
    ///
    /// `silent` suppresses the spawn side effect; see
    /// [`VersionAdapter::create_entity`].
    pub fn materialize(
        &self,
        adapter: &dyn VersionAdapter,
        location: Location,
        silent: bool,
        kind: EntityKind,
    ) -> StorageResult<Arc<LiveEntity>> {
        adapter.create_entity(self.tag.clone(), location, kind, silent)
    }
}

#[cfg(test)]
mod tests {
    use stacker_nbt::nbt;

    use super::*;

    #[test]
    fn test_age_ticks() {
        assert_eq!(EntityDataEntry::new(nbt! { "Age" => 40i32 }).age_ticks(), Some(40));
        assert_eq!(EntityDataEntry::new(nbt! { "Age" => 7i16 }).age_ticks(), Some(7));
        assert_eq!(EntityDataEntry::new(nbt! {}).age_ticks(), None);
    }
}
