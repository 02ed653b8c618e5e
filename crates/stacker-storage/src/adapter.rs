//! The host-version adapter seam.
//!
//! The engine never touches a specific host version's types. It depends on
//! one capability interface (save a live entity's full state into a tag
//! compound; materialize a live entity back out of one) implemented once
//! per supported host version and selected at startup.

use std::sync::Arc;

use stacker_host::{EntityKind, LiveEntity, Location};
use stacker_nbt::NbtCompound;

use crate::StorageResult;

/// Reads and writes one live entity's full persistent state for a specific
/// host engine version.
pub trait VersionAdapter: Send + Sync {
    /// Adapter name, e.g. `v1_19`.
    fn name(&self) -> &'static str;

    /// The data version stamped into saved tags.
    fn data_version(&self) -> i32;

    /// Save the entity's full persistent state, including version-specific
    /// positional and world-linkage fields.
    fn save_entity_to_tag(&self, entity: &LiveEntity) -> StorageResult<NbtCompound>;

    /// Materialize a live entity of `kind` at `location` from a tag.
    ///
    /// With `silent` set the entity is constructed but not registered in the
    /// location's world, suppressing spawn side effects; used for transient
    /// inspection rather than a real unmerge.
    fn create_entity(
        &self,
        tag: NbtCompound,
        location: Location,
        kind: EntityKind,
        silent: bool,
    ) -> StorageResult<Arc<LiveEntity>>;
}

/// Tag selecting a storage encoding.
///
/// A single encoding exists today; the tag is persisted alongside stack data
/// so alternative encodings can be added without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Nbt,
}

impl StorageType {
    /// Stable id used in persisted headers.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Nbt => 0,
        }
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Nbt),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_id_round_trip() {
        assert_eq!(StorageType::from_id(StorageType::Nbt.id()), Some(StorageType::Nbt));
        assert_eq!(StorageType::from_id(200), None);
    }
}
