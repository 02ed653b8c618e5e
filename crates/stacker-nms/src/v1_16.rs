//! Adapter for 1.16 through 1.18 hosts.

use std::sync::Arc;

use stacker_host::{EntityKind, LiveEntity, Location};
use stacker_nbt::NbtCompound;
use stacker_storage::{StorageResult, VersionAdapter};

use crate::shared;

/// These hosts persist world linkage as two signed longs.
pub struct Adapter;

impl VersionAdapter for Adapter {
    fn name(&self) -> &'static str {
        "v1_16"
    }

    fn data_version(&self) -> i32 {
        2586
    }

    fn save_entity_to_tag(&self, entity: &LiveEntity) -> StorageResult<NbtCompound> {
        let mut tag = shared::save_common(entity);
        if let Some(world) = entity.location().world() {
            tag.insert("WorldUUIDMost", (world.id() >> 64) as i64);
            tag.insert("WorldUUIDLeast", world.id() as i64);
        }
        tag.insert("DataVersion", self.data_version());
        Ok(tag)
    }

    fn create_entity(
        &self,
        tag: NbtCompound,
        location: Location,
        kind: EntityKind,
        silent: bool,
    ) -> StorageResult<Arc<LiveEntity>> {
        Ok(shared::create_common(tag, location, kind, silent))
    }
}

#[cfg(test)]
mod tests {
    use stacker_host::World;
    use stacker_nbt::nbt;

    use super::*;

    #[test]
    fn test_save_writes_world_linkage() {
        let world = World::new("world");
        let entity = LiveEntity::with_state(
            EntityKind::Creeper,
            Location::new(&world, 1.0, 2.0, 3.0),
            nbt! { "ExplosionRadius" => 3i8 },
        );

        let tag = Adapter.save_entity_to_tag(&entity).unwrap();
        assert!(tag.contains_key("WorldUUIDMost"));
        assert!(tag.contains_key("WorldUUIDLeast"));
        assert!(!tag.contains_key("Paper.OriginWorld"));
        assert_eq!(tag.get_int("DataVersion"), Some(2586));
        assert_eq!(tag.get_string("id"), Some("minecraft:creeper"));
    }

    #[test]
    fn test_create_drops_live_fields() {
        let world = World::new("world");
        let entity = LiveEntity::with_state(
            EntityKind::Creeper,
            Location::new(&world, 1.0, 2.0, 3.0),
            nbt! { "ExplosionRadius" => 3i8 },
        );

        let tag = Adapter.save_entity_to_tag(&entity).unwrap();
        let rebuilt = Adapter
            .create_entity(tag, Location::new(&world, 5.0, 6.0, 7.0), EntityKind::Creeper, true)
            .unwrap();

        let state = rebuilt.state();
        assert!(!state.contains_key("Pos"));
        assert!(!state.contains_key("UUID"));
        assert!(!state.contains_key("WorldUUIDMost"));
        assert!(state.contains_key("ExplosionRadius"));
        assert_eq!(rebuilt.location().x, 5.0);
    }
}
