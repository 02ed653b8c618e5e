//! Adapter for 1.19 and 1.20 hosts.

use std::sync::Arc;

use stacker_host::{EntityKind, LiveEntity, Location};
use stacker_nbt::NbtCompound;
use stacker_storage::{StorageResult, VersionAdapter};

use crate::shared;

/// These hosts persist world linkage as a single origin-world uuid.
pub struct Adapter;

impl VersionAdapter for Adapter {
    fn name(&self) -> &'static str {
        "v1_19"
    }

    fn data_version(&self) -> i32 {
        3218
    }

    fn save_entity_to_tag(&self, entity: &LiveEntity) -> StorageResult<NbtCompound> {
        let mut tag = shared::save_common(entity);
        if let Some(world) = entity.location().world() {
            tag.insert("Paper.OriginWorld", shared::uuid_ints(world.id()));
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
    fn test_save_writes_origin_world() {
        let world = World::new("world");
        let entity = LiveEntity::with_state(
            EntityKind::Sheep,
            Location::new(&world, 0.0, 0.0, 0.0),
            nbt! { "Color" => 5i8 },
        );

        let tag = Adapter.save_entity_to_tag(&entity).unwrap();
        assert!(tag.contains_key("Paper.OriginWorld"));
        assert!(!tag.contains_key("WorldUUIDMost"));
        assert_eq!(tag.get_int("DataVersion"), Some(3218));
    }

    #[test]
    fn test_silent_create_skips_spawn() {
        let world = World::new("world");
        let entity = LiveEntity::new(EntityKind::Sheep, Location::new(&world, 0.0, 0.0, 0.0));
        let tag = Adapter.save_entity_to_tag(&entity).unwrap();

        let location = Location::new(&world, 0.0, 0.0, 0.0);
        Adapter
            .create_entity(tag.clone(), location.clone(), EntityKind::Sheep, true)
            .unwrap();
        assert_eq!(world.spawn_count(), 0);

        Adapter
            .create_entity(tag, location, EntityKind::Sheep, false)
            .unwrap();
        assert_eq!(world.spawn_count(), 1);
    }
}
